use crate::schema::*;

use chrono::NaiveDateTime;
use serde_derive::Serialize;

#[derive(Clone, Debug, Identifiable, Queryable, Serialize)]
#[table_name = "gedcom"]
#[primary_key(gedcom_id)]
pub struct Tree {
    pub gedcom_id: i32,
    pub gedcom_name: String,
    pub title: String,
}

impl Tree {
    pub fn id(&self) -> i32 {
        self.gedcom_id
    }

    pub fn name(&self) -> &str {
        &self.gedcom_name
    }

    pub fn title(&self) -> &str {
        if self.title.is_empty() {
            &self.gedcom_name
        } else {
            &self.title
        }
    }

    /// Path of the tree's home page.
    pub fn url(&self) -> String {
        use url::percent_encoding::{utf8_percent_encode, PATH_SEGMENT_ENCODE_SET};
        format!(
            "/tree/{}",
            utf8_percent_encode(&self.gedcom_name, PATH_SEGMENT_ENCODE_SET)
        )
    }
}

#[derive(Clone, Debug, Identifiable, Queryable, Serialize)]
#[table_name = "user"]
#[primary_key(user_id)]
pub struct User {
    pub user_id: i32,
    pub user_name: String,
    pub real_name: String,
}

#[derive(Clone, Debug, PartialEq, Queryable, Serialize)]
pub struct Favorite {
    pub favorite_id: i32,
    pub user_id: Option<i32>,
    pub gedcom_id: i32,
    pub xref: Option<String>,
    pub favorite_type: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub note: Option<String>,
}

/// A tree-wide favorite waiting to be inserted. Exactly one of `xref` and
/// `url` is set.
#[derive(Debug, Insertable)]
#[table_name = "favorite"]
pub struct NewFavorite<'a> {
    pub gedcom_id: i32,
    pub xref: Option<&'a str>,
    pub favorite_type: &'a str,
    pub url: Option<&'a str>,
    pub title: Option<&'a str>,
    pub note: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Queryable, Serialize)]
pub struct Article {
    pub news_id: i32,
    pub user_id: Option<i32>,
    pub gedcom_id: Option<i32>,
    pub subject: String,
    pub body: String,
    pub updated: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[table_name = "news"]
pub struct NewArticle<'a> {
    pub gedcom_id: Option<i32>,
    pub subject: &'a str,
    pub body: &'a str,
    pub updated: NaiveDateTime,
}

impl Article {
    pub fn updated_display(&self) -> String {
        self.updated.format("%-d %B %Y %H:%M").to_string()
    }
}
