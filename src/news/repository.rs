use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::error::Error;
use crate::models::{Article, NewArticle, Tree};
use crate::schema::news::dsl;

pub trait ArticleRepository {
    /// The tree's articles, most recently updated first.
    fn tree_articles(&self, tree: &Tree) -> Result<Vec<Article>, Error>;
    fn find(&self, tree: &Tree, news_id: i32) -> Result<Option<Article>, Error>;
    fn insert(&self, article: &NewArticle) -> Result<(), Error>;
    fn update(
        &self,
        tree: &Tree,
        news_id: i32,
        subject: &str,
        body: &str,
        updated: NaiveDateTime,
    ) -> Result<usize, Error>;
    fn delete_by_id(&self, tree: &Tree, news_id: i32) -> Result<usize, Error>;
}

pub struct SqliteNews<'a> {
    conn: &'a SqliteConnection,
}

impl<'a> SqliteNews<'a> {
    pub fn new(conn: &'a SqliteConnection) -> Self {
        SqliteNews { conn }
    }
}

impl<'a> ArticleRepository for SqliteNews<'a> {
    fn tree_articles(&self, tree: &Tree) -> Result<Vec<Article>, Error> {
        Ok(dsl::news
            .filter(dsl::gedcom_id.eq(tree.id()))
            .order((dsl::updated.desc(), dsl::news_id.desc()))
            .load::<Article>(self.conn)?)
    }

    fn find(&self, tree: &Tree, news_id: i32) -> Result<Option<Article>, Error> {
        Ok(dsl::news
            .filter(dsl::news_id.eq(news_id))
            .filter(dsl::gedcom_id.eq(tree.id()))
            .first::<Article>(self.conn)
            .optional()?)
    }

    fn insert(&self, article: &NewArticle) -> Result<(), Error> {
        diesel::insert_into(dsl::news)
            .values(article)
            .execute(self.conn)?;
        Ok(())
    }

    fn update(
        &self,
        tree: &Tree,
        news_id: i32,
        subject: &str,
        body: &str,
        updated: NaiveDateTime,
    ) -> Result<usize, Error> {
        Ok(diesel::update(
            dsl::news
                .filter(dsl::news_id.eq(news_id))
                .filter(dsl::gedcom_id.eq(tree.id())),
        )
        .set((
            dsl::subject.eq(subject),
            dsl::body.eq(body),
            dsl::updated.eq(updated),
        ))
        .execute(self.conn)?)
    }

    fn delete_by_id(&self, tree: &Tree, news_id: i32) -> Result<usize, Error> {
        Ok(diesel::delete(
            dsl::news
                .filter(dsl::news_id.eq(news_id))
                .filter(dsl::gedcom_id.eq(tree.id())),
        )
        .execute(self.conn)?)
    }
}
