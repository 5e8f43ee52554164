//! The News block: family news and site announcements for one tree.

mod repository;

pub use self::repository::{ArticleRepository, SqliteNews};

use chrono::NaiveDateTime;
use serde_derive::Deserialize;

use crate::error::Error;
use crate::models::{Article, NewArticle};
use crate::module::{ModuleBlock, TreeContext};
use crate::templates;

/// Articles beyond this many are shown collapsed.
pub const EXPANDED_ARTICLES: usize = 5;

#[derive(Debug, Default, Deserialize)]
pub struct EditNewsForm {
    /// Blank for a new article.
    #[serde(default, with = "serde_with::rust::string_empty_as_none")]
    pub news_id: Option<i32>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteNewsForm {
    #[serde(default)]
    pub news_id: i32,
}

#[derive(Debug, Default, PartialEq)]
pub struct ArticleDraft {
    pub news_id: i32,
    pub subject: String,
    pub body: String,
}

pub fn tree_articles(ctx: &TreeContext) -> Result<Vec<Article>, Error> {
    ctx.news.tree_articles(ctx.tree)
}

/// The subject and body to pre-fill the edit form with. Unknown ids give a
/// blank form.
pub fn edit_form(ctx: &TreeContext, news_id: Option<i32>) -> Result<ArticleDraft, Error> {
    ctx.require_manager()?;

    let news_id = news_id.unwrap_or(0);
    if news_id > 0 {
        if let Some(article) = ctx.news.find(ctx.tree, news_id)? {
            return Ok(ArticleDraft {
                news_id,
                subject: article.subject,
                body: article.body,
            });
        }
    }
    Ok(ArticleDraft::default())
}

/// Updates the article when `news_id` is positive, otherwise creates one.
pub fn save_article(
    ctx: &TreeContext,
    form: &EditNewsForm,
    now: NaiveDateTime,
) -> Result<(), Error> {
    ctx.require_manager()?;

    match form.news_id {
        Some(news_id) if news_id > 0 => {
            let updated = ctx
                .news
                .update(ctx.tree, news_id, &form.subject, &form.body, now)?;
            log::info!(
                "Updated {} news article(s) with id {} in {}",
                updated,
                news_id,
                ctx.tree.name()
            );
        }
        _ => {
            ctx.news.insert(&NewArticle {
                gedcom_id: Some(ctx.tree.id()),
                subject: &form.subject,
                body: &form.body,
                updated: now,
            })?;
            log::info!("Added news article to {}", ctx.tree.name());
        }
    }
    Ok(())
}

pub fn delete_article(ctx: &TreeContext, news_id: i32) -> Result<(), Error> {
    ctx.require_manager()?;

    let deleted = ctx.news.delete_by_id(ctx.tree, news_id)?;
    log::info!(
        "Deleted {} news article(s) with id {} from {}",
        deleted,
        news_id,
        ctx.tree.name()
    );
    Ok(())
}

pub struct NewsModule;

impl ModuleBlock for NewsModule {
    fn name(&self) -> &'static str {
        "gedcom_news"
    }

    fn title(&self) -> &'static str {
        "News"
    }

    fn description(&self) -> &'static str {
        "Family news and site announcements."
    }

    fn content(&self, ctx: &TreeContext, block_id: i32) -> Result<String, Error> {
        let articles = tree_articles(ctx)?;
        let (expanded, collapsed) = articles.split_at(articles.len().min(EXPANDED_ARTICLES));
        let mut buf = Vec::new();
        templates::news_list(
            &mut buf,
            &ctx.tree.url(),
            block_id,
            expanded,
            collapsed,
            !collapsed.is_empty(),
            ctx.is_manager()?,
        )?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn is_user_block(&self) -> bool {
        false
    }

    fn is_tree_block(&self) -> bool {
        true
    }
}
