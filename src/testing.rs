//! In-memory stand-ins for the storage and authorization collaborators.

use chrono::NaiveDateTime;
use std::cell::{Cell, RefCell};

use crate::auth::Authorizer;
use crate::error::Error;
use crate::favorites::FavoriteRepository;
use crate::models::{Article, Favorite, NewArticle, NewFavorite, Tree, User};
use crate::module::TreeContext;
use crate::news::ArticleRepository;
use crate::records::{Record, RecordRepository};

pub struct FixedAuthorizer {
    pub manager: bool,
}

impl Authorizer for FixedAuthorizer {
    fn is_manager(&self, _tree: &Tree, actor: Option<&User>) -> Result<bool, Error> {
        Ok(self.manager && actor.is_some())
    }
}

#[derive(Default)]
pub struct MemoryRecords {
    rows: RefCell<Vec<Record>>,
}

impl MemoryRecords {
    pub fn add(&self, gedcom_id: i32, xref: &str, record_type: &str, name: &str, restricted: bool) {
        self.rows.borrow_mut().push(Record {
            gedcom_id,
            xref: xref.to_owned(),
            record_type: record_type.to_owned(),
            name: name.to_owned(),
            restricted,
        });
    }
}

impl RecordRepository for MemoryRecords {
    fn resolve(&self, tree: &Tree, xref: &str) -> Result<Option<Record>, Error> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .find(|record| record.gedcom_id == tree.id() && record.xref == xref)
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryFavorites {
    rows: RefCell<Vec<Favorite>>,
    last_id: Cell<i32>,
}

impl MemoryFavorites {
    pub fn rows(&self) -> Vec<Favorite> {
        self.rows.borrow().clone()
    }

    /// Inserts a URL favorite directly, bypassing any checks.
    pub fn seed(&self, gedcom_id: i32, url: &str) -> i32 {
        self.insert(&NewFavorite {
            gedcom_id,
            xref: None,
            favorite_type: "URL",
            url: Some(url),
            title: Some(url),
            note: None,
        })
        .unwrap();
        self.last_id.get()
    }

    fn find(&self, predicate: impl Fn(&Favorite) -> bool) -> Option<Favorite> {
        self.rows
            .borrow()
            .iter()
            .find(|favorite| favorite.user_id.is_none() && predicate(favorite))
            .cloned()
    }
}

impl FavoriteRepository for MemoryFavorites {
    fn tree_favorites(&self, tree: &Tree) -> Result<Vec<Favorite>, Error> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|favorite| favorite.gedcom_id == tree.id() && favorite.user_id.is_none())
            .cloned()
            .collect())
    }

    fn find_by_tree_and_url(&self, tree: &Tree, url: &str) -> Result<Option<Favorite>, Error> {
        Ok(self.find(|favorite| {
            favorite.gedcom_id == tree.id() && favorite.url.as_ref().map(String::as_str) == Some(url)
        }))
    }

    fn find_by_tree_and_xref(&self, tree: &Tree, xref: &str) -> Result<Option<Favorite>, Error> {
        Ok(self.find(|favorite| {
            favorite.gedcom_id == tree.id() && favorite.xref.as_ref().map(String::as_str) == Some(xref)
        }))
    }

    fn insert(&self, favorite: &NewFavorite) -> Result<(), Error> {
        self.last_id.set(self.last_id.get() + 1);
        self.rows.borrow_mut().push(Favorite {
            favorite_id: self.last_id.get(),
            user_id: None,
            gedcom_id: favorite.gedcom_id,
            xref: favorite.xref.map(str::to_owned),
            favorite_type: favorite.favorite_type.to_owned(),
            url: favorite.url.map(str::to_owned),
            title: favorite.title.map(str::to_owned),
            note: favorite.note.map(str::to_owned),
        });
        Ok(())
    }

    fn update(&self, favorite_id: i32, title: Option<&str>, note: &str) -> Result<usize, Error> {
        let mut rows = self.rows.borrow_mut();
        let mut updated = 0;
        for favorite in rows.iter_mut().filter(|f| f.favorite_id == favorite_id) {
            if let Some(title) = title {
                favorite.title = Some(title.to_owned());
            }
            favorite.note = Some(note.to_owned());
            updated += 1;
        }
        Ok(updated)
    }

    fn delete_by_id(&self, tree: &Tree, favorite_id: i32) -> Result<usize, Error> {
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|f| !(f.favorite_id == favorite_id && f.gedcom_id == tree.id()));
        Ok(before - rows.len())
    }
}

#[derive(Default)]
pub struct MemoryNews {
    rows: RefCell<Vec<Article>>,
    last_id: Cell<i32>,
}

impl MemoryNews {
    pub fn rows(&self) -> Vec<Article> {
        self.rows.borrow().clone()
    }

    pub fn seed(&self, gedcom_id: i32, subject: &str, updated: NaiveDateTime) {
        self.insert(&NewArticle {
            gedcom_id: Some(gedcom_id),
            subject,
            body: "",
            updated,
        })
        .unwrap();
    }
}

impl ArticleRepository for MemoryNews {
    fn tree_articles(&self, tree: &Tree) -> Result<Vec<Article>, Error> {
        let mut articles: Vec<_> = self
            .rows
            .borrow()
            .iter()
            .filter(|article| article.gedcom_id == Some(tree.id()))
            .cloned()
            .collect();
        articles.sort_by(|a, b| (b.updated, b.news_id).cmp(&(a.updated, a.news_id)));
        Ok(articles)
    }

    fn find(&self, tree: &Tree, news_id: i32) -> Result<Option<Article>, Error> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .find(|article| article.news_id == news_id && article.gedcom_id == Some(tree.id()))
            .cloned())
    }

    fn insert(&self, article: &NewArticle) -> Result<(), Error> {
        self.last_id.set(self.last_id.get() + 1);
        self.rows.borrow_mut().push(Article {
            news_id: self.last_id.get(),
            user_id: None,
            gedcom_id: article.gedcom_id,
            subject: article.subject.to_owned(),
            body: article.body.to_owned(),
            updated: article.updated,
        });
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
        let mut rows = self.rows.borrow_mut();
        let mut count = 0;
        for article in rows
            .iter_mut()
            .filter(|a| a.news_id == news_id && a.gedcom_id == Some(tree.id()))
        {
            article.subject = subject.to_owned();
            article.body = body.to_owned();
            article.updated = updated;
            count += 1;
        }
        Ok(count)
    }

    fn delete_by_id(&self, tree: &Tree, news_id: i32) -> Result<usize, Error> {
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|a| !(a.news_id == news_id && a.gedcom_id == Some(tree.id())));
        Ok(before - rows.len())
    }
}

/// One tree, one actor and empty in-memory storage.
pub struct Fixture {
    pub tree: Tree,
    pub actor: User,
    pub authorizer: FixedAuthorizer,
    pub records: MemoryRecords,
    pub favorites: MemoryFavorites,
    pub news: MemoryNews,
}

impl Fixture {
    pub fn manager() -> Self {
        Fixture::new(true)
    }

    pub fn visitor() -> Self {
        Fixture::new(false)
    }

    fn new(manager: bool) -> Self {
        Fixture {
            tree: Tree {
                gedcom_id: 1,
                gedcom_name: "demo".to_owned(),
                title: "Demo tree".to_owned(),
            },
            actor: User {
                user_id: 1,
                user_name: "alice".to_owned(),
                real_name: "Alice".to_owned(),
            },
            authorizer: FixedAuthorizer { manager },
            records: MemoryRecords::default(),
            favorites: MemoryFavorites::default(),
            news: MemoryNews::default(),
        }
    }

    pub fn context(&self) -> TreeContext<'_> {
        TreeContext {
            tree: &self.tree,
            actor: Some(&self.actor),
            authorizer: &self.authorizer,
            records: &self.records,
            favorites: &self.favorites,
            news: &self.news,
        }
    }
}
