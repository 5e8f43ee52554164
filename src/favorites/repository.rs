use diesel::prelude::*;

use crate::error::Error;
use crate::models::{Favorite, NewFavorite, Tree};
use crate::schema::favorite::dsl;

/// Storage for tree-wide favorites. Every lookup is scoped to one tree and to
/// rows with no owning user.
pub trait FavoriteRepository {
    fn tree_favorites(&self, tree: &Tree) -> Result<Vec<Favorite>, Error>;
    fn find_by_tree_and_url(&self, tree: &Tree, url: &str) -> Result<Option<Favorite>, Error>;
    fn find_by_tree_and_xref(&self, tree: &Tree, xref: &str) -> Result<Option<Favorite>, Error>;
    fn insert(&self, favorite: &NewFavorite) -> Result<(), Error>;
    fn update(&self, favorite_id: i32, title: Option<&str>, note: &str) -> Result<usize, Error>;
    fn delete_by_id(&self, tree: &Tree, favorite_id: i32) -> Result<usize, Error>;
}

pub struct SqliteFavorites<'a> {
    conn: &'a SqliteConnection,
}

impl<'a> SqliteFavorites<'a> {
    pub fn new(conn: &'a SqliteConnection) -> Self {
        SqliteFavorites { conn }
    }
}

impl<'a> FavoriteRepository for SqliteFavorites<'a> {
    fn tree_favorites(&self, tree: &Tree) -> Result<Vec<Favorite>, Error> {
        Ok(dsl::favorite
            .filter(dsl::gedcom_id.eq(tree.id()))
            .filter(dsl::user_id.is_null())
            .order(dsl::favorite_id.asc())
            .load::<Favorite>(self.conn)?)
    }

    fn find_by_tree_and_url(&self, tree: &Tree, url: &str) -> Result<Option<Favorite>, Error> {
        Ok(dsl::favorite
            .filter(dsl::gedcom_id.eq(tree.id()))
            .filter(dsl::user_id.is_null())
            .filter(dsl::url.eq(url))
            .first::<Favorite>(self.conn)
            .optional()?)
    }

    fn find_by_tree_and_xref(&self, tree: &Tree, xref: &str) -> Result<Option<Favorite>, Error> {
        Ok(dsl::favorite
            .filter(dsl::gedcom_id.eq(tree.id()))
            .filter(dsl::user_id.is_null())
            .filter(dsl::xref.eq(xref))
            .first::<Favorite>(self.conn)
            .optional()?)
    }

    fn insert(&self, favorite: &NewFavorite) -> Result<(), Error> {
        diesel::insert_into(dsl::favorite)
            .values(favorite)
            .execute(self.conn)?;
        Ok(())
    }

    /// Record favorites keep their title, so `title: None` leaves it alone.
    fn update(&self, favorite_id: i32, title: Option<&str>, note: &str) -> Result<usize, Error> {
        let target = dsl::favorite.filter(dsl::favorite_id.eq(favorite_id));
        let updated = match title {
            Some(title) => diesel::update(target)
                .set((dsl::note.eq(note), dsl::title.eq(title)))
                .execute(self.conn)?,
            None => diesel::update(target)
                .set(dsl::note.eq(note))
                .execute(self.conn)?,
        };
        Ok(updated)
    }

    fn delete_by_id(&self, tree: &Tree, favorite_id: i32) -> Result<usize, Error> {
        Ok(diesel::delete(
            dsl::favorite
                .filter(dsl::favorite_id.eq(favorite_id))
                .filter(dsl::gedcom_id.eq(tree.id())),
        )
        .execute(self.conn)?)
    }
}
