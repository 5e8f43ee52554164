//! The Favorites block: a tree's list of favorite records and web pages,
//! maintained by the tree's managers.

mod repository;

pub use self::repository::{FavoriteRepository, SqliteFavorites};

use serde_derive::Deserialize;

use crate::error::Error;
use crate::models::{Favorite, NewFavorite};
use crate::module::{ModuleBlock, TreeContext};
use crate::records::Record;
use crate::templates;

/// A favorite together with the record its xref resolves to, if any.
#[derive(Debug)]
pub struct FavoriteView {
    pub favorite: Favorite,
    pub record: Option<Record>,
}

impl FavoriteView {
    pub fn id(&self) -> i32 {
        self.favorite.favorite_id
    }

    /// URL favorites are always shown; record favorites only when the record
    /// still exists and is not restricted.
    pub fn is_shown(&self) -> bool {
        match &self.record {
            Some(record) => record.can_show(),
            None => self.favorite.url.is_some(),
        }
    }

    pub fn is_url(&self) -> bool {
        self.favorite.url.is_some()
    }

    pub fn url(&self) -> &str {
        self.favorite.url.as_ref().map(String::as_str).unwrap_or("")
    }

    pub fn label(&self) -> &str {
        if let Some(record) = &self.record {
            return record.full_name();
        }
        match &self.favorite.title {
            Some(title) if !title.is_empty() => title.as_str(),
            _ => self.url(),
        }
    }

    pub fn record_type(&self) -> &str {
        &self.favorite.favorite_type
    }

    pub fn has_note(&self) -> bool {
        self.note() != ""
    }

    pub fn note(&self) -> &str {
        self.favorite.note.as_ref().map(String::as_str).unwrap_or("")
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FavoriteCategory {
    Url,
    Record,
    /// No category chosen: prefer a resolvable record, fall back to the URL.
    Unspecified,
}

impl Default for FavoriteCategory {
    fn default() -> Self {
        FavoriteCategory::Unspecified
    }
}

impl<'de> serde::Deserialize<'de> for FavoriteCategory {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "url" => FavoriteCategory::Url,
            "record" => FavoriteCategory::Record,
            _ => FavoriteCategory::Unspecified,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AddFavoriteForm {
    #[serde(default)]
    pub fav_category: FavoriteCategory,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub xref: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteFavoriteForm {
    #[serde(default, with = "serde_with::rust::string_empty_as_none")]
    favorite_id: Option<i32>,
}

impl DeleteFavoriteForm {
    /// A missing or blank id is 0, which matches no favorite.
    pub fn favorite_id(&self) -> i32 {
        self.favorite_id.unwrap_or(0)
    }
}

/// All tree-wide favorites, each with its record resolved where possible.
pub fn tree_favorites(ctx: &TreeContext) -> Result<Vec<FavoriteView>, Error> {
    ctx.favorites
        .tree_favorites(ctx.tree)?
        .into_iter()
        .map(|favorite| -> Result<FavoriteView, Error> {
            let record = match &favorite.xref {
                Some(xref) => ctx.records.resolve(ctx.tree, xref)?,
                None => None,
            };
            Ok(FavoriteView { favorite, record })
        })
        .collect()
}

/// Adds a favorite, or updates the existing one for the same record or URL.
/// Does nothing unless the actor manages the tree.
pub fn add_favorite(ctx: &TreeContext, form: &AddFavoriteForm) -> Result<(), Error> {
    if !ctx.is_manager()? {
        log::warn!(
            "Refusing to add favorite to {} for non-manager",
            ctx.tree.name()
        );
        return Ok(());
    }

    let wants_record = form.fav_category != FavoriteCategory::Url;
    let wants_url = form.fav_category != FavoriteCategory::Record;

    if wants_record {
        if let Some(record) = ctx.records.resolve(ctx.tree, &form.xref)? {
            if record.can_show() {
                return add_record_favorite(ctx, &record, &form.note);
            }
        }
    }

    if wants_url && !form.url.is_empty() {
        let title = if form.title.is_empty() {
            &form.url
        } else {
            &form.title
        };
        return add_url_favorite(ctx, &form.url, title, &form.note);
    }

    log::debug!("Nothing to add to favorites of {}", ctx.tree.name());
    Ok(())
}

fn add_url_favorite(ctx: &TreeContext, url: &str, title: &str, note: &str) -> Result<(), Error> {
    match ctx.favorites.find_by_tree_and_url(ctx.tree, url)? {
        Some(existing) => {
            ctx.favorites.update(existing.favorite_id, Some(title), note)?;
        }
        None => {
            ctx.favorites.insert(&NewFavorite {
                gedcom_id: ctx.tree.id(),
                xref: None,
                favorite_type: "URL",
                url: Some(url),
                title: Some(title),
                note: Some(note),
            })?;
        }
    }
    log::info!("Saved favorite {} in {}", url, ctx.tree.name());
    Ok(())
}

fn add_record_favorite(ctx: &TreeContext, record: &Record, note: &str) -> Result<(), Error> {
    match ctx.favorites.find_by_tree_and_xref(ctx.tree, &record.xref)? {
        Some(existing) => {
            ctx.favorites.update(existing.favorite_id, None, note)?;
        }
        None => {
            ctx.favorites.insert(&NewFavorite {
                gedcom_id: ctx.tree.id(),
                xref: Some(&record.xref),
                favorite_type: &record.record_type,
                url: None,
                title: None,
                note: Some(note),
            })?;
        }
    }
    log::info!("Saved favorite {} in {}", record.xref, ctx.tree.name());
    Ok(())
}

/// Deletes one of the tree's favorites. Ids belonging to other trees, or to
/// no row at all, are ignored, as are requests from non-managers.
pub fn delete_favorite(ctx: &TreeContext, favorite_id: i32) -> Result<(), Error> {
    if !ctx.is_manager()? {
        log::warn!(
            "Refusing to delete favorite {} from {} for non-manager",
            favorite_id,
            ctx.tree.name()
        );
        return Ok(());
    }
    let deleted = ctx.favorites.delete_by_id(ctx.tree, favorite_id)?;
    log::info!(
        "Deleted {} favorite(s) with id {} from {}",
        deleted,
        favorite_id,
        ctx.tree.name()
    );
    Ok(())
}

pub struct FavoritesModule;

impl ModuleBlock for FavoritesModule {
    fn name(&self) -> &'static str {
        "gedcom_favorites"
    }

    fn title(&self) -> &'static str {
        "Favorites"
    }

    fn description(&self) -> &'static str {
        "Display and manage a family tree’s favorite pages."
    }

    fn content(&self, ctx: &TreeContext, block_id: i32) -> Result<String, Error> {
        let favorites = tree_favorites(ctx)?;
        let mut buf = Vec::new();
        templates::favorites(
            &mut buf,
            &ctx.tree.url(),
            block_id,
            &favorites,
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
