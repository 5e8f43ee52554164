//! Dashboard blocks that can be placed on a tree's home page.

use crate::auth::Authorizer;
use crate::error::Error;
use crate::favorites::{FavoriteRepository, FavoritesModule};
use crate::models::{Tree, User};
use crate::news::{ArticleRepository, NewsModule};
use crate::records::RecordRepository;
use crate::templates;

/// Everything a block needs to act on one tree for one actor.
pub struct TreeContext<'a> {
    pub tree: &'a Tree,
    pub actor: Option<&'a User>,
    pub authorizer: &'a dyn Authorizer,
    pub records: &'a dyn RecordRepository,
    pub favorites: &'a dyn FavoriteRepository,
    pub news: &'a dyn ArticleRepository,
}

impl<'a> TreeContext<'a> {
    pub fn is_manager(&self) -> Result<bool, Error> {
        self.authorizer.is_manager(self.tree, self.actor)
    }

    pub fn require_manager(&self) -> Result<(), Error> {
        if self.is_manager()? {
            Ok(())
        } else {
            log::warn!(
                "Access denied to {} for {}",
                self.tree.name(),
                self.actor.map(|user| user.user_name.as_str()).unwrap_or("anonymous")
            );
            Err(Error::AccessDenied)
        }
    }
}

pub trait ModuleBlock {
    /// Internal name, used in URLs and CSS classes.
    fn name(&self) -> &'static str;

    /// How the block is labelled on tabs, menus, etc.
    fn title(&self) -> &'static str;

    /// A sentence describing what the block does.
    fn description(&self) -> &'static str;

    /// The bare HTML content of the block.
    fn content(&self, ctx: &TreeContext, block_id: i32) -> Result<String, Error>;

    /// Whether the block is loaded after the page, rather than in-line.
    fn load_ajax(&self) -> bool {
        false
    }

    fn is_user_block(&self) -> bool;

    fn is_tree_block(&self) -> bool;

    /// Where to edit the block's settings, for blocks that have any.
    fn config_url(&self, _tree: &Tree) -> Option<String> {
        None
    }

    /// Renders the block. A non-empty `ctype` wraps the content in the
    /// standard block frame; an empty one returns the bare content.
    fn render_block(
        &self,
        ctx: &TreeContext,
        block_id: i32,
        ctype: &str,
    ) -> Result<String, Error> {
        let content = self.content(ctx, block_id)?;
        if ctype.is_empty() {
            return Ok(content);
        }

        let config_url = self.config_url(ctx.tree);
        let mut buf = Vec::new();
        templates::block_template(
            &mut buf,
            &self.name().replace('_', "-"),
            block_id,
            config_url.as_ref().map(String::as_str).unwrap_or(""),
            config_url.is_some(),
            self.title(),
            self.description(),
            templates::Html(content),
        )?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// The blocks shown on a tree's home page, in display order.
pub fn tree_blocks() -> Vec<Box<dyn ModuleBlock>> {
    let modules = vec![
        Box::new(NewsModule) as Box<dyn ModuleBlock>,
        Box::new(FavoritesModule),
    ];
    modules
        .into_iter()
        .filter(|module| module.is_tree_block())
        .collect()
}

pub fn find_block(name: &str) -> Result<Box<dyn ModuleBlock>, Error> {
    tree_blocks()
        .into_iter()
        .find(|module| module.name() == name)
        .ok_or_else(|| Error::ModuleNotFound(name.to_owned()))
}
