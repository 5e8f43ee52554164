use chrono::Utc;
use diesel::SqliteConnection;
use futures::{Future, Stream};
use gotham::handler::{HandlerError, HandlerFuture};
use gotham::helpers::http::response::{create_empty_response, create_response};
use gotham::middleware::state::StateMiddleware;
use gotham::pipeline::single::single_pipeline;
use gotham::pipeline::single_middleware;
use gotham::router::{builder::*, Router};
use gotham::state::{FromState, State};
use gotham_derive::{StateData, StaticResponseExtender};
use hyper::header::{HeaderValue, LOCATION};
use hyper::{Body, HeaderMap, Response, StatusCode};
use serde_derive::Deserialize;
use std::sync::Arc;

use crate::auth::{self, SqliteAuthorizer, REMOTE_USER_HEADER};
use crate::config::Config;
use crate::db;
use crate::error::Error;
use crate::favorites::{self, AddFavoriteForm, DeleteFavoriteForm, SqliteFavorites};
use crate::models::User;
use crate::module::{self, TreeContext};
use crate::news::{self, DeleteNewsForm, EditNewsForm, SqliteNews};
use crate::records::SqliteRecords;
use crate::templates;
use crate::trees;

/// Block type passed to blocks placed on a tree's home page.
const TREE_PAGE_CTYPE: &str = "gedcom";

#[derive(Clone, StateData)]
pub struct AppState {
    config: Arc<Config>,
}

pub fn router(config: Config) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };
    let (chain, pipelines) = single_pipeline(single_middleware(StateMiddleware::new(state)));

    build_router(chain, pipelines, |route| {
        route.get("/").to(serve_index);
        route.get("/static/style.css").to(serve_stylesheet);

        route
            .get("/tree/:ged")
            .with_path_extractor::<TreePath>()
            .to(serve_tree_page);
        route
            .get("/tree/:ged/block/:module")
            .with_path_extractor::<BlockPath>()
            .with_query_string_extractor::<BlockQuery>()
            .to(serve_block);

        route
            .post("/tree/:ged/favorites/add")
            .with_path_extractor::<TreePath>()
            .to(post_add_favorite);
        route
            .post("/tree/:ged/favorites/delete")
            .with_path_extractor::<TreePath>()
            .to(post_delete_favorite);

        route
            .get("/tree/:ged/news/edit")
            .with_path_extractor::<TreePath>()
            .with_query_string_extractor::<EditNewsQuery>()
            .to(serve_edit_news);
        route
            .post("/tree/:ged/news/edit")
            .with_path_extractor::<TreePath>()
            .to(post_edit_news);
        route
            .post("/tree/:ged/news/delete")
            .with_path_extractor::<TreePath>()
            .to(post_delete_news);
    })
}

#[derive(Deserialize, StateData, StaticResponseExtender)]
struct TreePath {
    ged: String,
}

#[derive(Deserialize, StateData, StaticResponseExtender)]
struct BlockPath {
    ged: String,
    module: String,
}

#[derive(Deserialize, StateData, StaticResponseExtender)]
struct BlockQuery {
    block_id: Option<i32>,
}

#[derive(Deserialize, StateData, StaticResponseExtender)]
struct EditNewsQuery {
    #[serde(default, with = "serde_with::rust::string_empty_as_none")]
    news_id: Option<i32>,
}

fn current_user(state: &State, conn: &SqliteConnection) -> Result<Option<User>, Error> {
    let name = HeaderMap::borrow_from(state)
        .get(REMOTE_USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if name.is_empty() {
        return Ok(None);
    }
    let user = auth::find_user(conn, name)?;
    if user.is_none() {
        log::warn!("Unknown remote user {}, treating as anonymous", name);
    }
    Ok(user)
}

/// Opens a connection, resolves the tree and the acting user, and hands the
/// assembled context to `action`.
fn with_tree<T, F>(state: &State, ged: &str, action: F) -> Result<T, Error>
where
    F: FnOnce(&Config, &TreeContext) -> Result<T, Error>,
{
    let app = AppState::borrow_from(state);
    let conn = db::connect(&app.config.db_path)?;
    let tree = trees::find_tree(&conn, ged)?;
    let actor = current_user(state, &conn)?;

    let authorizer = SqliteAuthorizer::new(&conn);
    let records = SqliteRecords::new(&conn);
    let favorites = SqliteFavorites::new(&conn);
    let news = SqliteNews::new(&conn);
    let ctx = TreeContext {
        tree: &tree,
        actor: actor.as_ref(),
        authorizer: &authorizer,
        records: &records,
        favorites: &favorites,
        news: &news,
    };
    action(&app.config, &ctx)
}

fn html_response(state: &State, result: Result<Vec<u8>, Error>) -> Response<Body> {
    match result {
        Ok(body) => create_response(state, StatusCode::OK, mime::TEXT_HTML_UTF_8, body),
        Err(err) => err.as_response(state),
    }
}

fn redirect(state: &State, to: &str) -> Result<Response<Body>, Error> {
    let location = HeaderValue::from_str(to).map_err(|err| Error::Inner(Box::new(err)))?;
    let mut response = create_empty_response(state, StatusCode::SEE_OTHER);
    response.headers_mut().insert(LOCATION, location);
    Ok(response)
}

/// Reads the whole request body, then runs `action` on it.
fn handle_form<F>(mut state: State, action: F) -> Box<HandlerFuture>
where
    F: FnOnce(&State, bytes::Bytes) -> Result<Response<Body>, Error> + Send + 'static,
{
    let f = hyper::Body::take_from(&mut state).concat2().then(
        move |body| -> Result<(State, Response<Body>), (State, HandlerError)> {
            match body {
                Ok(body) => {
                    let response = match action(&state, body.into_bytes()) {
                        Ok(response) => response,
                        Err(err) => err.as_response(&state),
                    };
                    Ok((state, response))
                }
                Err(err) => {
                    let response = Error::Inner(Box::new(err)).as_response(&state);
                    Ok((state, response))
                }
            }
        },
    );
    Box::new(f)
}

fn serve_index(state: State) -> (State, Response<Body>) {
    let response = html_response(&state, render_index(&state));
    (state, response)
}

fn render_index(state: &State) -> Result<Vec<u8>, Error> {
    let app = AppState::borrow_from(state);
    let conn = db::connect(&app.config.db_path)?;
    let trees = trees::all_trees(&conn)?;
    let mut buf = Vec::new();
    templates::index(&mut buf, &app.config.site_title, &trees)?;
    Ok(buf)
}

fn serve_stylesheet(state: State) -> (State, Response<Body>) {
    let response = create_response(
        &state,
        StatusCode::OK,
        mime::TEXT_CSS,
        templates::statics::style_css.content,
    );
    (state, response)
}

fn serve_tree_page(state: State) -> (State, Response<Body>) {
    let ged = TreePath::borrow_from(&state).ged.clone();
    let result = with_tree(&state, &ged, |config, ctx| {
        let blocks = module::tree_blocks()
            .iter()
            .enumerate()
            .map(|(block_id, block)| {
                block
                    .render_block(ctx, block_id as i32 + 1, TREE_PAGE_CTYPE)
                    .map(templates::Html)
            })
            .collect::<Result<Vec<_>, Error>>()?;
        let mut buf = Vec::new();
        templates::tree_page(&mut buf, &config.site_title, ctx.tree.title(), &blocks)?;
        Ok(buf)
    });
    let response = html_response(&state, result);
    (state, response)
}

/// A single block without its frame, for loading into an existing page.
fn serve_block(state: State) -> (State, Response<Body>) {
    let path = BlockPath::borrow_from(&state);
    let (ged, name) = (path.ged.clone(), path.module.clone());
    let block_id = BlockQuery::borrow_from(&state).block_id.unwrap_or(0);
    let result = with_tree(&state, &ged, |_, ctx| {
        let block = module::find_block(&name)?;
        Ok(block.render_block(ctx, block_id, "")?.into_bytes())
    });
    let response = html_response(&state, result);
    (state, response)
}

fn post_add_favorite(state: State) -> Box<HandlerFuture> {
    handle_form(state, |state, body| {
        let form = serde_urlencoded::from_bytes::<AddFavoriteForm>(&body)?;
        let ged = TreePath::borrow_from(state).ged.clone();
        let location = with_tree(state, &ged, |_, ctx| {
            favorites::add_favorite(ctx, &form)?;
            Ok(ctx.tree.url())
        })?;
        redirect(state, &location)
    })
}

fn post_delete_favorite(state: State) -> Box<HandlerFuture> {
    handle_form(state, |state, body| {
        let form = serde_urlencoded::from_bytes::<DeleteFavoriteForm>(&body)?;
        let ged = TreePath::borrow_from(state).ged.clone();
        let location = with_tree(state, &ged, |_, ctx| {
            favorites::delete_favorite(ctx, form.favorite_id())?;
            Ok(ctx.tree.url())
        })?;
        redirect(state, &location)
    })
}

fn serve_edit_news(state: State) -> (State, Response<Body>) {
    let ged = TreePath::borrow_from(&state).ged.clone();
    let news_id = EditNewsQuery::borrow_from(&state).news_id;
    let result = with_tree(&state, &ged, |config, ctx| {
        let draft = news::edit_form(ctx, news_id)?;
        let mut buf = Vec::new();
        templates::news_edit(
            &mut buf,
            &config.site_title,
            &ctx.tree.url(),
            "Add/edit a journal/news entry",
            draft.news_id,
            &draft.subject,
            &draft.body,
        )?;
        Ok(buf)
    });
    let response = html_response(&state, result);
    (state, response)
}

fn post_edit_news(state: State) -> Box<HandlerFuture> {
    handle_form(state, |state, body| {
        let form = serde_urlencoded::from_bytes::<EditNewsForm>(&body)?;
        let ged = TreePath::borrow_from(state).ged.clone();
        let location = with_tree(state, &ged, |_, ctx| {
            news::save_article(ctx, &form, Utc::now().naive_utc())?;
            Ok(ctx.tree.url())
        })?;
        redirect(state, &location)
    })
}

fn post_delete_news(state: State) -> Box<HandlerFuture> {
    handle_form(state, |state, body| {
        let form = serde_urlencoded::from_bytes::<DeleteNewsForm>(&body)?;
        let ged = TreePath::borrow_from(state).ged.clone();
        let location = with_tree(state, &ged, |_, ctx| {
            news::delete_article(ctx, form.news_id)?;
            Ok(ctx.tree.url())
        })?;
        redirect(state, &location)
    })
}
