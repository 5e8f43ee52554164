use diesel::prelude::*;

use crate::error::Error;
use crate::models::Tree;
use crate::schema::gedcom::dsl;

pub fn find_tree(conn: &SqliteConnection, name: &str) -> Result<Tree, Error> {
    dsl::gedcom
        .filter(dsl::gedcom_name.eq(name))
        .first::<Tree>(conn)
        .map_err(|err| match err {
            diesel::result::Error::NotFound => Error::TreeNotFound(name.to_owned()),
            err => Error::Database(err),
        })
}

pub fn all_trees(conn: &SqliteConnection) -> Result<Vec<Tree>, Error> {
    Ok(dsl::gedcom.order(dsl::gedcom_name.asc()).load::<Tree>(conn)?)
}

pub fn create_tree(conn: &SqliteConnection, name: &str, title: &str) -> Result<Tree, Error> {
    diesel::insert_into(dsl::gedcom)
        .values((dsl::gedcom_name.eq(name), dsl::title.eq(title)))
        .execute(conn)?;
    log::info!("Created family tree {}", name);
    find_tree(conn, name)
}
