//! Who is acting, and what they may do to a tree.
//!
//! Identity comes from the `X-Remote-User` header set by the fronting proxy
//! that performs authentication. An absent header, or a name with no matching
//! user row, means the request is anonymous.

use diesel::prelude::*;

use crate::error::Error;
use crate::models::{Tree, User};
use crate::schema::{user, user_gedcom_setting, user_setting};

pub const REMOTE_USER_HEADER: &str = "x-remote-user";

pub trait Authorizer {
    /// Whether `actor` may change tree-level configuration, favorites and news.
    fn is_manager(&self, tree: &Tree, actor: Option<&User>) -> Result<bool, Error>;
}

pub struct SqliteAuthorizer<'a> {
    conn: &'a SqliteConnection,
}

impl<'a> SqliteAuthorizer<'a> {
    pub fn new(conn: &'a SqliteConnection) -> Self {
        SqliteAuthorizer { conn }
    }

    fn is_admin(&self, actor: &User) -> Result<bool, Error> {
        let value = user_setting::table
            .filter(user_setting::user_id.eq(actor.user_id))
            .filter(user_setting::setting_name.eq("canadmin"))
            .select(user_setting::setting_value)
            .first::<String>(self.conn)
            .optional()?;
        Ok(value.as_ref().map(String::as_str) == Some("1"))
    }
}

impl<'a> Authorizer for SqliteAuthorizer<'a> {
    fn is_manager(&self, tree: &Tree, actor: Option<&User>) -> Result<bool, Error> {
        let actor = match actor {
            Some(actor) => actor,
            None => return Ok(false),
        };
        if self.is_admin(actor)? {
            return Ok(true);
        }
        let access = user_gedcom_setting::table
            .filter(user_gedcom_setting::user_id.eq(actor.user_id))
            .filter(user_gedcom_setting::gedcom_id.eq(tree.id()))
            .filter(user_gedcom_setting::setting_name.eq("canedit"))
            .select(user_gedcom_setting::setting_value)
            .first::<String>(self.conn)
            .optional()?;
        Ok(access.as_ref().map(String::as_str) == Some("admin"))
    }
}

pub fn find_user(conn: &SqliteConnection, name: &str) -> Result<Option<User>, Error> {
    Ok(user::table
        .filter(user::user_name.eq(name))
        .first::<User>(conn)
        .optional()?)
}

pub fn create_user(
    conn: &SqliteConnection,
    name: &str,
    real_name: &str,
    admin: bool,
) -> Result<User, Error> {
    diesel::insert_into(user::table)
        .values((user::user_name.eq(name), user::real_name.eq(real_name)))
        .execute(conn)?;
    let created = find_user(conn, name)?.ok_or_else(|| Error::UserNotFound(name.to_owned()))?;
    if admin {
        diesel::replace_into(user_setting::table)
            .values((
                user_setting::user_id.eq(created.user_id),
                user_setting::setting_name.eq("canadmin"),
                user_setting::setting_value.eq("1"),
            ))
            .execute(conn)?;
    }
    log::info!("Created user {} (administrator: {})", name, admin);
    Ok(created)
}

pub fn grant_manager(conn: &SqliteConnection, actor: &User, tree: &Tree) -> Result<(), Error> {
    diesel::replace_into(user_gedcom_setting::table)
        .values((
            user_gedcom_setting::user_id.eq(actor.user_id),
            user_gedcom_setting::gedcom_id.eq(tree.id()),
            user_gedcom_setting::setting_name.eq("canedit"),
            user_gedcom_setting::setting_value.eq("admin"),
        ))
        .execute(conn)?;
    log::info!("Granted {} manager rights on {}", actor.user_name, tree.name());
    Ok(())
}
