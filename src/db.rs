use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use std::path::Path;

use crate::error::Error;

const SCHEMA: &str = include_str!("schema.sql");

pub fn connect(db_path: &Path) -> Result<SqliteConnection, Error> {
    let conn = SqliteConnection::establish(&format!("{}", db_path.display()))?;
    conn.batch_execute("PRAGMA foreign_keys = ON")?;
    Ok(conn)
}

/// Creates any missing tables. Safe to run against an existing database.
pub fn initialise(conn: &SqliteConnection) -> Result<(), Error> {
    conn.batch_execute(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
pub fn test_connection() -> SqliteConnection {
    let conn = SqliteConnection::establish(":memory:").unwrap();
    initialise(&conn).unwrap();
    conn
}
