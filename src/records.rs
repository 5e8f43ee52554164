use diesel::prelude::*;
use serde_derive::Serialize;

use crate::error::Error;
use crate::models::Tree;
use crate::schema::record::dsl;

/// A genealogical record (individual, family, source, ...) as seen by the
/// blocks: enough to link to it and decide whether it may be shown.
#[derive(Clone, Debug, PartialEq, Queryable, Serialize)]
pub struct Record {
    pub gedcom_id: i32,
    pub xref: String,
    pub record_type: String,
    pub name: String,
    pub restricted: bool,
}

impl Record {
    pub fn can_show(&self) -> bool {
        !self.restricted
    }

    pub fn full_name(&self) -> &str {
        if self.name.is_empty() {
            &self.xref
        } else {
            &self.name
        }
    }
}

pub trait RecordRepository {
    fn resolve(&self, tree: &Tree, xref: &str) -> Result<Option<Record>, Error>;
}

pub struct SqliteRecords<'a> {
    conn: &'a SqliteConnection,
}

impl<'a> SqliteRecords<'a> {
    pub fn new(conn: &'a SqliteConnection) -> Self {
        SqliteRecords { conn }
    }

    pub fn insert(
        &self,
        tree: &Tree,
        xref: &str,
        record_type: &str,
        name: &str,
        restricted: bool,
    ) -> Result<(), Error> {
        diesel::replace_into(dsl::record)
            .values((
                dsl::gedcom_id.eq(tree.id()),
                dsl::xref.eq(xref),
                dsl::record_type.eq(record_type),
                dsl::name.eq(name),
                dsl::restricted.eq(restricted),
            ))
            .execute(self.conn)?;
        Ok(())
    }
}

impl<'a> RecordRepository for SqliteRecords<'a> {
    fn resolve(&self, tree: &Tree, xref: &str) -> Result<Option<Record>, Error> {
        if xref.is_empty() {
            return Ok(None);
        }
        Ok(dsl::record
            .filter(dsl::gedcom_id.eq(tree.id()))
            .filter(dsl::xref.eq(xref))
            .first::<Record>(self.conn)
            .optional()?)
    }
}

/// Adds or replaces a record in the named tree, for loading data from the
/// command line.
pub fn add_record(
    conn: &SqliteConnection,
    tree_name: &str,
    xref: &str,
    record_type: &str,
    name: &str,
    restricted: bool,
) -> Result<Record, Error> {
    let tree = crate::trees::find_tree(conn, tree_name)?;
    let records = SqliteRecords::new(conn);
    records.insert(&tree, xref, record_type, name, restricted)?;
    log::info!("Saved record {} in {}", xref, tree.name());
    records
        .resolve(&tree, xref)?
        .ok_or(Error::Database(diesel::result::Error::NotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;
    use crate::trees::create_tree;

    #[test]
    fn resolves_records_within_their_tree_only() {
        let conn = test_connection();
        let tree_a = create_tree(&conn, "a", "").unwrap();
        let tree_b = create_tree(&conn, "b", "").unwrap();
        let records = SqliteRecords::new(&conn);
        records.insert(&tree_a, "I1", "INDI", "John Smith", false).unwrap();

        let found = records.resolve(&tree_a, "I1").unwrap().unwrap();
        assert_eq!(found.record_type, "INDI");
        assert_eq!(found.full_name(), "John Smith");
        assert!(found.can_show());

        assert!(records.resolve(&tree_b, "I1").unwrap().is_none());
        assert!(records.resolve(&tree_a, "").unwrap().is_none());
    }

    #[test]
    fn restricted_records_cannot_be_shown() {
        let conn = test_connection();
        let tree = create_tree(&conn, "a", "").unwrap();
        let records = SqliteRecords::new(&conn);
        records.insert(&tree, "I2", "INDI", "", true).unwrap();

        let found = records.resolve(&tree, "I2").unwrap().unwrap();
        assert!(!found.can_show());
        assert_eq!(found.full_name(), "I2");
    }

    #[test]
    fn add_record_replaces_by_xref() {
        let conn = test_connection();
        create_tree(&conn, "demo", "").unwrap();

        add_record(&conn, "demo", "I1", "INDI", "John Smith", false).unwrap();
        let replaced = add_record(&conn, "demo", "I1", "INDI", "John Smyth", true).unwrap();
        assert_eq!(replaced.full_name(), "John Smyth");
        assert!(!replaced.can_show());

        match add_record(&conn, "nope", "I1", "INDI", "", false) {
            Err(Error::TreeNotFound(name)) => assert_eq!(name, "nope"),
            other => panic!("Expected TreeNotFound, got {:?}", other),
        }
    }
}
