//! Catalog schema registry.
//!
//! # Invariants
//! - Versions start at 1 and increase by exactly one per script.
//! - The applied version is mirrored to `PRAGMA user_version`.
//! - Scripts use `IF NOT EXISTS`, so replaying one on an existing schema is
//!   harmless.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_catalog.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_loans.sql"),
    },
];

/// Schema versions observed while opening a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaUpgrade {
    pub from_version: u32,
    pub to_version: u32,
}

impl SchemaUpgrade {
    /// The storage held no catalog schema before this open.
    pub fn created_schema(&self) -> bool {
        self.from_version == 0
    }

    pub fn is_noop(&self) -> bool {
        self.from_version == self.to_version
    }
}

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the catalog schema up to [`latest_version`] in one transaction.
///
/// # Errors
/// - [`DbError::UnsupportedSchemaVersion`] when the file was written by a
///   newer binary.
/// - [`DbError::Sqlite`] when a script fails; nothing is applied.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<SchemaUpgrade> {
    let from_version = stored_schema_version(conn)?;
    let to_version = latest_version();

    if from_version > to_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: to_version,
        });
    }

    let upgrade = SchemaUpgrade {
        from_version,
        to_version,
    };
    if upgrade.is_noop() {
        return Ok(upgrade);
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > from_version) {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(upgrade)
}

/// Reads the catalog schema version stored in `PRAGMA user_version`.
pub fn stored_schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version, SchemaUpgrade, MIGRATIONS};
    use rusqlite::Connection;

    #[test]
    fn versions_are_contiguous_from_one() {
        for (index, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, index + 1);
        }
        assert_eq!(latest_version() as usize, MIGRATIONS.len());
    }

    #[test]
    fn partially_migrated_file_only_runs_newer_scripts() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(MIGRATIONS[0].sql).unwrap();
        conn.execute_batch("PRAGMA user_version = 1;").unwrap();

        let upgrade = apply_migrations(&mut conn).unwrap();
        assert_eq!(
            upgrade,
            SchemaUpgrade {
                from_version: 1,
                to_version: latest_version()
            }
        );
        assert!(!upgrade.created_schema());

        let again = apply_migrations(&mut conn).unwrap();
        assert!(again.is_noop());
    }
}
