//! Catalog storage: opening, schema upgrades and the launch reset.
//!
//! Nothing above this module reads or writes catalog rows before
//! [`open_catalog`] has finished the schema upgrade.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod reset;

pub use migrations::SchemaUpgrade;
pub use open::{open_catalog, open_db, open_db_in_memory};
pub use reset::{reset_session, ResetSummary};

pub type DbResult<T> = Result<T, DbError>;

/// Storage could not be opened, upgraded or reset.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The catalog file was written by a newer Shelfmark.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Stable `error_code` value for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == rusqlite::ErrorCode::CannotOpen =>
            {
                "storage_cannot_open"
            }
            Self::Sqlite(_) => "storage_sqlite",
            Self::UnsupportedSchemaVersion { .. } => "storage_schema_too_new",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "catalog file uses schema {db_version}, this build reads up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
