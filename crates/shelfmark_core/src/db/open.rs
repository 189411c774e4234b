//! Connection bootstrap for catalog storage.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout.
//! - Returned connections carry the latest catalog schema.

use super::migrations::{apply_migrations, SchemaUpgrade};
use super::{DbError, DbResult};
use crate::config::StorageLocation;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the configured catalog storage and upgrades its schema.
///
/// A catalog file is created when it does not exist yet.
///
/// # Side effects
/// - Emits `db_open` events with mode, duration and schema versions.
pub fn open_catalog(storage: &StorageLocation) -> DbResult<(Connection, SchemaUpgrade)> {
    match storage {
        StorageLocation::File(path) => open_with("file", || Connection::open(path)),
        StorageLocation::Memory => open_with("memory", Connection::open_in_memory),
    }
}

/// Opens a catalog file, discarding the upgrade report.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path)).map(|(conn, _)| conn)
}

/// Opens a private in-memory catalog.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory).map(|(conn, _)| conn)
}

fn open_with(
    mode: &'static str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<(Connection, SchemaUpgrade)> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let opened = open().map_err(DbError::from).and_then(|mut conn| {
        let upgrade = bootstrap_connection(&mut conn)?;
        Ok((conn, upgrade))
    });

    match &opened {
        Ok((_, upgrade)) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={} schema_from={} schema_to={}",
            started_at.elapsed().as_millis(),
            upgrade.from_version,
            upgrade.to_version
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            err.code(),
            err
        ),
    }
    opened
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<SchemaUpgrade> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
