//! Catalog session: the single owner of the storage connection.
//!
//! # Responsibility
//! - Run Initialize: open storage, migrate, apply the reset policy.
//! - Hand out catalog, tag and loan services that borrow the connection.
//! - Release the connection on [`CatalogSession::close`] or drop.
//!
//! # Invariants
//! - Services never outlive the session that created them.
//! - A session that failed to initialize is never returned to callers.

use crate::config::CatalogConfig;
use crate::db::{open_catalog, reset_session, ResetSummary, SchemaUpgrade};
use crate::repo::error::RepoError;
use crate::repo::item_repo::SqliteItemRepository;
use crate::repo::loan_repo::SqliteLoanRepository;
use crate::repo::tag_repo::SqliteTagRepository;
use crate::service::catalog_service::CatalogService;
use crate::service::error::{report, CatalogError, CatalogResult};
use crate::service::loan_service::LoanService;
use crate::service::tag_service::TagService;
use log::{error, info};
use rusqlite::Connection;

/// Open catalog session.
pub struct CatalogSession {
    conn: Connection,
    config: CatalogConfig,
    reset: ResetSummary,
    schema: SchemaUpgrade,
}

impl CatalogSession {
    /// Opens storage and starts a fresh session.
    ///
    /// # Errors
    /// - [`CatalogError::StorageUnavailable`] when storage cannot be opened,
    ///   migrated or reset. No partial session is returned.
    pub fn initialize(config: CatalogConfig) -> CatalogResult<Self> {
        let (mut conn, schema) = open_catalog(&config.storage).map_err(|err| {
            error!(
                "event=session_init module=session status=error stage=open error_code={} error={err}",
                err.code()
            );
            CatalogError::StorageUnavailable(err)
        })?;

        let reset = reset_session(&mut conn, config.reset_policy).map_err(|err| {
            error!(
                "event=session_init module=session status=error stage=reset error_code={} error={err}",
                err.code()
            );
            CatalogError::StorageUnavailable(err)
        })?;

        info!(
            "event=session_init module=session status=ok reset_policy={} created_schema={}",
            config.reset_policy.as_str(),
            schema.created_schema()
        );
        Ok(Self {
            conn,
            config,
            reset,
            schema,
        })
    }

    /// Catalog store service bound to this session.
    pub fn catalog(&self) -> CatalogResult<CatalogService<SqliteItemRepository<'_>>> {
        let repo =
            SqliteItemRepository::try_new(&self.conn).map_err(|err| report("session_bind", err))?;
        Ok(CatalogService::new(repo))
    }

    /// Tag index service bound to this session.
    pub fn tags(&self) -> CatalogResult<TagService<SqliteTagRepository<'_>>> {
        let repo =
            SqliteTagRepository::try_new(&self.conn).map_err(|err| report("session_bind", err))?;
        Ok(TagService::new(repo))
    }

    /// Loan ledger service bound to this session.
    pub fn loans(&self) -> CatalogResult<LoanService<SqliteLoanRepository<'_>>> {
        let repo =
            SqliteLoanRepository::try_new(&self.conn).map_err(|err| report("session_bind", err))?;
        Ok(LoanService::new(repo))
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Rows cleared by the reset that started this session.
    pub fn reset_summary(&self) -> ResetSummary {
        self.reset
    }

    /// Schema versions found and left behind when storage was opened.
    pub fn schema_upgrade(&self) -> SchemaUpgrade {
        self.schema
    }

    /// Raw connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the underlying connection, surfacing close errors.
    pub fn close(self) -> CatalogResult<()> {
        match self.conn.close() {
            Ok(()) => {
                info!("event=session_close module=session status=ok");
                Ok(())
            }
            Err((_conn, err)) => Err(report("session_close", RepoError::from(err))),
        }
    }
}
