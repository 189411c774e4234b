//! Core catalog logic for Shelfmark.
//! This crate is the single source of truth for catalog, tag and loan
//! invariants; presentation layers only call into it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use config::{CatalogConfig, ResetPolicy, StorageLocation};
pub use db::SchemaUpgrade;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::item::{Item, ItemId, NewItem};
pub use model::loan::{Loan, LoanId, LoanStatus};
pub use model::tag::{Tag, TagId};
pub use model::text::ValidationError;
pub use repo::error::{Conflict, Missing, RepoError, RepoResult};
pub use repo::item_repo::{ItemRepository, SqliteItemRepository};
pub use repo::loan_repo::{LoanRepository, SqliteLoanRepository};
pub use repo::tag_repo::{SqliteTagRepository, TagRepository};
pub use service::catalog_service::CatalogService;
pub use service::error::{CatalogError, CatalogResult, ListingExt};
pub use service::loan_service::LoanService;
pub use service::tag_service::TagService;
pub use session::CatalogSession;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
