//! Catalog session configuration.
//!
//! # Responsibility
//! - Describe where the catalog lives and what a new session clears.
//!
//! # Invariants
//! - Defaults reproduce the launch behavior: `shelfmark.db` in the working
//!   directory and a full reset of items, tags and loans.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default catalog file name used when no path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "shelfmark.db";

/// Where catalog data is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum StorageLocation {
    /// SQLite file at the given path.
    File(PathBuf),
    /// Process-local in-memory database; nothing survives the session.
    Memory,
}

impl Default for StorageLocation {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_DB_FILE_NAME))
    }
}

/// Which prior-session data Initialize clears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Clear items, tags and loans.
    #[default]
    ClearAll,
    /// Clear items and tags; keep loan history with detached item ids.
    KeepLoans,
}

impl ResetPolicy {
    /// Stable name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClearAll => "clear_all",
            Self::KeepLoans => "keep_loans",
        }
    }
}

/// Configuration consumed by [`crate::session::CatalogSession::initialize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub storage: StorageLocation,
    pub reset_policy: ResetPolicy,
}

impl CatalogConfig {
    /// File-backed configuration with the default reset policy.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageLocation::File(path.into()),
            ..Self::default()
        }
    }

    /// In-memory configuration, mostly useful for tests and demos.
    pub fn in_memory() -> Self {
        Self {
            storage: StorageLocation::Memory,
            ..Self::default()
        }
    }

    /// Returns a copy with a different reset policy.
    pub fn with_reset_policy(mut self, reset_policy: ResetPolicy) -> Self {
        self.reset_policy = reset_policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogConfig, ResetPolicy, StorageLocation, DEFAULT_DB_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn default_config_points_at_local_file_and_clears_everything() {
        let config = CatalogConfig::default();
        assert_eq!(
            config.storage,
            StorageLocation::File(PathBuf::from(DEFAULT_DB_FILE_NAME))
        );
        assert_eq!(config.reset_policy, ResetPolicy::ClearAll);
    }

    #[test]
    fn with_reset_policy_keeps_storage() {
        let config = CatalogConfig::in_memory().with_reset_policy(ResetPolicy::KeepLoans);
        assert_eq!(config.storage, StorageLocation::Memory);
        assert_eq!(config.reset_policy.as_str(), "keep_loans");
    }
}
