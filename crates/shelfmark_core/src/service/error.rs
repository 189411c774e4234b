//! Catalog error taxonomy exposed to callers.
//!
//! # Invariants
//! - Only [`CatalogError::StorageUnavailable`] ends a session; every other
//!   variant is local to the failing operation and leaves state untouched.

use crate::db::DbError;
use crate::model::text::ValidationError;
use crate::repo::error::{Conflict, Missing, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error returned by catalog, tag and loan use-cases.
#[derive(Debug)]
pub enum CatalogError {
    /// Storage could not be opened or initialized.
    StorageUnavailable(DbError),
    /// Referenced item or loan does not exist.
    NotFound(Missing),
    /// Duplicate tag or overlapping open loan.
    Conflict(Conflict),
    /// Required text input is blank.
    Invalid(ValidationError),
    /// A read or write failed on a live connection.
    StorageOperationFailed(RepoError),
}

impl CatalogError {
    /// Whether the session can keep serving requests after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::StorageUnavailable(_))
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Invalid(_) => "invalid_input",
            Self::StorageOperationFailed(_) => "storage_operation_failed",
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "catalog storage unavailable: {err}"),
            Self::NotFound(missing) => write!(f, "{missing}"),
            Self::Conflict(conflict) => write!(f, "{conflict}"),
            Self::Invalid(err) => write!(f, "invalid input: {err}"),
            Self::StorageOperationFailed(err) => write!(f, "catalog operation failed: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::Invalid(err) => Some(err),
            Self::StorageOperationFailed(err) => Some(err),
            Self::NotFound(_) | Self::Conflict(_) => None,
        }
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Invalid(err),
            RepoError::NotFound(missing) => Self::NotFound(missing),
            RepoError::Conflict(conflict) => Self::Conflict(conflict),
            other => Self::StorageOperationFailed(other),
        }
    }
}

impl From<DbError> for CatalogError {
    fn from(value: DbError) -> Self {
        Self::StorageUnavailable(value)
    }
}

impl From<ValidationError> for CatalogError {
    fn from(value: ValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Recovery for listing operations: a failed read yields no rows.
pub trait ListingExt<T> {
    /// Splits a listing result into its rows and the error that emptied it.
    fn or_empty(self) -> (Vec<T>, Option<CatalogError>);
}

impl<T> ListingExt<T> for CatalogResult<Vec<T>> {
    fn or_empty(self) -> (Vec<T>, Option<CatalogError>) {
        match self {
            Ok(rows) => (rows, None),
            Err(err) => (Vec::new(), Some(err)),
        }
    }
}

/// Converts a repository error and logs it under `event`.
pub(crate) fn report(event: &'static str, err: RepoError) -> CatalogError {
    let err = CatalogError::from(err);
    match err {
        CatalogError::NotFound(_) | CatalogError::Conflict(_) | CatalogError::Invalid(_) => {
            info!(
                "event={event} module=service status=rejected error_code={}",
                err.code()
            );
        }
        _ => {
            error!(
                "event={event} module=service status=error error_code={} error={}",
                err.code(),
                err
            );
        }
    }
    err
}
