//! Data-access error taxonomy.

use std::time::Duration;

use thiserror::Error;

use fleetreg_auth::PasswordError;
use fleetreg_core::DomainError;

pub use sqlx::Error as SqlxError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a data-access operation.
///
/// Variants are kept distinct so callers can pick a transport status without
/// inspecting message text.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller-supplied input was malformed (e.g. an unparsable birth date).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A car referenced an owner that does not exist.
    #[error("there is no user with id={owner_id}")]
    Reference { owner_id: i64 },

    /// Lookup by id matched no row.
    #[error("{entity} with id={id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The liveness probe failed before the main query ran.
    #[error("database connection unavailable: {0}")]
    Connection(#[source] sqlx::Error),

    /// The operation exceeded its deadline.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// Constraint violation or any other storage failure.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Password hashing failed before the row could be written.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// True for UNIQUE / FOREIGN KEY / CHECK violations reported by the engine.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Storage(sqlx::Error::Database(db)) => {
                db.is_unique_violation() || db.is_foreign_key_violation() || db.is_check_violation()
            }
            _ => false,
        }
    }

    /// Errors caused by the caller rather than the storage engine.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Reference { .. } | Self::NotFound { .. }
        )
    }
}

impl From<DomainError> for StoreError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => Self::Validation(msg),
        }
    }
}

impl From<PasswordError> for StoreError {
    fn from(value: PasswordError) -> Self {
        match value {
            PasswordError::Empty => Self::Validation(value.to_string()),
            other => Self::Hashing(other.to_string()),
        }
    }
}
