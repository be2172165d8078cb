//! # Database Error Types
//!
//! Error types for the persistence layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  SQLite Error (sqlx::Error)                                     │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  PersistenceError (this module) ← adds context/categorization   │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  LedgerError / AuthError ← operation-level wrappers             │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  Terminal front end renders a user-facing message               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence-layer errors, wrapping sqlx with extra context.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// `fetch_one` found no rows for the given id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// UNIQUE index violation, e.g. a duplicate invoice number
    /// or username.
    #[error("duplicate {field}: already exists")]
    UniqueViolation { field: String },

    /// FK violation: an order line or payment referencing a row
    /// that does not exist.
    #[error("foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database file could not be opened or created.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("migration failed: {0}")]
    MigrationFailed(String),

    #[error("query failed: {0}")]
    QueryFailed(String),

    /// All pool connections are in use.
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// A stored value failed to parse back into its domain type
    /// (timestamp, mode, payment method, role).
    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("internal database error: {0}")]
    Internal(String),
}

impl PersistenceError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        PersistenceError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound  → NotFound
/// sqlx::Error::Database     → message analysis for constraint type
/// sqlx::Error::PoolTimedOut → PoolExhausted
/// other                     → Internal
/// ```
impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => PersistenceError::NotFound {
                entity: "record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                //   "UNIQUE constraint failed: <table>.<column>"
                //   "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    PersistenceError::UniqueViolation { field }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    PersistenceError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    PersistenceError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => PersistenceError::PoolExhausted,

            sqlx::Error::PoolClosed => {
                PersistenceError::ConnectionFailed("pool is closed".to_string())
            }

            _ => PersistenceError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for PersistenceError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        PersistenceError::MigrationFailed(err.to_string())
    }
}

/// Result type for persistence operations.
pub type DbResult<T> = Result<T, PersistenceError>;

// =============================================================================
// Operation-Level Errors
// =============================================================================

/// Errors from the order ledger's submit path.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Submission rejected before any write: the final total was not
    /// strictly positive.
    #[error("empty order rejected (final total {final_total:.2})")]
    EmptyOrder { final_total: f64 },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        LedgerError::Persistence(err.into())
    }
}

/// Errors from the access gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The (username, password, role) triple matched no user. Which
    /// field mismatched is deliberately not reported.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] PersistenceError),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let err = PersistenceError::not_found("order", "42");
        assert_eq!(err.to_string(), "order not found: 42");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: PersistenceError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, PersistenceError::NotFound { .. }));
    }

    #[test]
    fn empty_order_message_carries_the_total() {
        let err = LedgerError::EmptyOrder { final_total: -8.5 };
        assert_eq!(err.to_string(), "empty order rejected (final total -8.50)");
    }

    #[test]
    fn auth_error_is_uninformative_on_purpose() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "invalid credentials");
    }
}
