use crate::types::Entity;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Step of client initialization that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStage {
    /// Opening the connection pool
    Connect,
    /// Liveness check against a freshly opened pool
    Ping,
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStage::Connect => f.write_str("connect"),
            InitStage::Ping => f.write_str("ping"),
        }
    }
}

/// Unified error type for database operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// The backend could not be opened or did not answer the liveness check.
    /// Startup code is expected to treat this as fatal.
    #[error("database initialization failed at {stage}: {source}")]
    InitializationFailure {
        stage: InitStage,
        #[source]
        source: sqlx::Error,
    },

    /// Backend identifier not recognised by the client factory
    #[error("unsupported database backend '{name}'")]
    UnsupportedBackend { name: String },

    /// A keyed lookup matched zero rows
    #[error("{entity} '{key}' not found")]
    NotFound { entity: Entity, key: String },

    /// Insert, update or delete rejected by the driver or backend
    #[error("failed to {operation}: {source}")]
    Write {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Select rejected by the driver or backend
    #[error("failed to {operation}: {source}")]
    Read {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// More than one row where a key lookup expects exactly one
    #[error("expected a single {entity} for '{key}', found {rows} rows")]
    DataIntegrity { entity: Entity, key: String, rows: usize },

    /// Operation exceeded its per-call deadline and was cancelled
    #[error("{operation} did not complete within {after:?}")]
    Timeout { operation: &'static str, after: Duration },
}

impl DbError {
    /// Adapter for `map_err` on write statements.
    pub(crate) fn write(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DbError {
        move |source| DbError::Write { operation, source }
    }

    /// Adapter for `map_err` on select statements.
    pub(crate) fn read(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DbError {
        move |source| DbError::Read { operation, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }

    /// True when a write was rejected by a unique constraint, e.g. a duplicate user name.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::Write {
                source: sqlx::Error::Database(db_err),
                ..
            } => db_err.is_unique_violation(),
            _ => false,
        }
    }
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity_and_key() {
        let err = DbError::NotFound {
            entity: Entity::User,
            key: "alice".to_string(),
        };
        assert_eq!(err.to_string(), "user 'alice' not found");
        assert!(err.is_not_found());
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn test_write_adapter_keeps_operation() {
        let err = DbError::write("create user")(sqlx::Error::PoolTimedOut);
        match &err {
            DbError::Write { operation, source } => {
                assert_eq!(*operation, "create user");
                assert!(matches!(source, sqlx::Error::PoolTimedOut));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("failed to create user"));
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn test_initialization_failure_reports_stage() {
        let err = DbError::InitializationFailure {
            stage: InitStage::Ping,
            source: sqlx::Error::PoolClosed,
        };
        assert!(err.to_string().starts_with("database initialization failed at ping"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_data_integrity_message() {
        let err = DbError::DataIntegrity {
            entity: Entity::Server,
            key: "7".to_string(),
            rows: 2,
        };
        assert_eq!(err.to_string(), "expected a single server for '7', found 2 rows");
    }
}
