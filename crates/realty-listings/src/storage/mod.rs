//! Document storage for properties and inquiries.
//!
//! Two backends share the repository traits defined next to each domain model:
//! a PostgreSQL-backed document store (one JSONB collection table per record kind)
//! and an in-memory store used by tests and the `--in-memory` serve mode.

pub mod memory;
pub mod postgres;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

pub use memory::{InMemoryInquiryRepository, InMemoryPropertyRepository};
pub use postgres::{Database, PgInquiryRepository, PgPropertyRepository};

/// Source of creation/mutation timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Failure talking to the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage rejected the configured credentials: {0}")]
    AuthenticationFailed(String),
    #[error("storage call exceeded {0:?}")]
    Timeout(Duration),
    #[error("stored document could not be decoded: {0}")]
    Corrupt(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Whether a client may reasonably retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_) | StorageError::Timeout(_))
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::Database(db) => {
                let code = db.code().map(|code| code.into_owned());
                match code {
                    // SQLSTATE class 28: invalid authorization specification.
                    Some(code) if code.starts_with("28") => {
                        StorageError::AuthenticationFailed(db.message().to_string())
                    }
                    _ => StorageError::Backend(db.message().to_string()),
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StorageError::Unavailable(value.to_string()),
            sqlx::Error::Decode(_)
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::TypeNotFound { .. } => StorageError::Corrupt(value.to_string()),
            other => StorageError::Backend(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(value: sqlx::migrate::MigrateError) -> Self {
        match value {
            sqlx::migrate::MigrateError::Execute(err) => StorageError::from(err),
            other => StorageError::Backend(other.to_string()),
        }
    }
}

/// Runs a storage future under `limit`, surfacing an elapsed deadline as [`StorageError::Timeout`].
pub async fn bounded<T, F>(limit: Duration, operation: F) -> Result<T, StorageError>
where
    F: Future<Output = Result<T, StorageError>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(StorageError::Timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bounded_passes_through_results() {
        let value = bounded(Duration::from_secs(1), async { Ok::<_, StorageError>(7) })
            .await
            .expect("completes in time");
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn bounded_reports_timeouts() {
        let err = bounded(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, StorageError>(())
        })
        .await
        .expect_err("deadline elapses");
        assert!(matches!(err, StorageError::Timeout(limit) if limit == Duration::from_millis(10)));
        assert!(err.is_retryable());
    }

    #[test]
    fn pool_exhaustion_is_unavailable() {
        let err = StorageError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn decode_failures_are_not_retryable() {
        let err = StorageError::from(sqlx::Error::ColumnNotFound("document".to_string()));
        assert!(matches!(err, StorageError::Corrupt(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn migration_failures_keep_driver_classification() {
        let err = StorageError::from(sqlx::migrate::MigrateError::Execute(
            sqlx::Error::PoolTimedOut,
        ));
        assert!(matches!(err, StorageError::Unavailable(_)));

        let err = StorageError::from(sqlx::migrate::MigrateError::VersionMissing(1));
        assert!(matches!(err, StorageError::Backend(_)));
        assert!(!err.is_retryable());
    }
}
