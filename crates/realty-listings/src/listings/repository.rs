use async_trait::async_trait;

use super::domain::{Property, PropertyDetails, PropertyId};
use crate::storage::StorageError;

/// Storage abstraction so the catalog can be exercised without a database.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Every stored property, most recently created first.
    async fn list_newest_first(&self) -> Result<Vec<Property>, StorageError>;
    async fn fetch(&self, id: PropertyId) -> Result<Option<Property>, StorageError>;
    /// Stores a new record; the repository assigns the id and both timestamps.
    async fn insert(&self, details: PropertyDetails) -> Result<Property, StorageError>;
    /// Removes every property, returning how many were deleted.
    async fn clear(&self) -> Result<u64, StorageError>;
}

