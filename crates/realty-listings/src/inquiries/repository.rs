use async_trait::async_trait;

use super::domain::{Inquiry, InquiryId, NewInquiry};
use crate::listings::PropertyId;
use crate::storage::StorageError;

/// Storage abstraction for the `inquiries` collection.
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    async fn insert(&self, inquiry: NewInquiry) -> Result<Inquiry, StorageError>;
    async fn fetch(&self, id: InquiryId) -> Result<Option<Inquiry>, StorageError>;
    /// Inquiries referencing `property`, newest first. The property itself may no longer exist.
    async fn list_for_property(&self, property: PropertyId) -> Result<Vec<Inquiry>, StorageError>;
}
