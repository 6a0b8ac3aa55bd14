use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::domain::{Inquiry, InquirySubmission, NewInquiry};
use super::repository::InquiryRepository;
use crate::storage::{bounded, StorageError};
use crate::validation::ValidationError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Records buyer interest in a property.
///
/// The intake does not check that the referenced property exists; callers that need
/// that guarantee look the property up through the catalog first.
pub struct InquiryIntake<R: ?Sized = dyn InquiryRepository> {
    repository: Arc<R>,
    timeout: Duration,
}

impl<R: ?Sized> Clone for InquiryIntake<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            timeout: self.timeout,
        }
    }
}

impl<R> InquiryIntake<R>
where
    R: InquiryRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates and stores an inquiry for the property identified by `property`.
    pub async fn create(
        &self,
        property: &str,
        submission: InquirySubmission,
    ) -> Result<Inquiry, IntakeError> {
        let inquiry = NewInquiry::from_submission(property, submission)?;
        let stored = bounded(self.timeout, self.repository.insert(inquiry))
            .await
            .inspect_err(|err| warn!(error = %err, "inquiry insert failed"))?;

        info!(inquiry = %stored.id, property = %stored.property, "recorded inquiry");
        Ok(stored)
    }
}

/// Error raised by the inquiry intake.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
