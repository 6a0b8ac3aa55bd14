use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::domain::{Property, PropertyDetails, PropertyId};
use super::repository::PropertyRepository;
use crate::storage::{bounded, StorageError};
use crate::validation::ValidationError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Lists and retrieves property records for the page layer.
pub struct PropertyCatalog<R: ?Sized = dyn PropertyRepository> {
    repository: Arc<R>,
    timeout: Duration,
}

impl<R: ?Sized> Clone for PropertyCatalog<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            timeout: self.timeout,
        }
    }
}

impl<R> PropertyCatalog<R>
where
    R: PropertyRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bounds every storage call made by this catalog.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// All properties, newest first. No pagination.
    pub async fn list_all(&self) -> Result<Vec<Property>, CatalogError> {
        let mut properties = bounded(self.timeout, self.repository.list_newest_first())
            .await
            .inspect_err(|err| warn!(error = %err, "property listing failed"))?;

        // Backends already order by creation time; this pins ties to the newest id.
        properties.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        debug!(count = properties.len(), "listed properties");
        Ok(properties)
    }

    /// Looks up a single property from a raw path segment.
    ///
    /// A malformed identifier is reported as [`CatalogError::NotFound`], the same as an
    /// identifier that was never assigned.
    pub async fn get_by_id(&self, raw_id: &str) -> Result<Property, CatalogError> {
        let id = match PropertyId::parse(raw_id) {
            Ok(id) => id,
            Err(err) => {
                debug!(%err, "rejecting malformed property id");
                return Err(CatalogError::NotFound {
                    id: raw_id.to_string(),
                });
            }
        };

        bounded(self.timeout, self.repository.fetch(id))
            .await
            .inspect_err(|err| warn!(error = %err, %id, "property lookup failed"))?
            .ok_or_else(|| CatalogError::NotFound {
                id: raw_id.to_string(),
            })
    }

    /// Validates and stores a new listing. Not reachable over HTTP; used by seeding.
    pub async fn publish(&self, details: PropertyDetails) -> Result<Property, CatalogError> {
        let details = details.validated()?;
        let property = bounded(self.timeout, self.repository.insert(details)).await?;
        debug!(id = %property.id, title = %property.details.title, "published property");
        Ok(property)
    }

    /// Removes every listing, returning the number deleted.
    pub async fn clear(&self) -> Result<u64, CatalogError> {
        Ok(bounded(self.timeout, self.repository.clear()).await?)
    }
}

/// Error raised by the property catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("property '{id}' not found")]
    NotFound { id: String },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryPropertyRepository;
    use async_trait::async_trait;

    struct UnavailableRepository;

    #[async_trait]
    impl PropertyRepository for UnavailableRepository {
        async fn list_newest_first(&self) -> Result<Vec<Property>, StorageError> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn fetch(&self, _id: PropertyId) -> Result<Option<Property>, StorageError> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn insert(&self, _details: PropertyDetails) -> Result<Property, StorageError> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }

        async fn clear(&self) -> Result<u64, StorageError> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }
    }

    struct StalledRepository;

    #[async_trait]
    impl PropertyRepository for StalledRepository {
        async fn list_newest_first(&self) -> Result<Vec<Property>, StorageError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Vec::new())
        }

        async fn fetch(&self, _id: PropertyId) -> Result<Option<Property>, StorageError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(None)
        }

        async fn insert(&self, _details: PropertyDetails) -> Result<Property, StorageError> {
            Err(StorageError::Backend("read only".to_string()))
        }

        async fn clear(&self) -> Result<u64, StorageError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn empty_catalog_lists_nothing_and_finds_nothing() {
        let catalog = PropertyCatalog::new(Arc::new(InMemoryPropertyRepository::default()));

        assert!(catalog.list_all().await.expect("list succeeds").is_empty());

        let err = catalog
            .get_by_id(&PropertyId::generate().to_string())
            .await
            .expect_err("nothing stored");
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[tokio::test]
    async fn storage_failures_propagate_unchanged() {
        let catalog = PropertyCatalog::new(Arc::new(UnavailableRepository));

        let err = catalog.list_all().await.expect_err("storage down");
        assert!(matches!(
            err,
            CatalogError::Storage(StorageError::Unavailable(_))
        ));

        let err = catalog
            .get_by_id(&PropertyId::generate().to_string())
            .await
            .expect_err("storage down");
        assert!(matches!(
            err,
            CatalogError::Storage(StorageError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn malformed_id_never_reaches_storage() {
        let catalog = PropertyCatalog::new(Arc::new(UnavailableRepository));

        let err = catalog
            .get_by_id("definitely-not-an-id")
            .await
            .expect_err("malformed id");
        match err {
            CatalogError::NotFound { id } => assert_eq!(id, "definitely-not-an-id"),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_storage_times_out() {
        let catalog = PropertyCatalog::new(Arc::new(StalledRepository))
            .with_timeout(Duration::from_millis(20));

        let err = catalog.list_all().await.expect_err("deadline elapses");
        assert!(matches!(err, CatalogError::Storage(StorageError::Timeout(_))));
    }

    #[tokio::test]
    async fn publish_rejects_invalid_listings() {
        let repository = Arc::new(InMemoryPropertyRepository::default());
        let catalog = PropertyCatalog::new(Arc::clone(&repository));

        let err = catalog
            .publish(PropertyDetails {
                title: String::new(),
                sq_ft: 900.0,
                price_per_sq_ft: 5000.0,
                owner_name: "Owner".to_string(),
                broker_name: "Broker".to_string(),
                broker_phone: "555-0100".to_string(),
                address: String::new(),
                description: String::new(),
                cover_image_url: String::new(),
            })
            .await
            .expect_err("title required");
        assert!(matches!(
            err,
            CatalogError::Invalid(ValidationError::Missing { field: "title" })
        ));
        assert!(catalog.list_all().await.expect("list succeeds").is_empty());
    }
}
