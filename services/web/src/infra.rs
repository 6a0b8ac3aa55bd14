use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use realty_listings::config::StorageConfig;
use realty_listings::error::AppError;
use realty_listings::inquiries::{InquiryIntake, InquiryRepository};
use realty_listings::listings::{PropertyCatalog, PropertyRepository};
use realty_listings::storage::{Database, InMemoryInquiryRepository, InMemoryPropertyRepository};
use tracing::info;

/// Shared by every page handler.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) catalog: PropertyCatalog,
    pub(crate) intake: InquiryIntake,
    pub(crate) public_dir: Arc<PathBuf>,
}

/// Probe state layered onto the router as an extension.
#[derive(Clone)]
pub(crate) struct Observability {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The storage backend behind the catalog and intake, plus the handle to close at shutdown.
pub(crate) struct Backend {
    pub(crate) catalog: PropertyCatalog,
    pub(crate) intake: InquiryIntake,
    database: Option<Database>,
}

impl Backend {
    pub(crate) fn in_memory(config: &StorageConfig) -> Self {
        let properties: Arc<dyn PropertyRepository> =
            Arc::new(InMemoryPropertyRepository::default());
        let inquiries: Arc<dyn InquiryRepository> = Arc::new(InMemoryInquiryRepository::default());
        info!("using in-memory storage; listings are lost on exit");
        Self::assemble(properties, inquiries, None, config)
    }

    pub(crate) async fn connect(config: &StorageConfig) -> Result<Self, AppError> {
        let database_url = config.require_database_url()?;
        let database = Database::connect(database_url, config).await?;
        database.migrate().await?;
        info!("database connected");

        let properties: Arc<dyn PropertyRepository> = Arc::new(database.properties());
        let inquiries: Arc<dyn InquiryRepository> = Arc::new(database.inquiries());
        Ok(Self::assemble(properties, inquiries, Some(database), config))
    }

    fn assemble(
        properties: Arc<dyn PropertyRepository>,
        inquiries: Arc<dyn InquiryRepository>,
        database: Option<Database>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            catalog: PropertyCatalog::new(properties).with_timeout(config.request_timeout),
            intake: InquiryIntake::new(inquiries).with_timeout(config.request_timeout),
            database,
        }
    }

    pub(crate) fn state(&self, public_dir: PathBuf) -> AppState {
        AppState {
            catalog: self.catalog.clone(),
            intake: self.intake.clone(),
            public_dir: Arc::new(public_dir),
        }
    }

    pub(crate) async fn close(self) {
        if let Some(database) = self.database {
            database.close().await;
        }
    }
}
