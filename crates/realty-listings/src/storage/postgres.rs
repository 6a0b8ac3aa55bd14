use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{query, query_as, PgPool};
use tracing::info;
use uuid::Uuid;

use super::StorageError;
use crate::config::StorageConfig;
use crate::inquiries::{Inquiry, InquiryId, InquiryRepository, NewInquiry};
use crate::listings::{Property, PropertyDetails, PropertyId, PropertyRepository};

const LIST_PROPERTIES_SQL: &str = "SELECT id, created_at, updated_at, document FROM properties \
     ORDER BY created_at DESC, id DESC";
const GET_PROPERTY_SQL: &str =
    "SELECT id, created_at, updated_at, document FROM properties WHERE id = $1";
const INSERT_PROPERTY_SQL: &str = "INSERT INTO properties (id, created_at, updated_at, document) \
     VALUES ($1, now(), now(), $2) RETURNING created_at, updated_at";
const CLEAR_PROPERTIES_SQL: &str = "DELETE FROM properties";

const GET_INQUIRY_SQL: &str =
    "SELECT id, created_at, updated_at, document FROM inquiries WHERE id = $1";
const LIST_INQUIRIES_FOR_PROPERTY_SQL: &str =
    "SELECT id, created_at, updated_at, document FROM inquiries WHERE property_id = $1 \
     ORDER BY created_at DESC, id DESC";
const INSERT_INQUIRY_SQL: &str =
    "INSERT INTO inquiries (id, property_id, created_at, updated_at, document) \
     VALUES ($1, $2, now(), now(), $3) RETURNING created_at, updated_at";

type DocumentRow<T> = (Uuid, DateTime<Utc>, DateTime<Utc>, Json<T>);

/// Explicitly opened handle to the document store. Close it at shutdown.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(database_url: &str, config: &StorageConfig) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(config.request_timeout)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wraps a pool opened elsewhere, such as a per-test database.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the bundled migrations, creating the `properties` and `inquiries` collections.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("document collections ready");
        Ok(())
    }

    pub fn properties(&self) -> PgPropertyRepository {
        PgPropertyRepository {
            pool: self.pool.clone(),
        }
    }

    pub fn inquiries(&self) -> PgInquiryRepository {
        PgInquiryRepository {
            pool: self.pool.clone(),
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("database connections closed");
    }
}

#[derive(Debug, Clone)]
pub struct PgPropertyRepository {
    pool: PgPool,
}

fn property_from_row(row: DocumentRow<PropertyDetails>) -> Property {
    let (id, created_at, updated_at, Json(details)) = row;
    Property {
        id: PropertyId::from_uuid(id),
        details,
        created_at,
        updated_at,
    }
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn list_newest_first(&self) -> Result<Vec<Property>, StorageError> {
        let rows: Vec<DocumentRow<PropertyDetails>> = query_as(LIST_PROPERTIES_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(property_from_row).collect())
    }

    async fn fetch(&self, id: PropertyId) -> Result<Option<Property>, StorageError> {
        let row: Option<DocumentRow<PropertyDetails>> = query_as(GET_PROPERTY_SQL)
            .bind(id.into_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(property_from_row))
    }

    async fn insert(&self, details: PropertyDetails) -> Result<Property, StorageError> {
        let id = PropertyId::generate();
        let (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>) =
            query_as(INSERT_PROPERTY_SQL)
                .bind(id.into_uuid())
                .bind(Json(&details))
                .fetch_one(&self.pool)
                .await?;
        Ok(Property {
            id,
            details,
            created_at,
            updated_at,
        })
    }

    async fn clear(&self) -> Result<u64, StorageError> {
        let result = query(CLEAR_PROPERTIES_SQL).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

/// Persisted body of an inquiry document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InquiryDocument {
    property: PropertyId,
    name: String,
    phone: String,
    email: String,
}

fn inquiry_from_row(row: DocumentRow<InquiryDocument>) -> Inquiry {
    let (id, created_at, updated_at, Json(document)) = row;
    Inquiry {
        id: InquiryId::from_uuid(id),
        property: document.property,
        name: document.name,
        phone: document.phone,
        email: document.email,
        created_at,
        updated_at,
    }
}

#[derive(Debug, Clone)]
pub struct PgInquiryRepository {
    pool: PgPool,
}

#[async_trait]
impl InquiryRepository for PgInquiryRepository {
    async fn insert(&self, inquiry: NewInquiry) -> Result<Inquiry, StorageError> {
        let id = InquiryId::generate();
        let document = InquiryDocument {
            property: inquiry.property,
            name: inquiry.name,
            phone: inquiry.phone,
            email: inquiry.email,
        };
        let (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>) =
            query_as(INSERT_INQUIRY_SQL)
                .bind(id.into_uuid())
                .bind(document.property.into_uuid())
                .bind(Json(&document))
                .fetch_one(&self.pool)
                .await?;
        Ok(Inquiry {
            id,
            property: document.property,
            name: document.name,
            phone: document.phone,
            email: document.email,
            created_at,
            updated_at,
        })
    }

    async fn fetch(&self, id: InquiryId) -> Result<Option<Inquiry>, StorageError> {
        let row: Option<DocumentRow<InquiryDocument>> = query_as(GET_INQUIRY_SQL)
            .bind(id.into_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(inquiry_from_row))
    }

    async fn list_for_property(&self, property: PropertyId) -> Result<Vec<Inquiry>, StorageError> {
        let rows: Vec<DocumentRow<InquiryDocument>> = query_as(LIST_INQUIRIES_FOR_PROPERTY_SQL)
            .bind(property.into_uuid())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(inquiry_from_row).collect())
    }
}
