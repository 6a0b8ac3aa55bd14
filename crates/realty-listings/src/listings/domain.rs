use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{positive, required, ValidationError};

/// Opaque identifier assigned to a property by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(Uuid);

impl PropertyId {
    /// Time-ordered identifiers so newer records also sort later by id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidIdentifier> {
        Uuid::try_parse(raw.trim())
            .map(Self)
            .map_err(|_| InvalidIdentifier {
                raw: raw.to_string(),
            })
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raised when a string cannot be an identifier in the storage layer's format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{raw}' is not a valid record identifier")]
pub struct InvalidIdentifier {
    pub raw: String,
}

/// Listing attributes as stored in the `properties` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub title: String,
    pub sq_ft: f64,
    pub price_per_sq_ft: f64,
    pub owner_name: String,
    pub broker_name: String,
    pub broker_phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image_url: String,
}

impl PropertyDetails {
    /// Checks required fields and area/price positivity, returning a trimmed copy.
    pub fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: required("title", &self.title)?,
            sq_ft: positive("sqFt", self.sq_ft)?,
            price_per_sq_ft: positive("pricePerSqFt", self.price_per_sq_ft)?,
            owner_name: required("ownerName", &self.owner_name)?,
            broker_name: required("brokerName", &self.broker_name)?,
            broker_phone: required("brokerPhone", &self.broker_phone)?,
            address: self.address.trim().to_string(),
            description: self.description.trim().to_string(),
            cover_image_url: self.cover_image_url.trim().to_string(),
        })
    }
}

/// A stored listing. The asking price is never persisted, see [`Property::total_price`].
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    pub details: PropertyDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn total_price(&self) -> f64 {
        total_price(self.details.sq_ft, self.details.price_per_sq_ft)
    }

    pub fn view(&self) -> PropertyView {
        let details = &self.details;
        PropertyView {
            id: self.id,
            title: details.title.clone(),
            sq_ft: details.sq_ft,
            price_per_sq_ft: details.price_per_sq_ft,
            total_price: self.total_price(),
            owner_name: details.owner_name.clone(),
            broker_name: details.broker_name.clone(),
            broker_phone: details.broker_phone.clone(),
            address: details.address.clone(),
            description: details.description.clone(),
            cover_image_url: details.cover_image_url.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

pub fn total_price(sq_ft: f64, price_per_sq_ft: f64) -> f64 {
    sq_ft * price_per_sq_ft
}

/// Read model handed to the page layer, carrying the derived total price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyView {
    pub id: PropertyId,
    pub title: String,
    pub sq_ft: f64,
    pub price_per_sq_ft: f64,
    pub total_price: f64,
    pub owner_name: String,
    pub broker_name: String,
    pub broker_phone: String,
    pub address: String,
    pub description: String,
    pub cover_image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
