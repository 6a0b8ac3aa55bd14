use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listings::PropertyId;
use crate::validation::{required, ValidationError};

/// Opaque identifier assigned to an inquiry by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InquiryId(Uuid);

impl InquiryId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for InquiryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Contact details as posted by a prospective buyer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InquirySubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Validated inquiry ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInquiry {
    pub property: PropertyId,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl NewInquiry {
    /// Trims every field, rejects empty ones, and lower-cases the email.
    pub fn from_submission(
        property: &str,
        submission: InquirySubmission,
    ) -> Result<Self, ValidationError> {
        let property = PropertyId::parse(property)
            .map_err(|_| ValidationError::Malformed { field: "property" })?;

        Ok(Self {
            property,
            name: required("name", &submission.name)?,
            phone: required("phone", &submission.phone)?,
            email: required("email", &submission.email)?.to_lowercase(),
        })
    }
}

/// A stored inquiry. `property` is a weak reference; nothing guarantees it still resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: InquiryId,
    pub property: PropertyId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
