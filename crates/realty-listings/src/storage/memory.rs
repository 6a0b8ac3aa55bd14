use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{system_clock, Clock, StorageError};
use crate::inquiries::{Inquiry, InquiryId, InquiryRepository, NewInquiry};
use crate::listings::{Property, PropertyDetails, PropertyId, PropertyRepository};

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, StorageError> {
    mutex
        .lock()
        .map_err(|_| StorageError::Backend(format!("{what} store lock poisoned")))
}

/// Process-local property collection.
#[derive(Clone)]
pub struct InMemoryPropertyRepository {
    records: Arc<Mutex<HashMap<PropertyId, Property>>>,
    clock: Clock,
}

impl Default for InMemoryPropertyRepository {
    fn default() -> Self {
        Self::with_clock(system_clock())
    }
}

impl InMemoryPropertyRepository {
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn list_newest_first(&self) -> Result<Vec<Property>, StorageError> {
        let guard = lock(&self.records, "property")?;
        let mut properties: Vec<Property> = guard.values().cloned().collect();
        properties.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(properties)
    }

    async fn fetch(&self, id: PropertyId) -> Result<Option<Property>, StorageError> {
        let guard = lock(&self.records, "property")?;
        Ok(guard.get(&id).cloned())
    }

    async fn insert(&self, details: PropertyDetails) -> Result<Property, StorageError> {
        let now = (self.clock)();
        let property = Property {
            id: PropertyId::generate(),
            details,
            created_at: now,
            updated_at: now,
        };
        let mut guard = lock(&self.records, "property")?;
        guard.insert(property.id, property.clone());
        Ok(property)
    }

    async fn clear(&self) -> Result<u64, StorageError> {
        let mut guard = lock(&self.records, "property")?;
        let removed = guard.len() as u64;
        guard.clear();
        Ok(removed)
    }
}

/// Process-local inquiry collection.
#[derive(Clone)]
pub struct InMemoryInquiryRepository {
    records: Arc<Mutex<HashMap<InquiryId, Inquiry>>>,
    clock: Clock,
}

impl Default for InMemoryInquiryRepository {
    fn default() -> Self {
        Self::with_clock(system_clock())
    }
}

impl InMemoryInquiryRepository {
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }
}

#[async_trait]
impl InquiryRepository for InMemoryInquiryRepository {
    async fn insert(&self, inquiry: NewInquiry) -> Result<Inquiry, StorageError> {
        let now = (self.clock)();
        let NewInquiry {
            property,
            name,
            phone,
            email,
        } = inquiry;
        let stored = Inquiry {
            id: InquiryId::generate(),
            property,
            name,
            phone,
            email,
            created_at: now,
            updated_at: now,
        };
        let mut guard = lock(&self.records, "inquiry")?;
        guard.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn fetch(&self, id: InquiryId) -> Result<Option<Inquiry>, StorageError> {
        let guard = lock(&self.records, "inquiry")?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_for_property(&self, property: PropertyId) -> Result<Vec<Inquiry>, StorageError> {
        let guard = lock(&self.records, "inquiry")?;
        let mut inquiries: Vec<Inquiry> = guard
            .values()
            .filter(|inquiry| inquiry.property == property)
            .cloned()
            .collect();
        inquiries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(inquiries)
    }
}
