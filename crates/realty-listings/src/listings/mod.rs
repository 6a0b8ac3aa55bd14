//! Property records and the catalog that serves them to the page layer.

pub mod catalog;
pub mod domain;
pub mod repository;

pub use catalog::{CatalogError, PropertyCatalog};
pub use domain::{
    total_price, InvalidIdentifier, Property, PropertyDetails, PropertyId, PropertyView,
};
pub use repository::PropertyRepository;
