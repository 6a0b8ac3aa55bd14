//! Property catalog and buyer inquiry intake behind a server-rendered listing site.
//!
//! The web layer lives in the `realty-listings-web` service; this crate owns the
//! data model, the storage backends, and the ambient configuration/telemetry stack.

pub mod config;
pub mod error;
pub mod inquiries;
pub mod listings;
pub mod seed;
pub mod storage;
pub mod telemetry;
pub mod validation;
