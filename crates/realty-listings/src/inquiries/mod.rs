//! Buyer inquiries referencing a listed property.

pub mod domain;
pub mod intake;
pub mod repository;

pub use domain::{Inquiry, InquiryId, InquirySubmission, NewInquiry};
pub use intake::{InquiryIntake, IntakeError};
pub use repository::InquiryRepository;
