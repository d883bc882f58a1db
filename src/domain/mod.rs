// src/domain/mod.rs
//
// Domain Root - records, roles, images and the few business rules this
// crate enforces itself. Everything else is owned by the remote backend.

pub mod appointment;
pub mod image;
pub mod profile;
pub mod record;

pub use appointment::AppointmentResponse;
pub use image::{
    content_type_for, file_extension, generate_object_name, object_path_from_url,
    validate_folder, ImageFile, DEFAULT_IMAGE_FOLDER,
};
pub use profile::{ensure_can_demote, validate_email, NewProfile, Role};
pub use record::{record_id, timestamp, to_record, Record};

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Cannot demote the last admin user")]
    LastAdmin,

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
