// src/error/types.rs
use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A non-2xx answer from the remote backend.
///
/// Carries the structured body the backend returns (`code`, `message`,
/// `details`, `hint`) so callers can branch on backend codes such as
/// `23505` (unique violation) or `PGRST116` (no rows for a single read).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendError {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} (status {}, code {})", self.message, self.status, code),
            None => write!(f, "{} (status {})", self.message, self.status),
        }
    }
}

impl std::error::Error for BackendError {}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

/// Coarse error categories callers use to pick a recovery policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The backend or the transport failed; propagated unmodified.
    Backend,
    /// A business rule refused the operation.
    Domain,
    /// The request was malformed and never left the process.
    Input,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Backend(_) | AppError::Http(_) | AppError::NotFound => ErrorKind::Backend,
            AppError::Domain(_) => ErrorKind::Domain,
            AppError::InvalidInput(_) | AppError::Config(_) => ErrorKind::Input,
            AppError::Serialization(_) | AppError::Io(_) | AppError::Other(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Backend error code, when the backend supplied one.
    pub fn backend_code(&self) -> Option<&str> {
        match self {
            AppError::Backend(e) => e.code.as_deref(),
            _ => None,
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_error(code: Option<&str>) -> BackendError {
        BackendError {
            status: 409,
            code: code.map(str::to_string),
            message: "duplicate key value violates unique constraint".to_string(),
            details: None,
            hint: None,
        }
    }

    #[test]
    fn test_backend_error_display_includes_code() {
        let err = backend_error(Some("23505"));
        assert_eq!(
            err.to_string(),
            "duplicate key value violates unique constraint (status 409, code 23505)"
        );
    }

    #[test]
    fn test_backend_error_display_without_code() {
        let err = backend_error(None);
        assert_eq!(
            err.to_string(),
            "duplicate key value violates unique constraint (status 409)"
        );
    }

    #[test]
    fn test_kind_taxonomy() {
        assert_eq!(AppError::from(backend_error(None)).kind(), ErrorKind::Backend);
        assert_eq!(AppError::Domain(DomainError::LastAdmin).kind(), ErrorKind::Domain);
        assert_eq!(AppError::InvalidInput("x".into()).kind(), ErrorKind::Input);
        assert_eq!(AppError::Other("x".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_backend_code_accessor() {
        let err = AppError::from(backend_error(Some("PGRST116")));
        assert_eq!(err.backend_code(), Some("PGRST116"));
        assert_eq!(AppError::NotFound.backend_code(), None);
    }

    #[test]
    fn test_app_error_serializes_as_message() {
        let json = serde_json::to_string(&AppError::Domain(DomainError::LastAdmin)).unwrap();
        assert_eq!(json, "\"Domain error: Cannot demote the last admin user\"");
    }
}
