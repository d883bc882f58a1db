// src/application/error_handling.rs
//
// Error responses for the UI
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Backend codes are passed through so forms can react to them
// - Logs errors for debugging

use log::error;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
    /// Backend error code such as `23505`, when the backend sent one
    pub code: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input/validation error (400)
    Validation,

    /// Business rule refused the operation (422)
    DomainError,

    /// The backend rejected the request
    Backend,

    /// The backend could not be reached
    Network,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details: None,
            code: None,
        }
    }

    fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found"),

            AppError::Domain(domain_error) => Self::new(ErrorType::DomainError, domain_error.to_string()),

            AppError::InvalidInput(message) => Self::new(ErrorType::Validation, message),

            AppError::Backend(backend_error) => {
                error!("Backend error: {}", backend_error);

                let mut response = Self::new(ErrorType::Backend, backend_error.message)
                    .with_details(backend_error.details.or(backend_error.hint));
                response.code = backend_error.code;
                response
            }

            AppError::Http(http_error) => {
                error!("HTTP error: {:?}", http_error);

                Self::new(ErrorType::Network, "Could not reach the server")
                    .with_details(Some(http_error.to_string()))
            }

            AppError::Config(message) => {
                error!("Configuration error: {}", message);

                Self::new(ErrorType::Internal, "The backend connection is not configured")
                    .with_details(Some(message))
            }

            other => {
                error!("Internal error: {:?}", other);

                Self::new(ErrorType::Internal, other.to_string())
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource))
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_app_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::error::BackendError;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Resource not found");
    }

    #[test]
    fn test_last_admin_message_reaches_ui() {
        let error = ErrorResponse::from_app_error(AppError::Domain(DomainError::LastAdmin));
        assert_eq!(error.error_type, ErrorType::DomainError);
        assert_eq!(error.message, "Cannot demote the last admin user");
    }

    #[test]
    fn test_backend_code_is_kept() {
        let error = ErrorResponse::from_app_error(AppError::Backend(BackendError {
            status: 409,
            code: Some("23505".to_string()),
            message: "duplicate key value violates unique constraint".to_string(),
            details: Some("Key (email)=(a@b.c) already exists.".to_string()),
            hint: None,
        }));

        assert_eq!(error.error_type, ErrorType::Backend);
        assert_eq!(error.code.as_deref(), Some("23505"));
        assert_eq!(error.details.as_deref(), Some("Key (email)=(a@b.c) already exists."));
    }

    #[test]
    fn test_validation_error() {
        let error = ErrorResponse::validation("Invalid input".to_string());
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "Invalid input");
    }

    #[test]
    fn test_result_conversion() {
        let result: Result<(), AppError> = Err(AppError::InvalidInput("bad folder".to_string()));
        let error = result.to_error_response().unwrap_err();
        assert_eq!(error.error_type, ErrorType::Validation);
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::not_found("Sermon");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("Sermon not found"));
    }
}
