// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - This layer sits ABOVE the services
// - It provides the boundary between the UI and the services
// - It wires services onto concrete backends
// - It translates errors into UI responses

pub mod api;
pub mod error_handling;

pub use api::Api;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
