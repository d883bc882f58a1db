// src/backend/mod.rs
//
// Backend module
//
// Provides:
// - Query / filter / order builder
// - The TableGateway and ObjectStore seams
// - Hosted REST implementations and in-memory implementations

pub mod gateway;
pub mod memory;
pub mod query;
pub mod rest;
pub mod storage;

pub use gateway::{ObjectStore, TableGateway, UploadOptions};
pub use memory::{MemoryBackend, MemoryObjectStore};
pub use query::{Direction, Filter, Operator, Order, Query};
pub use rest::RestBackend;
pub use storage::RestObjectStore;

#[cfg(test)]
pub use gateway::{MockObjectStore, MockTableGateway};
