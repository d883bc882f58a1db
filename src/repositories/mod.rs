// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls

pub mod record_repository;
pub mod tables;

pub use record_repository::RecordRepository;
pub use tables::TableSpec;
