// src/backend/gateway.rs
//
// The two seams between this crate and the hosted backend.
//
// RULES:
// - One call = one remote request
// - No retries, no caching
// - Backend errors are returned as-is

use async_trait::async_trait;

use crate::backend::query::{Filter, Query};
use crate::domain::Record;
use crate::error::AppResult;

/// Table-oriented access to the remote database
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableGateway: Send + Sync {
    /// Rows matching the query
    async fn select(&self, table: &str, query: &Query) -> AppResult<Vec<Record>>;

    /// Insert one row and return it as stored (defaults and ids filled in)
    async fn insert(&self, table: &str, record: Record) -> AppResult<Record>;

    /// Apply `changes` to every row matching `filters`; returns the updated rows
    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        changes: Record,
    ) -> AppResult<Vec<Record>>;

    /// Delete every row matching `filters`
    async fn delete(&self, table: &str, filters: &[Filter]) -> AppResult<()>;

    /// Insert, or merge into the row whose `on_conflict` column matches
    async fn upsert(&self, table: &str, record: Record, on_conflict: &str) -> AppResult<Record>;

    /// Exact number of rows matching `filters`
    async fn count(&self, table: &str, filters: &[Filter]) -> AppResult<u64>;
}

/// Upload parameters for a single object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub content_type: String,
    pub cache_control_secs: u32,
    pub upsert: bool,
}

impl UploadOptions {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            cache_control_secs: 3600,
            upsert: false,
        }
    }
}

/// Key-based object storage with public URLs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        options: &UploadOptions,
    ) -> AppResult<()>;

    /// Public URL of an object; computed locally, no request
    fn public_url(&self, bucket: &str, path: &str) -> String;

    async fn remove(&self, bucket: &str, paths: &[String]) -> AppResult<()>;
}
