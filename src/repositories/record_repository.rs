// src/repositories/record_repository.rs
//
// Record persistence for any table

use std::sync::Arc;

use log::debug;

use crate::backend::{Filter, Query, TableGateway};
use crate::domain::Record;
use crate::error::{AppError, AppResult};
use crate::repositories::tables::TableSpec;

/// Maps one remote table onto typed calls
///
/// Reads use the table's select clause and default ordering. Every write
/// targets rows by `id` or by explicit filters, never the whole table.
#[derive(Clone)]
pub struct RecordRepository {
    table: TableSpec,
    gateway: Arc<dyn TableGateway>,
}

impl RecordRepository {
    pub fn new(table: TableSpec, gateway: Arc<dyn TableGateway>) -> Self {
        Self { table, gateway }
    }

    pub fn table(&self) -> &TableSpec {
        &self.table
    }

    /// Base query: select clause, no filters, default ordering
    pub fn query(&self) -> Query {
        let query = Query::new().select(self.table.select);
        match self.table.order() {
            Some(order) => query.order(order),
            None => query,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Record>> {
        self.list_query(&self.query()).await
    }

    /// Rows matching every filter, in default order
    pub async fn list_where(
        &self,
        filters: Vec<Filter>,
        limit: Option<usize>,
    ) -> AppResult<Vec<Record>> {
        let mut query = self.query().filters(filters);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        self.list_query(&query).await
    }

    pub async fn list_query(&self, query: &Query) -> AppResult<Vec<Record>> {
        debug!("Selecting from {}", self.table.name);
        self.gateway.select(self.table.name, query).await
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Record>> {
        let query = Query::new()
            .select(self.table.select)
            .filter(Filter::eq("id", id))
            .limit(1);
        let rows = self.list_query(&query).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Record> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    /// First row in default order, if any
    pub async fn first(&self) -> AppResult<Option<Record>> {
        let rows = self.list_query(&self.query().limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn insert(&self, record: Record) -> AppResult<Record> {
        self.gateway.insert(self.table.name, record).await
    }

    pub async fn update_by_id(&self, id: &str, changes: Record) -> AppResult<Record> {
        self.update_where_first(vec![Filter::eq("id", id)], changes)
            .await
    }

    /// Update every matching row and return the first one written
    pub async fn update_where_first(
        &self,
        filters: Vec<Filter>,
        changes: Record,
    ) -> AppResult<Record> {
        let rows = self
            .gateway
            .update(self.table.name, &filters, changes)
            .await?;
        rows.into_iter().next().ok_or(AppError::NotFound)
    }

    pub async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.gateway
            .delete(self.table.name, &[Filter::eq("id", id)])
            .await
    }

    pub async fn upsert(&self, record: Record, on_conflict: &str) -> AppResult<Record> {
        self.gateway
            .upsert(self.table.name, record, on_conflict)
            .await
    }

    pub async fn count(&self, filters: Vec<Filter>) -> AppResult<u64> {
        self.gateway.count(self.table.name, &filters).await
    }
}
