// src/services/sermon_service.rs
use std::sync::Arc;

use crate::backend::Filter;
use crate::domain::Record;
use crate::error::AppResult;
use crate::events::{AdminAction, ChangePayload, EventBus, SermonsChanged};
use crate::repositories::RecordRepository;
use crate::services::record_service::RecordService;

pub const DEFAULT_FEATURED_LIMIT: usize = 3;

fn notify(bus: &EventBus, _action: AdminAction, payload: ChangePayload) {
    bus.emit(SermonsChanged::new(payload));
}

pub struct SermonService {
    records: RecordService,
}

impl SermonService {
    pub fn new(repo: RecordRepository, event_bus: Arc<EventBus>) -> Self {
        Self {
            records: RecordService::notifying(repo, event_bus, notify),
        }
    }

    /// All sermons, newest `sermon_date` first
    pub async fn list(&self) -> AppResult<Vec<Record>> {
        self.records.list().await
    }

    pub async fn list_where(
        &self,
        filters: Vec<Filter>,
        limit: Option<usize>,
    ) -> AppResult<Vec<Record>> {
        self.records.list_where(filters, limit).await
    }

    /// Most recent sermons flagged `is_featured`
    pub async fn get_featured_sermons(&self, limit: usize) -> AppResult<Vec<Record>> {
        self.records
            .list_where(vec![Filter::eq("is_featured", true)], Some(limit))
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Record> {
        self.records.get_by_id(id).await
    }

    pub async fn create(&self, sermon: Record) -> AppResult<Record> {
        self.records.create(sermon).await
    }

    pub async fn update(&self, id: &str, changes: Record) -> AppResult<Record> {
        self.records.update(id, changes).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.records.delete(id).await
    }
}
