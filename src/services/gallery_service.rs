// src/services/gallery_service.rs
use std::sync::Arc;

use crate::backend::Filter;
use crate::domain::Record;
use crate::error::AppResult;
use crate::events::{AdminAction, ChangePayload, EventBus, GalleryChanged};
use crate::repositories::RecordRepository;
use crate::services::record_service::RecordService;

fn notify(bus: &EventBus, _action: AdminAction, payload: ChangePayload) {
    bus.emit(GalleryChanged::new(payload));
}

/// Gallery rows reference images already uploaded through the storage service
pub struct GalleryService {
    records: RecordService,
}

impl GalleryService {
    pub fn new(repo: RecordRepository, event_bus: Arc<EventBus>) -> Self {
        Self {
            records: RecordService::notifying(repo, event_bus, notify),
        }
    }

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

    pub async fn get_by_id(&self, id: &str) -> AppResult<Record> {
        self.records.get_by_id(id).await
    }

    pub async fn create(&self, image: Record) -> AppResult<Record> {
        self.records.create(image).await
    }

    pub async fn update(&self, id: &str, changes: Record) -> AppResult<Record> {
        self.records.update(id, changes).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.records.delete(id).await
    }
}
