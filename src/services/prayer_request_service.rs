// src/services/prayer_request_service.rs
use crate::backend::Filter;
use crate::domain::Record;
use crate::error::AppResult;
use crate::repositories::RecordRepository;
use crate::services::record_service::RecordService;

pub struct PrayerRequestService {
    records: RecordService,
}

impl PrayerRequestService {
    pub fn new(repo: RecordRepository) -> Self {
        Self {
            records: RecordService::new(repo),
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

    /// Requests visible to the congregation unless `public_only` is false
    pub async fn get_prayer_requests(&self, public_only: bool) -> AppResult<Vec<Record>> {
        let filters = if public_only {
            vec![Filter::eq("is_public", true)]
        } else {
            Vec::new()
        };
        self.records.list_where(filters, None).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Record> {
        self.records.get_by_id(id).await
    }

    pub async fn create(&self, request: Record) -> AppResult<Record> {
        self.records.create(request).await
    }

    pub async fn update(&self, id: &str, changes: Record) -> AppResult<Record> {
        self.records.update(id, changes).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.records.delete(id).await
    }
}
