// src/services/member_service.rs
use crate::backend::Filter;
use crate::domain::Record;
use crate::error::AppResult;
use crate::repositories::RecordRepository;
use crate::services::record_service::RecordService;

pub struct MemberService {
    records: RecordService,
}

impl MemberService {
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

    pub async fn get_by_id(&self, id: &str) -> AppResult<Record> {
        self.records.get_by_id(id).await
    }

    pub async fn create(&self, member: Record) -> AppResult<Record> {
        self.records.create(member).await
    }

    pub async fn update(&self, id: &str, changes: Record) -> AppResult<Record> {
        self.records.update(id, changes).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.records.delete(id).await
    }
}
