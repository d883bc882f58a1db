// src/services/testimonial_service.rs
use crate::backend::Filter;
use crate::domain::Record;
use crate::error::AppResult;
use crate::repositories::RecordRepository;
use crate::services::record_service::RecordService;

pub struct TestimonialService {
    records: RecordService,
}

impl TestimonialService {
    pub fn new(repo: RecordRepository) -> Self {
        Self {
            records: RecordService::new(repo),
        }
    }

    /// Every testimonial, approved or not
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

    /// Testimonials for display; pass `approved_only = false` for moderation views
    pub async fn get_testimonials(&self, approved_only: bool) -> AppResult<Vec<Record>> {
        let filters = if approved_only {
            vec![Filter::eq("is_approved", true)]
        } else {
            Vec::new()
        };
        self.records.list_where(filters, None).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Record> {
        self.records.get_by_id(id).await
    }

    pub async fn create(&self, testimonial: Record) -> AppResult<Record> {
        self.records.create(testimonial).await
    }

    pub async fn update(&self, id: &str, changes: Record) -> AppResult<Record> {
        self.records.update(id, changes).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.records.delete(id).await
    }
}
