// src/services/email_service.rs
//
// Newsletter subscribers, templates and campaigns.
// Updates stamp `updated_at`; the backend does not do it for us.

use chrono::Utc;
use log::info;
use serde_json::json;

use crate::backend::Filter;
use crate::domain::{timestamp, Record};
use crate::error::AppResult;
use crate::repositories::RecordRepository;
use crate::services::record_service::RecordService;

pub const STATUS_UNSUBSCRIBED: &str = "unsubscribed";

fn stamped(mut changes: Record) -> Record {
    changes.insert("updated_at".to_string(), timestamp(Utc::now()));
    changes
}

// ============================================================================
// SUBSCRIBERS
// ============================================================================

pub struct EmailSubscriberService {
    records: RecordService,
}

impl EmailSubscriberService {
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

    pub async fn add_subscriber(&self, subscriber: Record) -> AppResult<Record> {
        self.records.create(subscriber).await
    }

    pub async fn update(&self, id: &str, changes: Record) -> AppResult<Record> {
        self.records.update(id, stamped(changes)).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.records.delete(id).await
    }

    /// Mark the subscription for `email` as unsubscribed
    pub async fn unsubscribe(&self, email: &str) -> AppResult<Record> {
        let now = timestamp(Utc::now());
        let mut changes = Record::new();
        changes.insert("status".to_string(), json!(STATUS_UNSUBSCRIBED));
        changes.insert("unsubscribed_at".to_string(), now.clone());
        changes.insert("updated_at".to_string(), now);

        let updated = self
            .records
            .repository()
            .update_where_first(vec![Filter::eq("email", email)], changes)
            .await?;
        info!("Unsubscribed {}", email);
        Ok(updated)
    }
}

// ============================================================================
// TEMPLATES
// ============================================================================

pub struct EmailTemplateService {
    records: RecordService,
}

impl EmailTemplateService {
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

    pub async fn create(&self, template: Record) -> AppResult<Record> {
        self.records.create(template).await
    }

    pub async fn update(&self, id: &str, changes: Record) -> AppResult<Record> {
        self.records.update(id, stamped(changes)).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.records.delete(id).await
    }
}

// ============================================================================
// CAMPAIGNS
// ============================================================================

pub struct EmailCampaignService {
    records: RecordService,
}

impl EmailCampaignService {
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

    pub async fn create(&self, campaign: Record) -> AppResult<Record> {
        self.records.create(campaign).await
    }

    pub async fn update(&self, id: &str, changes: Record) -> AppResult<Record> {
        self.records.update(id, stamped(changes)).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.records.delete(id).await
    }
}
