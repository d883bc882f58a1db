// src/services/settings_service.rs
//
// Single-row settings tables (payment provider, mail delivery).
// The row always has `id = 1`; updates upsert it.

use chrono::Utc;
use log::info;
use serde_json::json;

use crate::domain::{timestamp, Record};
use crate::error::AppResult;
use crate::repositories::RecordRepository;

/// Primary key of the settings row
pub const SETTINGS_ROW_ID: i64 = 1;

pub struct SettingsService {
    repo: RecordRepository,
}

impl SettingsService {
    pub fn new(repo: RecordRepository) -> Self {
        Self { repo }
    }

    /// The settings row, or `None` before it was ever saved
    pub async fn get_settings(&self) -> AppResult<Option<Record>> {
        self.repo.first().await
    }

    /// Merge `settings` into the row, creating it if needed
    pub async fn update_settings(&self, settings: Record) -> AppResult<Record> {
        let mut row = settings;
        row.insert("id".to_string(), json!(SETTINGS_ROW_ID));
        row.insert("updated_at".to_string(), timestamp(Utc::now()));

        let stored = self.repo.upsert(row, "id").await?;
        info!("Saved {}", self.repo.table().name);
        Ok(stored)
    }
}
