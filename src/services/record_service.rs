// src/services/record_service.rs
//
// Uniform CRUD over one table.
//
// CRITICAL RULES:
// - Events are emitted only AFTER the backend confirms the write
// - Exactly one event per successful mutation of a notifying table
// - Backend errors propagate unchanged; a failed write emits nothing

use std::sync::Arc;

use log::info;

use crate::backend::Filter;
use crate::domain::Record;
use crate::error::AppResult;
use crate::events::{AdminAction, ChangePayload, EventBus};
use crate::repositories::RecordRepository;

/// Publishes the change event of a notifying table
pub type Notifier = fn(&EventBus, AdminAction, ChangePayload);

pub struct RecordService {
    repo: RecordRepository,
    notifier: Option<(Arc<EventBus>, Notifier)>,
}

impl RecordService {
    /// Service for a table whose writes nobody listens to
    pub fn new(repo: RecordRepository) -> Self {
        Self {
            repo,
            notifier: None,
        }
    }

    /// Service that announces every create, update and delete
    pub fn notifying(repo: RecordRepository, event_bus: Arc<EventBus>, notifier: Notifier) -> Self {
        Self {
            repo,
            notifier: Some((event_bus, notifier)),
        }
    }

    pub fn repository(&self) -> &RecordRepository {
        &self.repo
    }

    pub async fn list(&self) -> AppResult<Vec<Record>> {
        self.repo.list().await
    }

    pub async fn list_where(
        &self,
        filters: Vec<Filter>,
        limit: Option<usize>,
    ) -> AppResult<Vec<Record>> {
        self.repo.list_where(filters, limit).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Record> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, record: Record) -> AppResult<Record> {
        let stored = self.repo.insert(record).await?;
        info!("Created row in {}", self.repo.table().name);

        self.publish(AdminAction::Create, ChangePayload::Record(stored.clone()));
        Ok(stored)
    }

    pub async fn update(&self, id: &str, changes: Record) -> AppResult<Record> {
        let updated = self.repo.update_by_id(id, changes).await?;
        info!("Updated {} row {}", self.repo.table().name, id);

        self.publish(AdminAction::Update, ChangePayload::Record(updated.clone()));
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.repo.delete_by_id(id).await?;
        info!("Deleted {} row {}", self.repo.table().name, id);

        self.publish(AdminAction::Delete, ChangePayload::removed(id));
        Ok(true)
    }

    /// Emit the table's change event, if it has one
    pub(crate) fn publish(&self, action: AdminAction, payload: ChangePayload) {
        if let Some((event_bus, notify)) = &self.notifier {
            notify(event_bus, action, payload);
        }
    }
}
