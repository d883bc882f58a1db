// src/services/event_service.rs
//
// Church calendar events (not to be confused with bus events).

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::backend::Filter;
use crate::domain::Record;
use crate::error::AppResult;
use crate::events::{AdminAction, ChangePayload, EventBus, EventsChanged};
use crate::repositories::RecordRepository;
use crate::services::record_service::RecordService;

pub const DEFAULT_UPCOMING_LIMIT: usize = 3;

fn notify(bus: &EventBus, _action: AdminAction, payload: ChangePayload) {
    bus.emit(EventsChanged::new(payload));
}

pub struct EventService {
    records: RecordService,
}

impl EventService {
    pub fn new(repo: RecordRepository, event_bus: Arc<EventBus>) -> Self {
        Self {
            records: RecordService::notifying(repo, event_bus, notify),
        }
    }

    /// All events, earliest `event_date` first
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

    /// Events dated today (UTC) or later
    pub async fn get_upcoming_events(&self, limit: usize) -> AppResult<Vec<Record>> {
        self.get_upcoming_events_from(Utc::now().date_naive(), limit)
            .await
    }

    /// Events on or after `today`
    pub async fn get_upcoming_events_from(
        &self,
        today: NaiveDate,
        limit: usize,
    ) -> AppResult<Vec<Record>> {
        let today = today.format("%Y-%m-%d").to_string();
        self.records
            .list_where(vec![Filter::gte("event_date", today)], Some(limit))
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Record> {
        self.records.get_by_id(id).await
    }

    pub async fn create(&self, event: Record) -> AppResult<Record> {
        self.records.create(event).await
    }

    pub async fn update(&self, id: &str, changes: Record) -> AppResult<Record> {
        self.records.update(id, changes).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.records.delete(id).await
    }
}
