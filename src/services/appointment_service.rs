// src/services/appointment_service.rs
//
// Appointment requests and the admin responses to them.
// Every write is announced as an `AppointmentsChanged` event tagged with
// the admin action that caused it.

use std::sync::Arc;

use chrono::Utc;
use log::info;

use crate::backend::Filter;
use crate::domain::{timestamp, to_record, AppointmentResponse, Record};
use crate::error::AppResult;
use crate::events::{AdminAction, AppointmentsChanged, ChangePayload, EventBus};
use crate::repositories::RecordRepository;
use crate::services::record_service::RecordService;

fn notify(bus: &EventBus, action: AdminAction, payload: ChangePayload) {
    bus.emit(AppointmentsChanged::new(action, payload));
}

pub struct AppointmentService {
    records: RecordService,
}

impl AppointmentService {
    pub fn new(repo: RecordRepository, event_bus: Arc<EventBus>) -> Self {
        Self {
            records: RecordService::notifying(repo, event_bus, notify),
        }
    }

    /// All appointments with the responding admin's e-mail embedded
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

    pub async fn get_appointments_by_status(&self, status: &str) -> AppResult<Vec<Record>> {
        self.records
            .list_where(vec![Filter::eq("status", status)], None)
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Record> {
        self.records.get_by_id(id).await
    }

    pub async fn create(&self, appointment: Record) -> AppResult<Record> {
        self.records.create(appointment).await
    }

    pub async fn update(&self, id: &str, changes: Record) -> AppResult<Record> {
        self.records.update(id, changes).await
    }

    /// Record an admin's answer and stamp `responded_at`
    pub async fn respond_to_appointment(
        &self,
        id: &str,
        response: &AppointmentResponse,
    ) -> AppResult<Record> {
        let mut changes = to_record(response)?;
        changes.insert("responded_at".to_string(), timestamp(Utc::now()));

        let updated = self.records.repository().update_by_id(id, changes).await?;
        info!("Appointment {} answered with status {}", id, response.status);

        self.records.publish(
            AdminAction::RespondAppointment,
            ChangePayload::Record(updated.clone()),
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.records.delete(id).await
    }
}
