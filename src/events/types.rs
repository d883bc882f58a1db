// src/events/types.rs
//
// Change notifications published after the backend confirms a write.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - A payload is either the written record or `{ "id": ... }` for deletions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Record;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Name subscribers know the event by
    fn event_type(&self) -> &'static str;
}

/// Events that announce a changed table
pub trait ChangeEvent: DomainEvent {
    fn payload(&self) -> &ChangePayload;
}

/// What a change event carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChangePayload {
    /// The record as stored after a create or update
    Record(Record),
    /// Identifier of a deleted record
    Removed { id: String },
}

impl ChangePayload {
    pub fn removed(id: impl Into<String>) -> Self {
        ChangePayload::Removed { id: id.into() }
    }

    pub fn id(&self) -> Option<String> {
        match self {
            ChangePayload::Record(record) => crate::domain::record_id(record),
            ChangePayload::Removed { id } => Some(id.clone()),
        }
    }

    pub fn is_removal(&self) -> bool {
        matches!(self, ChangePayload::Removed { .. })
    }
}

// ============================================================================
// SERMONS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SermonsChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub payload: ChangePayload,
}

impl SermonsChanged {
    pub fn new(payload: ChangePayload) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            payload,
        }
    }
}

impl DomainEvent for SermonsChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "sermonsChanged" }
}

impl ChangeEvent for SermonsChanged {
    fn payload(&self) -> &ChangePayload { &self.payload }
}

// ============================================================================
// EVENTS (church calendar)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub payload: ChangePayload,
}

impl EventsChanged {
    pub fn new(payload: ChangePayload) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            payload,
        }
    }
}

impl DomainEvent for EventsChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "eventsChanged" }
}

impl ChangeEvent for EventsChanged {
    fn payload(&self) -> &ChangePayload { &self.payload }
}

// ============================================================================
// GALLERY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub payload: ChangePayload,
}

impl GalleryChanged {
    pub fn new(payload: ChangePayload) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            payload,
        }
    }
}

impl DomainEvent for GalleryChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "galleryChanged" }
}

impl ChangeEvent for GalleryChanged {
    fn payload(&self) -> &ChangePayload { &self.payload }
}

// ============================================================================
// APPOINTMENTS
// ============================================================================

/// Administrative action that changed an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    Create,
    Update,
    RespondAppointment,
    Delete,
}

impl AdminAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::Create => "create",
            AdminAction::Update => "update",
            AdminAction::RespondAppointment => "respond_appointment",
            AdminAction::Delete => "delete",
        }
    }
}

impl std::fmt::Display for AdminAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentsChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub action: AdminAction,
    pub payload: ChangePayload,
}

impl AppointmentsChanged {
    pub fn new(action: AdminAction, payload: ChangePayload) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            action,
            payload,
        }
    }
}

impl DomainEvent for AppointmentsChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "appointmentsChanged" }
}

impl ChangeEvent for AppointmentsChanged {
    fn payload(&self) -> &ChangePayload { &self.payload }
}
