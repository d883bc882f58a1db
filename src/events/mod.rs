// src/events/mod.rs
//
// Change notification system - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod types;

// ============================================================================
// PUBLIC EXPORTS - Event Types and Bus Only
// ============================================================================

pub use types::{ChangeEvent, ChangePayload, DomainEvent};

pub use types::{
    // Appointments
    AdminAction,
    AppointmentsChanged,
    // Church calendar
    EventsChanged,
    // Gallery
    GalleryChanged,
    // Sermons
    SermonsChanged,
};

pub use bus::{EventBus, EventLogEntry, DEFAULT_LOG_CAPACITY};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
