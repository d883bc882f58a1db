// src/lib.rs
// church-api - Typed client for the church management backend
//
// Architecture:
// - Backend-owned data: records belong to the remote tables, not to us
// - Event-driven: confirmed writes to sermons, events, gallery and
//   appointments are announced on the event bus
// - Explicit: one operation = one remote request, no retries, no caching
// - Business rules live in the domain (last-admin guard, image naming)
// - Application Layer: the `Api` façade the UI talks to

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;

// ============================================================================
// BACKEND ACCESS
// ============================================================================

pub mod backend;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::{get_config_path, BackendConfig};

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    ensure_can_demote,
    object_path_from_url,
    record_id,
    to_record,
    // Appointments
    AppointmentResponse,
    DomainError,
    // Images
    ImageFile,
    // Records
    Record,
    // Profiles
    Role,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult, BackendError, ErrorKind};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    AdminAction,
    AppointmentsChanged,
    ChangeEvent,
    ChangePayload,
    DomainEvent,
    EventBus,
    EventLogEntry,
    EventsChanged,
    GalleryChanged,
    SermonsChanged,
};

// ============================================================================
// PUBLIC API - Backend
// ============================================================================

pub use backend::{
    Direction,
    Filter,
    MemoryBackend,
    MemoryObjectStore,
    ObjectStore,
    Operator,
    Order,
    Query,
    RestBackend,
    RestObjectStore,
    TableGateway,
    UploadOptions,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{RecordRepository, TableSpec};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AppointmentService,
    DonationService,
    EmailCampaignService,
    EmailSubscriberService,
    EmailTemplateService,
    EventService,
    GalleryService,
    InviteOutcome,
    MemberService,
    PrayerRequestService,
    SermonService,
    SettingsService,
    StorageService,
    TestimonialService,
    UserService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{Api, ErrorResponse, ErrorType};
