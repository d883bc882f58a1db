// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// One service per namespace. Services own the business rules and the
// change notifications; repositories only move records.

pub mod appointment_service;
pub mod donation_service;
pub mod email_service;
pub mod event_service;
pub mod gallery_service;
pub mod member_service;
pub mod prayer_request_service;
pub mod record_service;
pub mod sermon_service;
pub mod settings_service;
pub mod storage_service;
pub mod testimonial_service;
pub mod user_service;

#[cfg(test)]
mod change_notification_tests;

// Re-export all services and their types
pub use appointment_service::AppointmentService;
pub use donation_service::DonationService;
pub use email_service::{EmailCampaignService, EmailSubscriberService, EmailTemplateService};
pub use event_service::{EventService, DEFAULT_UPCOMING_LIMIT};
pub use gallery_service::GalleryService;
pub use member_service::MemberService;
pub use prayer_request_service::PrayerRequestService;
pub use record_service::{Notifier, RecordService};
pub use sermon_service::{SermonService, DEFAULT_FEATURED_LIMIT};
pub use settings_service::SettingsService;
pub use storage_service::StorageService;
pub use testimonial_service::TestimonialService;
pub use user_service::{InviteOutcome, UserService};
