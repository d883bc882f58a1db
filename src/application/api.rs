// src/application/api.rs
//
// The façade handed to the UI layer.
// All fields are Arc-wrapped for sharing across tasks; every service shares
// one gateway, one object store and one event bus.

use std::sync::Arc;

use log::info;

use crate::backend::{
    MemoryBackend, MemoryObjectStore, ObjectStore, RestBackend, RestObjectStore, TableGateway,
};
use crate::config::{BackendConfig, DEFAULT_IMAGE_BUCKET};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::repositories::{tables, RecordRepository, TableSpec};
use crate::services::{
    AppointmentService, DonationService, EmailCampaignService, EmailSubscriberService,
    EmailTemplateService, EventService, GalleryService, MemberService, PrayerRequestService,
    SermonService, SettingsService, StorageService, TestimonialService, UserService,
};

pub struct Api {
    pub event_bus: Arc<EventBus>,
    pub sermons: Arc<SermonService>,
    pub events: Arc<EventService>,
    pub members: Arc<MemberService>,
    pub gallery: Arc<GalleryService>,
    pub testimonials: Arc<TestimonialService>,
    pub prayer_requests: Arc<PrayerRequestService>,
    pub donations: Arc<DonationService>,
    pub users: Arc<UserService>,
    pub appointments: Arc<AppointmentService>,
    pub stripe_settings: Arc<SettingsService>,
    pub email_settings: Arc<SettingsService>,
    pub email_subscribers: Arc<EmailSubscriberService>,
    pub email_templates: Arc<EmailTemplateService>,
    pub email_campaigns: Arc<EmailCampaignService>,
    pub storage: Arc<StorageService>,
}

impl Api {
    /// Connect to the hosted backend described by `config`
    pub fn connect(config: &BackendConfig) -> AppResult<Self> {
        config.validate()?;
        let gateway = Arc::new(RestBackend::new(config)?);
        let store = Arc::new(RestObjectStore::new(config)?);
        info!("Connecting to backend at {}", config.url);

        Ok(Self::with_backends(
            gateway,
            store,
            Arc::new(EventBus::new()),
            config.image_bucket.clone(),
        ))
    }

    /// Everything in process memory; nothing leaves the machine
    pub fn in_memory() -> Self {
        Self::with_backends(
            Arc::new(MemoryBackend::new()),
            Arc::new(MemoryObjectStore::default()),
            Arc::new(EventBus::new()),
            DEFAULT_IMAGE_BUCKET,
        )
    }

    /// Wire every service onto the given backends
    pub fn with_backends(
        gateway: Arc<dyn TableGateway>,
        store: Arc<dyn ObjectStore>,
        event_bus: Arc<EventBus>,
        image_bucket: impl Into<String>,
    ) -> Self {
        let repo = |table: TableSpec| RecordRepository::new(table, Arc::clone(&gateway));

        Self {
            sermons: Arc::new(SermonService::new(repo(tables::SERMONS), event_bus.clone())),
            events: Arc::new(EventService::new(repo(tables::EVENTS), event_bus.clone())),
            members: Arc::new(MemberService::new(repo(tables::MEMBERS))),
            gallery: Arc::new(GalleryService::new(repo(tables::GALLERY), event_bus.clone())),
            testimonials: Arc::new(TestimonialService::new(repo(tables::TESTIMONIALS))),
            prayer_requests: Arc::new(PrayerRequestService::new(repo(tables::PRAYER_REQUESTS))),
            donations: Arc::new(DonationService::new(repo(tables::DONATIONS))),
            users: Arc::new(UserService::new(repo(tables::PROFILES))),
            appointments: Arc::new(AppointmentService::new(
                repo(tables::APPOINTMENTS),
                event_bus.clone(),
            )),
            stripe_settings: Arc::new(SettingsService::new(repo(tables::STRIPE_SETTINGS))),
            email_settings: Arc::new(SettingsService::new(repo(tables::EMAIL_SETTINGS))),
            email_subscribers: Arc::new(EmailSubscriberService::new(repo(
                tables::EMAIL_SUBSCRIBERS,
            ))),
            email_templates: Arc::new(EmailTemplateService::new(repo(tables::EMAIL_TEMPLATES))),
            email_campaigns: Arc::new(EmailCampaignService::new(repo(tables::EMAIL_CAMPAIGNS))),
            storage: Arc::new(StorageService::new(store, image_bucket)),
            event_bus,
        }
    }
}
