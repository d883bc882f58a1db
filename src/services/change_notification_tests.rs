// src/services/change_notification_tests.rs
//
// Change Notification Tests
//
// Every confirmed create/update/delete on sermons, events, gallery and
// appointments publishes exactly one event; everything else stays silent.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;
    use serde_json::json;

    use crate::backend::{Filter, MemoryBackend};
    use crate::domain::{record_id, AppointmentResponse, Record};
    use crate::events::{
        AdminAction, AppointmentsChanged, ChangePayload, EventBus, GalleryChanged, SermonsChanged,
    };
    use crate::repositories::tables::{
        APPOINTMENTS, DONATIONS, EVENTS, GALLERY, MEMBERS, PRAYER_REQUESTS, SERMONS, TESTIMONIALS,
    };
    use crate::repositories::RecordRepository;
    use crate::services::{
        AppointmentService, DonationService, EventService, GalleryService, MemberService, PrayerRequestService,
        SermonService, TestimonialService,
    };

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    struct Fixture {
        backend: Arc<MemoryBackend>,
        bus: Arc<EventBus>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                backend: Arc::new(MemoryBackend::new()),
                bus: Arc::new(EventBus::new()),
            }
        }

        fn repo(&self, table: crate::repositories::TableSpec) -> RecordRepository {
            RecordRepository::new(table, self.backend.clone())
        }

        fn event_types(&self) -> Vec<String> {
            self.bus
                .get_event_log()
                .into_iter()
                .map(|entry| entry.event_type)
                .collect()
        }
    }

    /// Collect every payload of one event type
    fn capture<E, F>(bus: &EventBus, extract: F) -> Arc<Mutex<Vec<ChangePayload>>>
    where
        E: crate::events::DomainEvent + 'static,
        F: Fn(&E) -> ChangePayload + Send + Sync + 'static,
    {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe::<E, _>(move |event| sink.lock().unwrap().push(extract(event)));
        seen
    }

    // ========================================================================
    // SERMONS
    // ========================================================================

    #[tokio::test]
    async fn test_sermon_lifecycle_emits_one_event_per_write() {
        let fx = Fixture::new();
        let seen = capture::<SermonsChanged, _>(&fx.bus, |e| e.payload.clone());
        let service = SermonService::new(fx.repo(SERMONS), fx.bus.clone());

        let created = service
            .create(record(json!({ "title": "The Prodigal Son", "sermon_date": "2024-03-10" })))
            .await
            .unwrap();
        let id = record_id(&created).unwrap();
        let updated = service
            .update(&id, record(json!({ "is_featured": true })))
            .await
            .unwrap();
        assert!(service.delete(&id).await.unwrap());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], ChangePayload::Record(created));
        assert_eq!(seen[1], ChangePayload::Record(updated));
        assert_eq!(seen[2], ChangePayload::removed(id));
        assert_eq!(fx.event_types(), vec!["sermonsChanged"; 3]);
    }

    #[tokio::test]
    async fn test_featured_sermons_newest_first_and_limited() {
        let fx = Fixture::new();
        fx.backend.seed(
            "sermons",
            vec![
                record(json!({ "id": "1", "is_featured": true, "sermon_date": "2024-01-07" })),
                record(json!({ "id": "2", "is_featured": true, "sermon_date": "2024-02-04" })),
                record(json!({ "id": "3", "is_featured": false, "sermon_date": "2024-03-03" })),
                record(json!({ "id": "4", "is_featured": true, "sermon_date": "2024-04-07" })),
                record(json!({ "id": "5", "is_featured": true, "sermon_date": "2024-05-05" })),
            ],
        );
        let service = SermonService::new(fx.repo(SERMONS), fx.bus.clone());

        let featured = service.get_featured_sermons(3).await.unwrap();

        let ids: Vec<_> = featured.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!("5"), json!("4"), json!("2")]);
        assert!(fx.event_types().is_empty());
    }

    // ========================================================================
    // EVENTS
    // ========================================================================

    #[tokio::test]
    async fn test_event_writes_emit_events_changed() {
        let fx = Fixture::new();
        let service = EventService::new(fx.repo(EVENTS), fx.bus.clone());

        let created = service
            .create(record(json!({ "title": "Harvest Supper", "event_date": "2024-10-12" })))
            .await
            .unwrap();
        service
            .delete(&record_id(&created).unwrap())
            .await
            .unwrap();

        assert_eq!(fx.event_types(), vec!["eventsChanged", "eventsChanged"]);
    }

    #[tokio::test]
    async fn test_upcoming_events_from_today() {
        let fx = Fixture::new();
        fx.backend.seed(
            "events",
            vec![
                record(json!({ "id": "past", "event_date": "2024-05-31" })),
                record(json!({ "id": "later", "event_date": "2024-07-14" })),
                record(json!({ "id": "today", "event_date": "2024-06-01" })),
                record(json!({ "id": "soon", "event_date": "2024-06-09" })),
                record(json!({ "id": "much_later", "event_date": "2024-12-24" })),
            ],
        );
        let service = EventService::new(fx.repo(EVENTS), fx.bus.clone());
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let upcoming = service.get_upcoming_events_from(today, 3).await.unwrap();

        let ids: Vec<_> = upcoming.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!("today"), json!("soon"), json!("later")]);
    }

    // ========================================================================
    // GALLERY
    // ========================================================================

    #[tokio::test]
    async fn test_gallery_update_and_delete_payloads() {
        let fx = Fixture::new();
        fx.backend.seed(
            "gallery",
            vec![record(json!({ "id": "g1", "title": "Baptism", "image_url": "https://x/a.png" }))],
        );
        let seen = capture::<GalleryChanged, _>(&fx.bus, |e| e.payload.clone());
        let service = GalleryService::new(fx.repo(GALLERY), fx.bus.clone());

        service
            .update("g1", record(json!({ "title": "River Baptism" })))
            .await
            .unwrap();
        service.delete("g1").await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        match &seen[0] {
            ChangePayload::Record(row) => assert_eq!(row["title"], json!("River Baptism")),
            other => panic!("expected record payload, got {:?}", other),
        }
        assert_eq!(
            serde_json::to_value(&seen[1]).unwrap(),
            json!({ "id": "g1" })
        );
    }

    #[tokio::test]
    async fn test_gallery_filtered_list_emits_nothing() {
        let fx = Fixture::new();
        fx.backend.seed(
            "gallery",
            vec![
                record(json!({ "id": "g1", "category": "worship", "created_at": "2024-05-01T10:00:00.000Z" })),
                record(json!({ "id": "g2", "category": "youth", "created_at": "2024-05-02T10:00:00.000Z" })),
                record(json!({ "id": "g3", "category": "worship", "created_at": "2024-05-03T10:00:00.000Z" })),
                record(json!({ "id": "g4", "category": "worship", "created_at": "2024-05-04T10:00:00.000Z" })),
            ],
        );
        let service = GalleryService::new(fx.repo(GALLERY), fx.bus.clone());

        let worship = service
            .list_where(vec![Filter::eq("category", "worship")], Some(2))
            .await
            .unwrap();

        let ids: Vec<_> = worship.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!("g4"), json!("g3")]);
        assert!(fx.event_types().is_empty());
    }

    // ========================================================================
    // APPOINTMENTS
    // ========================================================================

    #[tokio::test]
    async fn test_appointment_actions_are_tagged() {
        let fx = Fixture::new();
        let actions = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&actions);
        fx.bus.subscribe::<AppointmentsChanged, _>(move |event| {
            sink.lock().unwrap().push(event.action);
        });
        let service = AppointmentService::new(fx.repo(APPOINTMENTS), fx.bus.clone());

        let created = service
            .create(record(json!({ "name": "Martha", "status": "pending" })))
            .await
            .unwrap();
        let id = record_id(&created).unwrap();
        service
            .update(&id, record(json!({ "preferred_date": "2024-06-03" })))
            .await
            .unwrap();
        let response = AppointmentResponse {
            status: "confirmed".to_string(),
            admin_response: "See you Monday".to_string(),
            admin_notes: None,
            confirmed_date: Some("2024-06-03".to_string()),
            confirmed_time: Some("10:00".to_string()),
            responded_by: "admin-1".to_string(),
        };
        let answered = service.respond_to_appointment(&id, &response).await.unwrap();
        service.delete(&id).await.unwrap();

        assert_eq!(answered["status"], json!("confirmed"));
        assert_eq!(answered["responded_by"], json!("admin-1"));
        assert!(answered["responded_at"].is_string());
        assert!(answered.get("admin_notes").is_none());
        assert_eq!(
            *actions.lock().unwrap(),
            vec![
                AdminAction::Create,
                AdminAction::Update,
                AdminAction::RespondAppointment,
                AdminAction::Delete,
            ]
        );
    }

    #[tokio::test]
    async fn test_appointments_by_status() {
        let fx = Fixture::new();
        fx.backend.seed(
            "appointments",
            vec![
                record(json!({ "id": "a1", "status": "pending", "created_at": "2024-06-01T09:00:00.000Z" })),
                record(json!({ "id": "a2", "status": "confirmed", "created_at": "2024-06-02T09:00:00.000Z" })),
                record(json!({ "id": "a3", "status": "pending", "created_at": "2024-06-03T09:00:00.000Z" })),
            ],
        );
        let service = AppointmentService::new(fx.repo(APPOINTMENTS), fx.bus.clone());

        let pending = service.get_appointments_by_status("pending").await.unwrap();

        let ids: Vec<_> = pending.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!("a3"), json!("a1")]);
    }

    // ========================================================================
    // SILENT TABLES
    // ========================================================================

    #[tokio::test]
    async fn test_non_notifying_tables_emit_nothing() {
        let fx = Fixture::new();
        let members = MemberService::new(fx.repo(MEMBERS));
        let testimonials = TestimonialService::new(fx.repo(TESTIMONIALS));
        let prayers = PrayerRequestService::new(fx.repo(PRAYER_REQUESTS));

        let member = members.create(record(json!({ "name": "Dorcas" }))).await.unwrap();
        members
            .update(&record_id(&member).unwrap(), record(json!({ "name": "Tabitha" })))
            .await
            .unwrap();
        members.delete(&record_id(&member).unwrap()).await.unwrap();
        testimonials
            .create(record(json!({ "content": "Grateful", "is_approved": false })))
            .await
            .unwrap();
        prayers
            .create(record(json!({ "request": "Healing", "is_public": true })))
            .await
            .unwrap();

        assert!(fx.event_types().is_empty());
    }

    #[tokio::test]
    async fn test_donations_filtered_by_status() {
        let fx = Fixture::new();
        fx.backend.seed(
            "donations",
            vec![
                record(json!({ "id": "d1", "status": "completed", "amount": 50 })),
                record(json!({ "id": "d2", "status": "pending", "amount": 20 })),
                record(json!({ "id": "d3", "status": "completed", "amount": 100 })),
            ],
        );
        let service = DonationService::new(fx.repo(DONATIONS));

        let completed = service
            .list_where(vec![Filter::eq("status", "completed")], None)
            .await
            .unwrap();

        assert_eq!(completed.len(), 2);
        assert!(completed.iter().all(|r| r["status"] == json!("completed")));
    }

    #[tokio::test]
    async fn test_visibility_filters() {
        let fx = Fixture::new();
        fx.backend.seed(
            "testimonials",
            vec![
                record(json!({ "id": "t1", "is_approved": true })),
                record(json!({ "id": "t2", "is_approved": false })),
            ],
        );
        fx.backend.seed(
            "prayer_requests",
            vec![
                record(json!({ "id": "p1", "is_public": false })),
                record(json!({ "id": "p2", "is_public": true })),
            ],
        );
        let testimonials = TestimonialService::new(fx.repo(TESTIMONIALS));
        let prayers = PrayerRequestService::new(fx.repo(PRAYER_REQUESTS));

        let approved = testimonials.get_testimonials(true).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0]["id"], json!("t1"));
        assert_eq!(testimonials.get_testimonials(false).await.unwrap().len(), 2);

        let public = prayers.get_prayer_requests(true).await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0]["id"], json!("p2"));
        assert_eq!(prayers.get_prayer_requests(false).await.unwrap().len(), 2);
    }
}
