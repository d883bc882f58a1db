// src/repositories/tables.rs
//
// Remote tables this crate reads and writes.

use crate::backend::{Direction, Order};

/// Name, select clause and default ordering of one remote table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub select: &'static str,
    pub default_order: Option<(&'static str, Direction)>,
}

impl TableSpec {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            select: "*",
            default_order: None,
        }
    }

    pub const fn select(mut self, select: &'static str) -> Self {
        self.select = select;
        self
    }

    pub const fn ordered_by(mut self, column: &'static str, direction: Direction) -> Self {
        self.default_order = Some((column, direction));
        self
    }

    pub fn order(&self) -> Option<Order> {
        self.default_order.map(|(column, direction)| Order {
            column: column.to_string(),
            direction,
        })
    }
}

/// Tables listed newest row first
const fn newest_first(name: &'static str) -> TableSpec {
    TableSpec::new(name).ordered_by("created_at", Direction::Desc)
}

pub const SERMONS: TableSpec = TableSpec::new("sermons").ordered_by("sermon_date", Direction::Desc);
pub const EVENTS: TableSpec = TableSpec::new("events").ordered_by("event_date", Direction::Asc);
pub const MEMBERS: TableSpec = newest_first("members");
pub const GALLERY: TableSpec = newest_first("gallery");
pub const TESTIMONIALS: TableSpec = newest_first("testimonials");
pub const PRAYER_REQUESTS: TableSpec = newest_first("prayer_requests");
pub const DONATIONS: TableSpec = newest_first("donations");
pub const PROFILES: TableSpec = newest_first("profiles");

/// Appointments carry the e-mail of the admin who responded
pub const APPOINTMENTS: TableSpec = newest_first("appointments")
    .select("*, responded_by_profile:profiles!appointments_responded_by_fkey(email)");

pub const STRIPE_SETTINGS: TableSpec = TableSpec::new("stripe_settings");
pub const EMAIL_SETTINGS: TableSpec = TableSpec::new("email_settings");
pub const EMAIL_SUBSCRIBERS: TableSpec = newest_first("email_subscribers");
pub const EMAIL_TEMPLATES: TableSpec = newest_first("email_templates");
pub const EMAIL_CAMPAIGNS: TableSpec = newest_first("email_campaigns");
