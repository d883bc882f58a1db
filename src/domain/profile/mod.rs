pub mod entity;
pub mod invariants;

pub use entity::{NewProfile, Role};
pub use invariants::{ensure_can_demote, validate_email};
