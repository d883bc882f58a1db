// src/services/user_service.rs
//
// User profiles and admin role management.
//
// CRITICAL RULES:
// - The last admin can never be demoted through this service
// - Count failures propagate; a failed count never allows a demotion
// - Rejected operations issue no write

use log::{info, warn};
use serde::Serialize;
use serde_json::json;

use crate::backend::Filter;
use crate::domain::{ensure_can_demote, to_record, validate_email, NewProfile, Record, Role};
use crate::error::AppResult;
use crate::repositories::RecordRepository;
use crate::services::record_service::RecordService;

/// Result of inviting a user by e-mail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InviteOutcome {
    pub success: bool,
    pub message: String,
    pub record: Record,
}

pub struct UserService {
    records: RecordService,
}

impl UserService {
    pub fn new(repo: RecordRepository) -> Self {
        Self {
            records: RecordService::new(repo),
        }
    }

    fn repo(&self) -> &RecordRepository {
        self.records.repository()
    }

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

    pub async fn get_by_id(&self, id: &str) -> AppResult<Record> {
        self.records.get_by_id(id).await
    }

    pub async fn update(&self, id: &str, changes: Record) -> AppResult<Record> {
        self.records.update(id, changes).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        self.records.delete(id).await
    }

    /// Create a profile for `email`; the role defaults to admin
    pub async fn invite_admin(&self, email: &str, role: Option<Role>) -> AppResult<InviteOutcome> {
        let record = self.add_user(email, role.unwrap_or(Role::Admin)).await?;

        Ok(InviteOutcome {
            success: true,
            message: "User added successfully".to_string(),
            record,
        })
    }

    /// Insert a profile directly, without a registration step
    pub async fn add_user(&self, email: &str, role: Role) -> AppResult<Record> {
        let profile = NewProfile::new(email, role);
        if let Err(e) = validate_email(&profile.email) {
            warn!("Rejected profile for '{}': {}", email, e);
            return Err(e.into());
        }

        let stored = self.repo().insert(to_record(&profile)?).await?;
        info!("Added {} profile for {}", profile.role, profile.email);
        Ok(stored)
    }

    /// Number of profiles with the admin role
    pub async fn get_admin_count(&self) -> AppResult<u64> {
        self.repo()
            .count(vec![Filter::eq("role", Role::Admin.as_str())])
            .await
    }

    pub async fn update_user_role(&self, id: &str, role: Role) -> AppResult<Record> {
        let mut changes = Record::new();
        changes.insert("role".to_string(), json!(role));

        let updated = self.repo().update_by_id(id, changes).await?;
        info!("Set role of user {} to {}", id, role);
        Ok(updated)
    }

    pub async fn promote_to_admin(&self, user_id: &str) -> AppResult<Record> {
        self.update_user_role(user_id, Role::Admin).await
    }

    /// Demote an admin to a regular user, unless they are the last admin.
    ///
    /// The count and the update are two separate requests; two concurrent
    /// demotions can both pass the check.
    pub async fn demote_from_admin(&self, user_id: &str) -> AppResult<Record> {
        let admin_count = self.get_admin_count().await?;

        if let Err(e) = ensure_can_demote(admin_count) {
            warn!(
                "Refused to demote user {}: {} admin(s) remaining",
                user_id, admin_count
            );
            return Err(e.into());
        }

        self.update_user_role(user_id, Role::User).await
    }
}
