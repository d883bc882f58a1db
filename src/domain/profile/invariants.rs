use crate::domain::{DomainError, DomainResult};

/// The admin set must never become empty through a demotion.
///
/// `admin_count` is the number of profiles currently holding the admin role,
/// read immediately before the demotion is attempted.
pub fn ensure_can_demote(admin_count: u64) -> DomainResult<()> {
    if admin_count <= 1 {
        return Err(DomainError::LastAdmin);
    }
    Ok(())
}

/// Email cannot be empty and must contain a single `@` with text on both sides
pub fn validate_email(email: &str) -> DomainResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Email cannot be empty".to_string(),
        ));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(DomainError::InvariantViolation(format!(
            "'{}' is not an email address",
            email
        ))),
    }
}
