// src/domain/appointment.rs

use serde::{Deserialize, Serialize};

/// An administrator's answer to an appointment request.
///
/// `status` values (`confirmed`, `declined`, ...) are defined by the backend
/// schema and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub status: String,
    pub admin_response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_time: Option<String>,
    pub responded_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_are_omitted() {
        let response = AppointmentResponse {
            status: "declined".to_string(),
            admin_response: "Fully booked that week".to_string(),
            admin_notes: None,
            confirmed_date: None,
            confirmed_time: None,
            responded_by: "admin-1".to_string(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "declined",
                "admin_response": "Fully booked that week",
                "responded_by": "admin-1",
            })
        );
    }
}
