use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::Registration;
use crate::services::lifecycle::{RegistrationCounts, Searchable};

/// Request payload for registering the caller into a competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRegistrationRequest {
    pub competition_id: Uuid,

    #[validate(length(max = 255))]
    pub team_name: Option<String>,

    #[validate(length(max = 2000))]
    pub team_members: Option<String>,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Institution must be between 1 and 255 characters"
    ))]
    pub institution: String,

    #[validate(length(
        min = 1,
        max = 32,
        message = "Contact phone must be between 1 and 32 characters"
    ))]
    pub contact_phone: String,
}

/// Request payload for moving a registration to another status
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRegistrationStatusRequest {
    #[validate(custom(function = "validate_registration_status"))]
    pub status: String,
}

/// Response containing registration details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub competition_id: Uuid,
    pub team_name: Option<String>,
    pub team_members: Option<String>,
    pub institution: String,
    pub contact_phone: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A registration joined with the competition it belongs to, as shown on the
/// participant's own lists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RegistrationWithCompetition {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub registration: Registration,
    pub competition_name: String,
    pub competition_category: String,
    pub competition_status: String,
    pub submission_deadline: chrono::DateTime<chrono::Utc>,
}

/// A registration joined with participant and competition context, as shown
/// on admin lists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RegistrationDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub registration: Registration,
    pub participant_name: Option<String>,
    pub participant_email: Option<String>,
    pub competition_name: String,
    pub competition_category: String,
}

impl Searchable for RegistrationDetail {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.participant_name.as_deref(),
            self.participant_email.as_deref(),
            Some(self.registration.institution.as_str()),
            self.registration.team_name.as_deref(),
        ]
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRegistrationsQuery {
    pub competition_id: Option<Uuid>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl ListRegistrationsQuery {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref status) = self.status
            && !VALID_REGISTRATION_STATUSES.contains(&status.as_str())
        {
            return Err(format!(
                "status must be one of {VALID_REGISTRATION_STATUSES:?}"
            ));
        }

        Ok(())
    }
}

/// Response for admin registration lists: rows plus status tallies.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationListResponse {
    pub registrations: Vec<RegistrationDetail>,
    pub counts: RegistrationCounts,
}

// Validation helpers
const VALID_REGISTRATION_STATUSES: &[&str] = &["registered", "confirmed", "cancelled"];

fn validate_registration_status(status: &str) -> Result<(), validator::ValidationError> {
    if VALID_REGISTRATION_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_status"))
    }
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        Self {
            id: registration.id,
            user_id: registration.user_id,
            competition_id: registration.competition_id,
            team_name: registration.team_name,
            team_members: registration.team_members,
            institution: registration.institution,
            contact_phone: registration.contact_phone,
            status: registration.status,
            created_at: registration.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_update_accepts_known_values() {
        for status in ["registered", "confirmed", "cancelled"] {
            let request = UpdateRegistrationStatusRequest {
                status: status.to_string(),
            };
            assert!(request.validate().is_ok(), "{status} should be accepted");
        }
    }

    #[test]
    fn test_status_update_rejects_unknown_value() {
        let request = UpdateRegistrationStatusRequest {
            status: "waitlisted".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_requires_institution() {
        let request = CreateRegistrationRequest {
            competition_id: Uuid::new_v4(),
            team_name: None,
            team_members: None,
            institution: String::new(),
            contact_phone: "0812".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
