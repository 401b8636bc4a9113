use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::Submission;
use crate::services::lifecycle::{ReasonCode, SubmissionCounts};

/// Request payload for submitting work against a registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSubmissionRequest {
    pub registration_id: Uuid,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,

    #[validate(custom(function = "validate_link"))]
    pub file_url: String,

    #[validate(custom(function = "validate_link"))]
    pub additional_links: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Request payload for moving a submission through review
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSubmissionStatusRequest {
    #[validate(custom(function = "validate_review_status"))]
    pub status: String,
}

/// Response containing submission details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub additional_links: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A submission joined with the competition it was entered for, as shown on
/// the participant's own list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubmissionWithCompetition {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub submission: Submission,
    pub competition_name: String,
    pub competition_category: String,
    pub submission_deadline: chrono::DateTime<chrono::Utc>,
}

/// The participant's submissions page in one response: works already
/// handed in, and registrations still waiting on one.
#[derive(Debug, Serialize, ToSchema)]
pub struct MySubmissionsResponse {
    pub submissions: Vec<SubmissionWithCompetition>,
    /// Registrations still open for submission, oldest deadline first.
    pub pending_submissions: Vec<super::registration::RegistrationWithCompetition>,
}

/// A submission joined with participant and competition context, as shown on
/// admin lists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubmissionDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub submission: Submission,
    pub institution: String,
    pub participant_name: Option<String>,
    pub participant_email: Option<String>,
    pub competition_id: Uuid,
    pub competition_name: String,
    pub competition_category: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSubmissionsQuery {
    pub competition_id: Option<Uuid>,
    pub status: Option<String>,
}

impl ListSubmissionsQuery {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref status) = self.status
            && !VALID_REVIEW_STATUSES.contains(&status.as_str())
        {
            return Err(format!("status must be one of {VALID_REVIEW_STATUSES:?}"));
        }

        Ok(())
    }
}

/// Response for admin submission lists: rows plus review-status tallies.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionListResponse {
    pub submissions: Vec<SubmissionDetail>,
    pub counts: SubmissionCounts,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SubmissionEligibilityQuery {
    pub competition_id: Uuid,
}

/// Eligibility verdict for submitting into a competition, with enough
/// context for the client to route: the registration to submit against, or
/// the already-existing submission to show instead.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionEligibilityResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReasonCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_submission_id: Option<Uuid>,
}

// Validation helpers
const VALID_REVIEW_STATUSES: &[&str] = &["submitted", "reviewed", "approved", "rejected"];

fn validate_review_status(status: &str) -> Result<(), validator::ValidationError> {
    if VALID_REVIEW_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_status"))
    }
}

fn validate_link(link: &str) -> Result<(), validator::ValidationError> {
    if link.starts_with("http://") || link.starts_with("https://") {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_link"))
    }
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            registration_id: submission.registration_id,
            title: submission.title,
            description: submission.description,
            file_url: submission.file_url,
            additional_links: submission.additional_links,
            notes: submission.notes,
            status: submission.status,
            created_at: submission.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            registration_id: Uuid::new_v4(),
            title: "Urban Composting Study".to_string(),
            description: "Final paper and measurement data".to_string(),
            file_url: "https://drive.example.com/d/abc123".to_string(),
            additional_links: None,
            notes: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn test_file_url_must_be_http() {
        let mut request = base_request();
        request.file_url = "ftp://example.com/file".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_review_status_vocabulary() {
        for status in ["submitted", "reviewed", "approved", "rejected"] {
            let request = UpdateSubmissionStatusRequest {
                status: status.to_string(),
            };
            assert!(request.validate().is_ok(), "{status} should be accepted");
        }

        let request = UpdateSubmissionStatusRequest {
            status: "graded".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
