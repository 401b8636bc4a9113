use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::services::lifecycle::CompetitionTotals;

/// Request payload for creating a new competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompetitionRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,

    #[validate(custom(function = "validate_category"))]
    pub category: String,

    #[validate(custom(function = "validate_status"))]
    #[serde(default = "default_status")]
    pub status: String,

    pub registration_deadline: DateTime<Utc>,

    pub submission_deadline: DateTime<Utc>,

    pub announcement_date: Option<DateTime<Utc>>,

    #[validate(custom(function = "validate_non_negative"))]
    pub registration_fee: Option<Decimal>,

    #[validate(custom(function = "validate_non_negative"))]
    pub prize_pool: Option<Decimal>,

    #[validate(range(min = 1, max = 50, message = "Team size must be between 1 and 50"))]
    #[serde(default = "default_max_team_size")]
    pub max_team_size: i16,

    #[validate(length(max = 5000))]
    pub requirements: Option<String>,
}

/// Request payload for updating an existing competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCompetitionRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,

    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,

    pub registration_deadline: Option<DateTime<Utc>>,

    pub submission_deadline: Option<DateTime<Utc>>,

    pub announcement_date: Option<DateTime<Utc>>,

    #[validate(custom(function = "validate_non_negative"))]
    pub registration_fee: Option<Decimal>,

    #[validate(custom(function = "validate_non_negative"))]
    pub prize_pool: Option<Decimal>,

    #[validate(range(min = 1, max = 50))]
    pub max_team_size: Option<i16>,

    #[validate(length(max = 5000))]
    pub requirements: Option<String>,
}

/// Response containing competition details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub registration_deadline: DateTime<Utc>,
    pub submission_deadline: DateTime<Utc>,
    pub announcement_date: Option<DateTime<Utc>>,
    pub registration_fee: Decimal,
    pub prize_pool: Option<Decimal>,
    pub max_team_size: i16,
    pub requirements: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One row of the competition overview: core fields plus the number of
/// registrations, which is NULL-able in the aggregating query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CompetitionSummary {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub status: String,
    pub registration_deadline: DateTime<Utc>,
    pub submission_deadline: DateTime<Utc>,
    pub registration_fee: Decimal,
    pub prize_pool: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub registration_count: Option<i64>,
}

/// Response for the overview endpoint: aggregate totals plus per-competition rows.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompetitionOverviewResponse {
    pub totals: CompetitionTotals,
    pub competitions: Vec<CompetitionSummary>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCompetitionsQuery {
    pub status: Option<String>,
}

impl ListCompetitionsQuery {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref status) = self.status
            && !VALID_STATUSES.contains(&status.as_str())
        {
            return Err(format!("status must be one of {VALID_STATUSES:?}"));
        }

        Ok(())
    }
}

// Validation helpers
const VALID_STATUSES: &[&str] = &["open", "closed", "upcoming"];
const VALID_CATEGORIES: &[&str] = &["LKTI", "Business Competition", "Other"];

fn default_status() -> String {
    "open".to_string()
}

fn default_max_team_size() -> i16 {
    1
}

fn validate_status(status: &str) -> Result<(), validator::ValidationError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_status"))
    }
}

fn validate_category(category: &str) -> Result<(), validator::ValidationError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_category"))
    }
}

fn validate_non_negative(amount: &Decimal) -> Result<(), validator::ValidationError> {
    if *amount < Decimal::ZERO {
        Err(validator::ValidationError::new("negative_amount"))
    } else {
        Ok(())
    }
}

impl CreateCompetitionRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_deadlines(&self) -> Result<(), &'static str> {
        if self.submission_deadline < self.registration_deadline {
            return Err("Submission deadline must be on or after registration deadline");
        }

        Ok(())
    }
}

impl UpdateCompetitionRequest {
    /// Cross-field check against the stored row, since either deadline may be
    /// omitted from the request.
    pub fn validate_deadlines(
        &self,
        existing: &crate::models::Competition,
    ) -> Result<(), &'static str> {
        let registration = self
            .registration_deadline
            .unwrap_or(existing.registration_deadline);
        let submission = self
            .submission_deadline
            .unwrap_or(existing.submission_deadline);

        if submission < registration {
            return Err("Submission deadline must be on or after registration deadline");
        }

        Ok(())
    }
}

impl From<crate::models::Competition> for CompetitionResponse {
    fn from(comp: crate::models::Competition) -> Self {
        Self {
            id: comp.id,
            name: comp.name,
            description: comp.description,
            category: comp.category,
            status: comp.status,
            registration_deadline: comp.registration_deadline,
            submission_deadline: comp.submission_deadline,
            announcement_date: comp.announcement_date,
            registration_fee: comp.registration_fee,
            prize_pool: comp.prize_pool,
            max_team_size: comp.max_team_size,
            requirements: comp.requirements,
            created_at: comp.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_request() -> CreateCompetitionRequest {
        CreateCompetitionRequest {
            name: "Green Innovation Challenge".to_string(),
            description: "Annual environmental innovation contest".to_string(),
            category: "LKTI".to_string(),
            status: "open".to_string(),
            registration_deadline: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            submission_deadline: Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap(),
            announcement_date: None,
            registration_fee: Some(Decimal::new(50_000, 0)),
            prize_pool: None,
            max_team_size: 3,
            requirements: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let request = base_request();
        assert!(request.validate().is_ok());
        assert!(request.validate_deadlines().is_ok());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut request = base_request();
        request.status = "archived".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let mut request = base_request();
        request.category = "Hackathon".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_fee_rejected() {
        let mut request = base_request();
        request.registration_fee = Some(Decimal::new(-1, 0));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_submission_before_registration_rejected() {
        let mut request = base_request();
        request.submission_deadline = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        assert!(request.validate_deadlines().is_err());
    }

    #[test]
    fn test_list_query_rejects_unknown_status() {
        let query = ListCompetitionsQuery {
            status: Some("live".to_string()),
        };
        assert!(query.validate().is_err());

        let query = ListCompetitionsQuery {
            status: Some("upcoming".to_string()),
        };
        assert!(query.validate().is_ok());
    }
}
