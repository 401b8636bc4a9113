use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::services::lifecycle::Searchable;

/// Request payload for creating or replacing the caller's profile.
///
/// Email and role are deliberately absent: email comes from the identity
/// provider and role changes are out of band.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertProfileRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Full name must be between 1 and 255 characters"
    ))]
    pub full_name: String,

    #[validate(length(max = 32))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub institution: Option<String>,
}

/// Response containing profile details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub institution: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Searchable for ProfileResponse {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.full_name.as_deref(),
            self.email.as_deref(),
            self.institution.as_deref(),
        ]
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListProfilesQuery {
    pub search: Option<String>,
}

impl From<crate::models::Profile> for ProfileResponse {
    fn from(profile: crate::models::Profile) -> Self {
        Self {
            id: profile.id,
            full_name: profile.full_name,
            email: profile.email,
            phone: profile.phone,
            institution: profile.institution,
            role: profile.role,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_full_name_rejected() {
        let request = UpsertProfileRequest {
            full_name: String::new(),
            phone: None,
            institution: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_minimal_request_passes() {
        let request = UpsertProfileRequest {
            full_name: "Siti Rahma".to_string(),
            phone: Some("+62 812 3456 7890".to_string()),
            institution: None,
        };
        assert!(request.validate().is_ok());
    }
}
