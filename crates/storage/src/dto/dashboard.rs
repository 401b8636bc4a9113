use serde::Serialize;
use utoipa::ToSchema;

use super::registration::RegistrationWithCompetition;
use super::submission::{SubmissionDetail, SubmissionWithCompetition};

/// Everything the participant landing page needs in one response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantDashboardResponse {
    pub profile_complete: bool,
    pub registration_count: usize,
    pub submission_count: usize,
    pub pending_count: usize,
    pub registrations: Vec<RegistrationWithCompetition>,
    /// Registrations still open for submission, oldest deadline first.
    pub pending_submissions: Vec<RegistrationWithCompetition>,
    pub recent_submissions: Vec<SubmissionWithCompetition>,
}

/// Headline totals and recent activity for the admin landing page.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDashboardResponse {
    pub total_competitions: i64,
    pub active_competitions: i64,
    pub total_participants: i64,
    pub total_submissions: i64,
    pub total_users: i64,
    pub recent_registrations: Vec<super::registration::RegistrationDetail>,
    pub recent_submissions: Vec<SubmissionDetail>,
}
