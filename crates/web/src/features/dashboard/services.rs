use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use storage::{
    dto::dashboard::{AdminDashboardResponse, ParticipantDashboardResponse},
    dto::registration::RegistrationWithCompetition,
    dto::submission::SubmissionWithCompetition,
    error::Result,
    repository::{
        competition::CompetitionRepository, profile::ProfileRepository,
        registration::RegistrationRepository, submission::SubmissionRepository,
    },
    services::lifecycle,
};
use uuid::Uuid;

/// Assemble the participant landing page: the caller's registrations and
/// submissions, plus the registrations still owing a submission at `now`.
pub async fn participant_dashboard(
    pool: &PgPool,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<ParticipantDashboardResponse> {
    let profiles = ProfileRepository::new(pool);
    let registrations_repo = RegistrationRepository::new(pool);
    let submissions_repo = SubmissionRepository::new(pool);

    let profile = profiles.find_optional(user_id).await?;
    let profile_complete = profile
        .as_ref()
        .and_then(|p| p.full_name.as_deref())
        .is_some_and(|name| !name.is_empty());

    let registrations = registrations_repo
        .list_for_user_with_competitions(user_id)
        .await?;
    let submissions = submissions_repo.list_for_user(user_id).await?;

    let submitted_ids: HashSet<Uuid> = submissions
        .iter()
        .map(|row| row.submission.registration_id)
        .collect();

    let mut pending: Vec<RegistrationWithCompetition> =
        lifecycle::pending_submissions(&registrations, &submitted_ids, now)
            .into_iter()
            .cloned()
            .collect();
    pending.sort_by_key(|row| row.submission_deadline);

    // list_for_user is newest first, so the head of the list is the recency
    // window.
    let recent_submissions: Vec<SubmissionWithCompetition> =
        submissions.iter().take(3).cloned().collect();

    Ok(ParticipantDashboardResponse {
        profile_complete,
        registration_count: registrations.len(),
        submission_count: submissions.len(),
        pending_count: pending.len(),
        registrations,
        pending_submissions: pending,
        recent_submissions,
    })
}

/// Assemble the admin landing page: headline totals plus the latest
/// registrations and submissions.
pub async fn admin_dashboard(pool: &PgPool) -> Result<AdminDashboardResponse> {
    let competitions = CompetitionRepository::new(pool);
    let registrations = RegistrationRepository::new(pool);
    let submissions = SubmissionRepository::new(pool);
    let profiles = ProfileRepository::new(pool);

    let summaries = competitions.list_with_registration_counts().await?;
    let totals = lifecycle::aggregate_counts(&summaries);

    let total_submissions = submissions.count().await?;
    let total_users = profiles.count().await?;

    let recent_registrations = registrations.recent(5).await?;
    let recent_submissions = submissions.recent(5).await?;

    Ok(AdminDashboardResponse {
        total_competitions: totals.total_competitions,
        active_competitions: totals.active_competitions,
        total_participants: totals.total_participants,
        total_submissions,
        total_users,
        recent_registrations,
        recent_submissions,
    })
}
