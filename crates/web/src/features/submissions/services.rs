use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use storage::{
    dto::registration::RegistrationWithCompetition,
    dto::submission::{
        CreateSubmissionRequest, ListSubmissionsQuery, MySubmissionsResponse,
        SubmissionEligibilityResponse, SubmissionListResponse,
    },
    error::Result,
    models::Submission,
    repository::{
        competition::CompetitionRepository, registration::RegistrationRepository,
        submission::SubmissionRepository,
    },
    services::lifecycle::{self, AuthContext},
};
use uuid::Uuid;

use crate::error::WebError;

/// Evaluate whether the caller may submit into `competition_id` right now,
/// and return enough context for the client to route either way.
pub async fn submission_eligibility(
    pool: &PgPool,
    auth: &AuthContext,
    competition_id: Uuid,
    now: DateTime<Utc>,
) -> Result<SubmissionEligibilityResponse> {
    let competitions = CompetitionRepository::new(pool);
    let registrations = RegistrationRepository::new(pool);
    let submissions = SubmissionRepository::new(pool);

    let competition = competitions.find_by_id(competition_id).await?;
    let registration = registrations
        .find_for_user_and_competition(auth.user_id, competition_id)
        .await?;

    let existing = match registration {
        Some(ref registration) => submissions.find_by_registration(registration.id).await?,
        None => None,
    };

    let verdict = lifecycle::can_submit(
        auth,
        registration.as_ref(),
        &competition,
        existing.as_ref(),
        now,
    );

    Ok(SubmissionEligibilityResponse {
        allowed: verdict.allowed,
        reason: verdict.reason,
        message: verdict.reason.map(|reason| reason.message().to_string()),
        registration_id: registration.map(|r| r.id),
        existing_submission_id: existing.map(|s| s.id),
    })
}

/// Submit work against one of the caller's registrations, provided the
/// lifecycle rules allow it at instant `now`.
pub async fn submit(
    pool: &PgPool,
    auth: &AuthContext,
    request: &CreateSubmissionRequest,
    now: DateTime<Utc>,
) -> std::result::Result<Submission, WebError> {
    let competitions = CompetitionRepository::new(pool);
    let registrations = RegistrationRepository::new(pool);
    let submissions = SubmissionRepository::new(pool);

    let registration = registrations.find_by_id(request.registration_id).await?;
    if registration.user_id != auth.user_id {
        // Do not reveal that someone else's registration exists.
        return Err(WebError::NotFound);
    }

    let competition = competitions.find_by_id(registration.competition_id).await?;
    let existing = submissions.find_by_registration(registration.id).await?;

    let verdict = lifecycle::can_submit(
        auth,
        Some(&registration),
        &competition,
        existing.as_ref(),
        now,
    );
    if let Some(reason) = verdict.reason {
        return Err(WebError::Ineligible(reason));
    }

    Ok(submissions.create(request).await?)
}

/// The caller's submissions page: works already handed in, plus the
/// registrations still owing a submission at `now`.
pub async fn my_submissions(
    pool: &PgPool,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<MySubmissionsResponse> {
    let submissions = SubmissionRepository::new(pool).list_for_user(user_id).await?;
    let registrations = RegistrationRepository::new(pool)
        .list_for_user_with_competitions(user_id)
        .await?;

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

    Ok(MySubmissionsResponse {
        submissions,
        pending_submissions: pending,
    })
}

/// Fetch one submission, hiding other participants' submissions from
/// non-admin callers.
pub async fn get_submission(
    pool: &PgPool,
    auth: &AuthContext,
    id: Uuid,
) -> std::result::Result<Submission, WebError> {
    let submissions = SubmissionRepository::new(pool);

    let submission = submissions.find_by_id(id).await?;

    if !auth.is_admin() {
        let registration = RegistrationRepository::new(pool)
            .find_by_id(submission.registration_id)
            .await?;
        if registration.user_id != auth.user_id {
            return Err(WebError::NotFound);
        }
    }

    Ok(submission)
}

/// Admin listing: filters plus review-status tallies over the filtered rows.
pub async fn list_submissions(
    pool: &PgPool,
    query: &ListSubmissionsQuery,
) -> Result<SubmissionListResponse> {
    let repo = SubmissionRepository::new(pool);

    let rows = repo
        .list_detailed(query.competition_id, query.status.as_deref())
        .await?;

    let counts = lifecycle::classify_submissions(rows.iter().map(|row| &row.submission)).counts();

    Ok(SubmissionListResponse {
        submissions: rows,
        counts,
    })
}

/// Move a submission through review.
pub async fn update_submission_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<Submission> {
    let repo = SubmissionRepository::new(pool);
    repo.update_status(id, status).await
}
