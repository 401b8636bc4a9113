use chrono::{DateTime, Utc};
use sqlx::PgPool;
use storage::{
    dto::registration::{
        CreateRegistrationRequest, ListRegistrationsQuery, RegistrationListResponse,
        RegistrationWithCompetition,
    },
    error::Result,
    models::Registration,
    repository::{
        competition::CompetitionRepository, profile::ProfileRepository,
        registration::RegistrationRepository,
    },
    services::lifecycle::{self, AuthContext},
};
use uuid::Uuid;

use crate::error::WebError;

/// Register the caller into a competition, provided the lifecycle rules
/// allow it at instant `now`.
pub async fn register(
    pool: &PgPool,
    auth: &AuthContext,
    request: &CreateRegistrationRequest,
    now: DateTime<Utc>,
) -> std::result::Result<Registration, WebError> {
    let competitions = CompetitionRepository::new(pool);
    let registrations = RegistrationRepository::new(pool);

    let competition = competitions.find_by_id(request.competition_id).await?;
    let existing = registrations.list_for_user(auth.user_id).await?;

    let verdict = lifecycle::can_register(auth, &competition, &existing, now);
    if let Some(reason) = verdict.reason {
        return Err(WebError::Ineligible(reason));
    }

    // First-time participants may not have saved a profile yet, and the
    // registrations table holds a foreign key on profiles.
    ProfileRepository::new(pool).ensure_exists(auth.user_id).await?;

    Ok(registrations.create(auth.user_id, request).await?)
}

/// The caller's registrations, each joined with its competition.
pub async fn my_registrations(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<RegistrationWithCompetition>> {
    let repo = RegistrationRepository::new(pool);
    repo.list_for_user_with_competitions(user_id).await
}

/// Admin listing: filters, status tallies, and an optional free-text search.
///
/// The tallies are computed before the search term narrows the rows, so the
/// counts describe the whole filtered population rather than the page of
/// matches.
pub async fn list_registrations(
    pool: &PgPool,
    query: &ListRegistrationsQuery,
) -> Result<RegistrationListResponse> {
    let repo = RegistrationRepository::new(pool);

    let rows = repo
        .list_detailed(query.competition_id, query.status.as_deref())
        .await?;

    let counts = lifecycle::classify_registrations(rows.iter().map(|row| &row.registration))
        .counts();

    let registrations = match query.search {
        Some(ref term) => lifecycle::filter_by_search(&rows, term).cloned().collect(),
        None => rows,
    };

    Ok(RegistrationListResponse {
        registrations,
        counts,
    })
}

/// Move a registration to another status.
pub async fn update_registration_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<Registration> {
    let repo = RegistrationRepository::new(pool);
    repo.update_status(id, status).await
}
