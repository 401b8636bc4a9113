use chrono::{DateTime, Utc};
use sqlx::PgPool;
use storage::{
    dto::competition::{
        CompetitionOverviewResponse, CreateCompetitionRequest, UpdateCompetitionRequest,
    },
    error::Result,
    models::Competition,
    repository::competition::CompetitionRepository,
    repository::registration::RegistrationRepository,
    services::lifecycle::{self, AuthContext, Eligibility},
};
use uuid::Uuid;

/// List competitions, optionally narrowed to one status
pub async fn list_competitions(
    pool: &PgPool,
    status: Option<&str>,
) -> Result<Vec<Competition>> {
    let repo = CompetitionRepository::new(pool);
    repo.list(status).await
}

/// Get competition by id
pub async fn get_competition(pool: &PgPool, id: Uuid) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new competition
pub async fn create_competition(
    pool: &PgPool,
    request: &CreateCompetitionRequest,
) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.create(request).await
}

/// Update a competition
pub async fn update_competition(
    pool: &PgPool,
    existing: &Competition,
    request: &UpdateCompetitionRequest,
) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.update(existing.id, existing, request).await
}

/// Delete a competition
pub async fn delete_competition(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = CompetitionRepository::new(pool);
    repo.delete(id).await
}

/// Aggregate totals plus per-competition registration counts
pub async fn competition_overview(pool: &PgPool) -> Result<CompetitionOverviewResponse> {
    let repo = CompetitionRepository::new(pool);
    let competitions = repo.list_with_registration_counts().await?;
    let totals = lifecycle::aggregate_counts(&competitions);

    Ok(CompetitionOverviewResponse {
        totals,
        competitions,
    })
}

/// Evaluate whether the caller may register for this competition right now
pub async fn registration_eligibility(
    pool: &PgPool,
    auth: &AuthContext,
    competition_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Eligibility> {
    let competition = CompetitionRepository::new(pool)
        .find_by_id(competition_id)
        .await?;
    let existing = RegistrationRepository::new(pool)
        .list_for_user(auth.user_id)
        .await?;

    Ok(lifecycle::can_register(auth, &competition, &existing, now))
}
