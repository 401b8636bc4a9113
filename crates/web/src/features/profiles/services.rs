use sqlx::PgPool;
use storage::{
    dto::profile::{ListProfilesQuery, ProfileResponse, UpsertProfileRequest},
    error::Result,
    models::Profile,
    repository::profile::ProfileRepository,
    services::lifecycle,
};
use uuid::Uuid;

/// The caller's own profile.
pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Profile> {
    let repo = ProfileRepository::new(pool);
    repo.find_by_id(user_id).await
}

/// Create or update the caller's profile.
pub async fn upsert_profile(
    pool: &PgPool,
    user_id: Uuid,
    request: &UpsertProfileRequest,
) -> Result<Profile> {
    let repo = ProfileRepository::new(pool);
    repo.upsert(user_id, request).await
}

/// Admin listing of all profiles with an optional free-text search.
pub async fn list_profiles(
    pool: &PgPool,
    query: &ListProfilesQuery,
) -> Result<Vec<ProfileResponse>> {
    let repo = ProfileRepository::new(pool);

    let profiles: Vec<ProfileResponse> = repo
        .list()
        .await?
        .into_iter()
        .map(ProfileResponse::from)
        .collect();

    let profiles = match query.search {
        Some(ref term) => lifecycle::filter_by_search(&profiles, term)
            .cloned()
            .collect(),
        None => profiles,
    };

    Ok(profiles)
}
