use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::profile::{ListProfilesQuery, ProfileResponse, UpsertProfileRequest},
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::{CurrentUser, RequireAdmin};

use super::services;

#[utoipa::path(
    get,
    path = "/api/profile",
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "The caller's profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not saved yet")
    ),
    tag = "profiles"
)]
pub async fn get_profile(
    State(db): State<Database>,
    CurrentUser(auth): CurrentUser,
) -> Result<Response, WebError> {
    let profile = services::get_profile(db.pool(), auth.user_id).await?;

    Ok(Json(ProfileResponse::from(profile)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = UpsertProfileRequest,
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "Profile saved", body = ProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "profiles"
)]
pub async fn upsert_profile(
    State(db): State<Database>,
    CurrentUser(auth): CurrentUser,
    Json(req): Json<UpsertProfileRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let profile = services::upsert_profile(db.pool(), auth.user_id, &req).await?;

    Ok(Json(ProfileResponse::from(profile)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/profiles",
    params(ListProfilesQuery),
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "All profiles", body = Vec<ProfileResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "profiles"
)]
pub async fn list_profiles(
    State(db): State<Database>,
    RequireAdmin(_auth): RequireAdmin,
    Query(query): Query<ListProfilesQuery>,
) -> Result<Json<Vec<ProfileResponse>>, WebError> {
    let profiles = services::list_profiles(db.pool(), &query).await?;

    Ok(Json(profiles))
}
