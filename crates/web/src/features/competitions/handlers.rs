use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::common::EligibilityResponse,
    dto::competition::{
        CompetitionOverviewResponse, CompetitionResponse, CreateCompetitionRequest,
        ListCompetitionsQuery, UpdateCompetitionRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::{CurrentUser, RequireAdmin};

use super::services;

#[utoipa::path(
    get,
    path = "/api/competitions",
    params(ListCompetitionsQuery),
    responses(
        (status = 200, description = "List competitions successfully", body = Vec<CompetitionResponse>),
        (status = 400, description = "Unknown status filter")
    ),
    tag = "competitions"
)]
pub async fn list_competitions(
    State(db): State<Database>,
    Query(query): Query<ListCompetitionsQuery>,
) -> Result<Json<Vec<CompetitionResponse>>, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let competitions = services::list_competitions(db.pool(), query.status.as_deref()).await?;

    let response: Vec<CompetitionResponse> = competitions
        .into_iter()
        .map(CompetitionResponse::from)
        .collect();

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/competitions/summary",
    responses(
        (status = 200, description = "Aggregate totals with per-competition registration counts", body = CompetitionOverviewResponse)
    ),
    tag = "competitions"
)]
pub async fn competition_overview(State(db): State<Database>) -> Result<Response, WebError> {
    let overview = services::competition_overview(db.pool()).await?;

    Ok(Json(overview).into_response())
}

#[utoipa::path(
    get,
    path = "/api/competitions/{id}",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    responses(
        (status = 200, description = "Competition found", body = CompetitionResponse),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let competition = services::get_competition(db.pool(), id).await?;

    Ok(Json(CompetitionResponse::from(competition)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/eligibility",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "Eligibility verdict for registering", body = EligibilityResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn registration_eligibility(
    State(db): State<Database>,
    CurrentUser(auth): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let verdict = services::registration_eligibility(db.pool(), &auth, id, Utc::now()).await?;

    Ok(Json(EligibilityResponse::from(verdict)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/competitions",
    request_body = CreateCompetitionRequest,
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 201, description = "Competition created successfully", body = CompetitionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "competitions"
)]
pub async fn create_competition(
    State(db): State<Database>,
    RequireAdmin(_auth): RequireAdmin,
    Json(req): Json<CreateCompetitionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_deadlines()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let competition = services::create_competition(db.pool(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(CompetitionResponse::from(competition)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/competitions/{id}",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    request_body = UpdateCompetitionRequest,
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "Competition updated successfully", body = CompetitionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn update_competition(
    State(db): State<Database>,
    RequireAdmin(_auth): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateCompetitionRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let existing = services::get_competition(db.pool(), id).await?;

    update_req
        .validate_deadlines(&existing)
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let updated = services::update_competition(db.pool(), &existing, &update_req).await?;

    Ok(Json(CompetitionResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/competitions/{id}",
    params(
        ("id" = Uuid, Path, description = "Competition id")
    ),
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 204, description = "Competition deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn delete_competition(
    State(db): State<Database>,
    RequireAdmin(_auth): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_competition(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
