use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::registration::{
        CreateRegistrationRequest, ListRegistrationsQuery, RegistrationListResponse,
        RegistrationResponse, RegistrationWithCompetition, UpdateRegistrationStatusRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::{CurrentUser, RequireAdmin};

use super::services;

#[utoipa::path(
    post,
    path = "/api/registrations",
    request_body = CreateRegistrationRequest,
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 201, description = "Registration created successfully", body = RegistrationResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found"),
        (status = 409, description = "Registration not allowed")
    ),
    tag = "registrations"
)]
pub async fn create_registration(
    State(db): State<Database>,
    CurrentUser(auth): CurrentUser,
    Json(req): Json<CreateRegistrationRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let registration = services::register(db.pool(), &auth, &req, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse::from(registration)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/registrations/mine",
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "The caller's registrations", body = Vec<RegistrationWithCompetition>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "registrations"
)]
pub async fn my_registrations(
    State(db): State<Database>,
    CurrentUser(auth): CurrentUser,
) -> Result<Json<Vec<RegistrationWithCompetition>>, WebError> {
    let registrations = services::my_registrations(db.pool(), auth.user_id).await?;

    Ok(Json(registrations))
}

#[utoipa::path(
    get,
    path = "/api/registrations",
    params(ListRegistrationsQuery),
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "All registrations with status tallies", body = RegistrationListResponse),
        (status = 400, description = "Unknown status filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "registrations"
)]
pub async fn list_registrations(
    State(db): State<Database>,
    RequireAdmin(_auth): RequireAdmin,
    Query(query): Query<ListRegistrationsQuery>,
) -> Result<Json<RegistrationListResponse>, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let response = services::list_registrations(db.pool(), &query).await?;

    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/registrations/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Registration id")
    ),
    request_body = UpdateRegistrationStatusRequest,
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "Registration status updated", body = RegistrationResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Registration not found")
    ),
    tag = "registrations"
)]
pub async fn update_registration_status(
    State(db): State<Database>,
    RequireAdmin(_auth): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRegistrationStatusRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let registration = services::update_registration_status(db.pool(), id, &req.status).await?;

    Ok(Json(RegistrationResponse::from(registration)).into_response())
}
