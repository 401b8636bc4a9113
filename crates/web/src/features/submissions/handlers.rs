use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{
    Database,
    dto::submission::{
        CreateSubmissionRequest, ListSubmissionsQuery, MySubmissionsResponse,
        SubmissionEligibilityQuery, SubmissionEligibilityResponse, SubmissionListResponse,
        SubmissionResponse, UpdateSubmissionStatusRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::{CurrentUser, RequireAdmin};

use super::services;

#[utoipa::path(
    get,
    path = "/api/submissions/eligibility",
    params(SubmissionEligibilityQuery),
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "Eligibility verdict for submitting", body = SubmissionEligibilityResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found")
    ),
    tag = "submissions"
)]
pub async fn submission_eligibility(
    State(db): State<Database>,
    CurrentUser(auth): CurrentUser,
    Query(query): Query<SubmissionEligibilityQuery>,
) -> Result<Json<SubmissionEligibilityResponse>, WebError> {
    let response =
        services::submission_eligibility(db.pool(), &auth, query.competition_id, Utc::now())
            .await?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = CreateSubmissionRequest,
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 201, description = "Submission created successfully", body = SubmissionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Registration not found"),
        (status = 409, description = "Submission not allowed")
    ),
    tag = "submissions"
)]
pub async fn create_submission(
    State(db): State<Database>,
    CurrentUser(auth): CurrentUser,
    Json(req): Json<CreateSubmissionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let submission = services::submit(db.pool(), &auth, &req, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse::from(submission)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions/mine",
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "The caller's submissions and pending registrations", body = MySubmissionsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "submissions"
)]
pub async fn my_submissions(
    State(db): State<Database>,
    CurrentUser(auth): CurrentUser,
) -> Result<Json<MySubmissionsResponse>, WebError> {
    let response = services::my_submissions(db.pool(), auth.user_id, Utc::now()).await?;

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/submissions/{id}",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "Submission found", body = SubmissionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Submission not found")
    ),
    tag = "submissions"
)]
pub async fn get_submission(
    State(db): State<Database>,
    CurrentUser(auth): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let submission = services::get_submission(db.pool(), &auth, id).await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/submissions",
    params(ListSubmissionsQuery),
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "All submissions with review tallies", body = SubmissionListResponse),
        (status = 400, description = "Unknown status filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "submissions"
)]
pub async fn list_submissions(
    State(db): State<Database>,
    RequireAdmin(_auth): RequireAdmin,
    Query(query): Query<ListSubmissionsQuery>,
) -> Result<Json<SubmissionListResponse>, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let response = services::list_submissions(db.pool(), &query).await?;

    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/submissions/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Submission id")
    ),
    request_body = UpdateSubmissionStatusRequest,
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "Submission status updated", body = SubmissionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Submission not found")
    ),
    tag = "submissions"
)]
pub async fn update_submission_status(
    State(db): State<Database>,
    RequireAdmin(_auth): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSubmissionStatusRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let submission = services::update_submission_status(db.pool(), id, &req.status).await?;

    Ok(Json(SubmissionResponse::from(submission)).into_response())
}
