use axum::{Json, extract::State};
use chrono::Utc;
use storage::{
    Database,
    dto::dashboard::{AdminDashboardResponse, ParticipantDashboardResponse},
};

use crate::error::WebError;
use crate::middleware::auth::{CurrentUser, RequireAdmin};

use super::services;

#[utoipa::path(
    get,
    path = "/api/dashboard",
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "Participant dashboard", body = ParticipantDashboardResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "dashboard"
)]
pub async fn participant_dashboard(
    State(db): State<Database>,
    CurrentUser(auth): CurrentUser,
) -> Result<Json<ParticipantDashboardResponse>, WebError> {
    let dashboard = services::participant_dashboard(db.pool(), auth.user_id, Utc::now()).await?;

    Ok(Json(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    security(
        ("user_id_header" = [])
    ),
    responses(
        (status = 200, description = "Admin dashboard", body = AdminDashboardResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "dashboard"
)]
pub async fn admin_dashboard(
    State(db): State<Database>,
    RequireAdmin(_auth): RequireAdmin,
) -> Result<Json<AdminDashboardResponse>, WebError> {
    let dashboard = services::admin_dashboard(db.pool()).await?;

    Ok(Json(dashboard))
}
