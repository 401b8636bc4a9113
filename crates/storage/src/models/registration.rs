use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A participant's entry into a competition. At most one row may exist per
/// `(user_id, competition_id)` pair, enforced by a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Registration {
    pub id: Uuid,
    pub user_id: Uuid,
    pub competition_id: Uuid,
    pub team_name: Option<String>,
    pub team_members: Option<String>,
    pub institution: String,
    pub contact_phone: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
