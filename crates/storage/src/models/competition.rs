use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Raw status string as stored; interpret through `CompetitionStatus::parse`.
    pub status: String,
    pub registration_deadline: DateTime<Utc>,
    pub submission_deadline: DateTime<Utc>,
    pub announcement_date: Option<DateTime<Utc>>,
    pub registration_fee: Decimal,
    pub prize_pool: Option<Decimal>,
    pub max_team_size: i16,
    pub requirements: Option<String>,
    pub created_at: DateTime<Utc>,
}
