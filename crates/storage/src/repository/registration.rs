use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::registration::{
    CreateRegistrationRequest, RegistrationDetail, RegistrationWithCompetition,
};
use crate::error::{Result, StorageError};
use crate::models::Registration;

const REGISTRATION_COLUMNS: &str = "id, user_id, competition_id, team_name, team_members, \
     institution, contact_phone, status, created_at";

const DETAIL_SELECT: &str = r#"
    SELECT r.id, r.user_id, r.competition_id, r.team_name, r.team_members,
           r.institution, r.contact_phone, r.status, r.created_at,
           p.full_name AS participant_name,
           p.email AS participant_email,
           c.name AS competition_name,
           c.category AS competition_category
    FROM registrations r
    LEFT JOIN profiles p ON p.id = r.user_id
    JOIN competitions c ON c.id = r.competition_id
    WHERE 1=1
"#;

/// Repository for Registration database operations
pub struct RegistrationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistrationRepository<'a> {
    /// Create a new RegistrationRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a registration for `user_id`.
    ///
    /// The `(user_id, competition_id)` unique constraint is the authority on
    /// duplicates; a violation surfaces as `DuplicateRegistration` so a race
    /// lost between pre-check and insert reports the same answer.
    pub async fn create(
        &self,
        user_id: Uuid,
        req: &CreateRegistrationRequest,
    ) -> Result<Registration> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            INSERT INTO registrations (
                user_id, competition_id, team_name, team_members,
                institution, contact_phone
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(req.competition_id)
        .bind(&req.team_name)
        .bind(&req.team_members)
        .bind(&req.institution)
        .bind(&req.contact_phone)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_unique_violation() {
                StorageError::DuplicateRegistration
            } else {
                err
            }
        })?;

        Ok(registration)
    }

    /// Get a registration by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Registration> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(registration)
    }

    /// Look up the unique registration for a user and competition, if any
    pub async fn find_for_user_and_competition(
        &self,
        user_id: Uuid,
        competition_id: Uuid,
    ) -> Result<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations \
             WHERE user_id = $1 AND competition_id = $2"
        ))
        .bind(user_id)
        .bind(competition_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(registration)
    }

    /// All registrations owned by a user, bare rows
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations \
             WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }

    /// All registrations owned by a user, joined with their competitions
    pub async fn list_for_user_with_competitions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RegistrationWithCompetition>> {
        let registrations = sqlx::query_as::<_, RegistrationWithCompetition>(
            r#"
            SELECT r.id, r.user_id, r.competition_id, r.team_name, r.team_members,
                   r.institution, r.contact_phone, r.status, r.created_at,
                   c.name AS competition_name,
                   c.category AS competition_category,
                   c.status AS competition_status,
                   c.submission_deadline
            FROM registrations r
            JOIN competitions c ON c.id = r.competition_id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }

    /// Admin view: registrations joined with participant and competition,
    /// optionally narrowed by competition and status
    pub async fn list_detailed(
        &self,
        competition_id: Option<Uuid>,
        status: Option<&str>,
    ) -> Result<Vec<RegistrationDetail>> {
        let mut query = QueryBuilder::new(DETAIL_SELECT);

        if let Some(competition_id) = competition_id {
            query.push(" AND r.competition_id = ");
            query.push_bind(competition_id);
        }

        if let Some(status) = status {
            query.push(" AND r.status = ");
            query.push_bind(status);
        }

        query.push(" ORDER BY r.created_at DESC");

        let registrations = query
            .build_query_as::<RegistrationDetail>()
            .fetch_all(self.pool)
            .await?;

        Ok(registrations)
    }

    /// Most recent registrations for the admin dashboard
    pub async fn recent(&self, limit: i64) -> Result<Vec<RegistrationDetail>> {
        let mut query = QueryBuilder::new(DETAIL_SELECT);
        query.push(" ORDER BY r.created_at DESC LIMIT ");
        query.push_bind(limit);

        let registrations = query
            .build_query_as::<RegistrationDetail>()
            .fetch_all(self.pool)
            .await?;

        Ok(registrations)
    }

    /// Move a registration to another status
    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Registration> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "UPDATE registrations SET status = $2 WHERE id = $1 \
             RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(registration)
    }
}
