use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::competition::{
    CompetitionSummary, CreateCompetitionRequest, UpdateCompetitionRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Competition;

const COMPETITION_COLUMNS: &str = "id, name, description, category, status, \
     registration_deadline, submission_deadline, announcement_date, \
     registration_fee, prize_pool, max_team_size, requirements, created_at";

/// Repository for Competition database operations
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    /// Create a new CompetitionRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List competitions, optionally narrowed to one status, newest first
    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Competition>> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {COMPETITION_COLUMNS} FROM competitions WHERE 1=1"
        ));

        if let Some(status) = status {
            query.push(" AND status = ");
            query.push_bind(status);
        }

        query.push(" ORDER BY created_at DESC");

        let competitions = query
            .build_query_as::<Competition>()
            .fetch_all(self.pool)
            .await?;

        Ok(competitions)
    }

    /// Get a competition by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(&format!(
            "SELECT {COMPETITION_COLUMNS} FROM competitions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    /// Create a new competition
    pub async fn create(&self, req: &CreateCompetitionRequest) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(&format!(
            r#"
            INSERT INTO competitions (
                name, description, category, status,
                registration_deadline, submission_deadline, announcement_date,
                registration_fee, prize_pool, max_team_size, requirements
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COMPETITION_COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.category)
        .bind(&req.status)
        .bind(req.registration_deadline)
        .bind(req.submission_deadline)
        .bind(req.announcement_date)
        .bind(req.registration_fee.unwrap_or(Decimal::ZERO))
        .bind(req.prize_pool)
        .bind(req.max_team_size)
        .bind(&req.requirements)
        .fetch_one(self.pool)
        .await?;

        Ok(competition)
    }

    /// Update an existing competition, keeping stored values for fields the
    /// request leaves out
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Competition,
        req: &UpdateCompetitionRequest,
    ) -> Result<Competition> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let description = req.description.as_ref().unwrap_or(&existing.description);
        let category = req.category.as_ref().unwrap_or(&existing.category);
        let status = req.status.as_ref().unwrap_or(&existing.status);
        let registration_deadline = req
            .registration_deadline
            .unwrap_or(existing.registration_deadline);
        let submission_deadline = req
            .submission_deadline
            .unwrap_or(existing.submission_deadline);
        let announcement_date = req.announcement_date.or(existing.announcement_date);
        let registration_fee = req.registration_fee.unwrap_or(existing.registration_fee);
        let prize_pool = req.prize_pool.or(existing.prize_pool);
        let max_team_size = req.max_team_size.unwrap_or(existing.max_team_size);
        let requirements = req.requirements.as_ref().or(existing.requirements.as_ref());

        let competition = sqlx::query_as::<_, Competition>(&format!(
            r#"
            UPDATE competitions
            SET name = $2,
                description = $3,
                category = $4,
                status = $5,
                registration_deadline = $6,
                submission_deadline = $7,
                announcement_date = $8,
                registration_fee = $9,
                prize_pool = $10,
                max_team_size = $11,
                requirements = $12
            WHERE id = $1
            RETURNING {COMPETITION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(category)
        .bind(status)
        .bind(registration_deadline)
        .bind(submission_deadline)
        .bind(announcement_date)
        .bind(registration_fee)
        .bind(prize_pool)
        .bind(max_team_size)
        .bind(requirements)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    /// Delete a competition by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM competitions WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Overview rows: one per competition with its registration count
    pub async fn list_with_registration_counts(&self) -> Result<Vec<CompetitionSummary>> {
        let summaries = sqlx::query_as::<_, CompetitionSummary>(
            r#"
            SELECT c.id, c.name, c.category, c.status,
                   c.registration_deadline, c.submission_deadline,
                   c.registration_fee, c.prize_pool, c.created_at,
                   COUNT(r.id) AS registration_count
            FROM competitions c
            LEFT JOIN registrations r ON r.competition_id = c.id
            GROUP BY c.id
            ORDER BY c.created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(summaries)
    }
}
