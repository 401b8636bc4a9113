use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::submission::{CreateSubmissionRequest, SubmissionDetail, SubmissionWithCompetition};
use crate::error::{Result, StorageError};
use crate::models::Submission;

const SUBMISSION_COLUMNS: &str = "id, registration_id, title, description, file_url, \
     additional_links, notes, status, created_at";

const DETAIL_SELECT: &str = r#"
    SELECT s.id, s.registration_id, s.title, s.description, s.file_url,
           s.additional_links, s.notes, s.status, s.created_at,
           r.institution,
           p.full_name AS participant_name,
           p.email AS participant_email,
           c.id AS competition_id,
           c.name AS competition_name,
           c.category AS competition_category
    FROM submissions s
    JOIN registrations r ON r.id = s.registration_id
    LEFT JOIN profiles p ON p.id = r.user_id
    JOIN competitions c ON c.id = r.competition_id
    WHERE 1=1
"#;

/// Repository for Submission database operations
pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepository<'a> {
    /// Create a new SubmissionRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert the submission for a registration.
    ///
    /// The unique constraint on `registration_id` is the authority on
    /// duplicates; a violation surfaces as `DuplicateSubmission` so a race
    /// lost between pre-check and insert reports the same answer.
    pub async fn create(&self, req: &CreateSubmissionRequest) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            r#"
            INSERT INTO submissions (
                registration_id, title, description, file_url,
                additional_links, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SUBMISSION_COLUMNS}
            "#
        ))
        .bind(req.registration_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.file_url)
        .bind(&req.additional_links)
        .bind(&req.notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_unique_violation() {
                StorageError::DuplicateSubmission
            } else {
                err
            }
        })?;

        Ok(submission)
    }

    /// Get a submission by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(submission)
    }

    /// The unique submission for a registration, if one exists
    pub async fn find_by_registration(&self, registration_id: Uuid) -> Result<Option<Submission>> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE registration_id = $1"
        ))
        .bind(registration_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(submission)
    }

    /// All submissions owned by a user, joined with their competitions
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SubmissionWithCompetition>> {
        let submissions = sqlx::query_as::<_, SubmissionWithCompetition>(
            r#"
            SELECT s.id, s.registration_id, s.title, s.description, s.file_url,
                   s.additional_links, s.notes, s.status, s.created_at,
                   c.name AS competition_name,
                   c.category AS competition_category,
                   c.submission_deadline
            FROM submissions s
            JOIN registrations r ON r.id = s.registration_id
            JOIN competitions c ON c.id = r.competition_id
            WHERE r.user_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(submissions)
    }

    /// Admin view: submissions joined with participant and competition,
    /// optionally narrowed by competition and review status
    pub async fn list_detailed(
        &self,
        competition_id: Option<Uuid>,
        status: Option<&str>,
    ) -> Result<Vec<SubmissionDetail>> {
        let mut query = QueryBuilder::new(DETAIL_SELECT);

        if let Some(competition_id) = competition_id {
            query.push(" AND c.id = ");
            query.push_bind(competition_id);
        }

        if let Some(status) = status {
            query.push(" AND s.status = ");
            query.push_bind(status);
        }

        query.push(" ORDER BY s.created_at DESC");

        let submissions = query
            .build_query_as::<SubmissionDetail>()
            .fetch_all(self.pool)
            .await?;

        Ok(submissions)
    }

    /// Most recent submissions for the admin dashboard
    pub async fn recent(&self, limit: i64) -> Result<Vec<SubmissionDetail>> {
        let mut query = QueryBuilder::new(DETAIL_SELECT);
        query.push(" ORDER BY s.created_at DESC LIMIT ");
        query.push_bind(limit);

        let submissions = query
            .build_query_as::<SubmissionDetail>()
            .fetch_all(self.pool)
            .await?;

        Ok(submissions)
    }

    /// Move a submission through review
    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            "UPDATE submissions SET status = $2 WHERE id = $1 \
             RETURNING {SUBMISSION_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(submission)
    }

    /// Count all submissions
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM submissions")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
