use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::profile::UpsertProfileRequest;
use crate::error::{Result, StorageError};
use crate::models::Profile;

const PROFILE_COLUMNS: &str =
    "id, full_name, email, phone, institution, role, created_at, updated_at";

/// Repository for Profile database operations
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new ProfileRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Profile> {
        self.find_optional(id).await?.ok_or(StorageError::NotFound)
    }

    /// Get a profile by ID, or None when the user has never saved one
    pub async fn find_optional(&self, id: Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    /// Make sure a row exists for this user so foreign keys hold. New rows
    /// start with the default role and empty contact fields.
    pub async fn ensure_exists(&self, id: Uuid) -> Result<()> {
        sqlx::query("INSERT INTO profiles (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Create or replace the caller-editable part of a profile. Email and
    /// role are never writable through this path.
    pub async fn upsert(&self, id: Uuid, req: &UpsertProfileRequest) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (id, full_name, phone, institution)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET full_name = EXCLUDED.full_name,
                phone = EXCLUDED.phone,
                institution = EXCLUDED.institution,
                updated_at = now()
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&req.full_name)
        .bind(&req.phone)
        .bind(&req.institution)
        .fetch_one(self.pool)
        .await?;

        Ok(profile)
    }

    /// List all profiles, newest first
    pub async fn list(&self) -> Result<Vec<Profile>> {
        let profiles = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(profiles)
    }

    /// Count all profiles
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
