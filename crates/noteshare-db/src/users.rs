//! User directory implementation.
//!
//! Only the slice of user data the note repository depends on lives here:
//! display names for denormalization and the upload/download counters that
//! get compensated as notes are created, downloaded, and deleted.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use noteshare_core::{now_utc, Error, Result, UserDirectory, UserProfile, UserRole};

/// PostgreSQL implementation of UserDirectory.
pub struct PgUserDirectory {
    pool: Pool<Postgres>,
}

impl PgUserDirectory {
    /// Create a new PgUserDirectory with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Register a directory entry. Authentication happens elsewhere; this
    /// only records the identity the repository denormalizes from.
    pub async fn create_user(&self, display_name: &str, role: UserRole) -> Result<UserProfile> {
        let name = display_name.trim();
        if name.is_empty() {
            return Err(Error::Validation("display name is required".to_string()));
        }

        let id = Uuid::new_v4();
        let now = now_utc();

        sqlx::query(
            "INSERT INTO app_user (id, display_name, role, created_at_utc) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(name)
        .bind(role.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(UserProfile {
            id,
            display_name: name.to_string(),
            role,
            upload_count: 0,
            download_count: 0,
            created_at_utc: now,
        })
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn get_user(&self, id: Uuid) -> Result<UserProfile> {
        let row = sqlx::query(
            "SELECT id, display_name, role, upload_count, download_count, created_at_utc \
             FROM app_user WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::UserNotFound(id))?;

        Ok(UserProfile {
            id: row.get("id"),
            display_name: row.get("display_name"),
            role: UserRole::parse(row.get("role"))?,
            upload_count: row.get("upload_count"),
            download_count: row.get("download_count"),
            created_at_utc: row.get("created_at_utc"),
        })
    }

    async fn increment_upload_count(&self, id: Uuid, delta: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE app_user \
             SET upload_count = GREATEST(upload_count + $2, 0) WHERE id = $1",
        )
        .bind(id)
        .bind(delta)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::UserNotFound(id));
        }
        Ok(())
    }

    async fn increment_download_count(&self, id: Uuid, delta: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE app_user \
             SET download_count = GREATEST(download_count + $2, 0) WHERE id = $1",
        )
        .bind(id)
        .bind(delta)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::UserNotFound(id));
        }
        Ok(())
    }
}
