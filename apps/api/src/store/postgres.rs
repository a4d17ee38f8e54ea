use async_trait::async_trait;
use sqlx::PgPool;

use super::{ResumeStore, StoredResume};
use crate::errors::AppError;
use crate::models::resume::{OwnerId, ResumeData, ResumeRow, ResumeStyle};

/// PostgreSQL-backed store. Expected schema:
///
/// ```sql
/// CREATE TABLE resumes (
///     user_id    UUID PRIMARY KEY,
///     data       JSONB NOT NULL,
///     style      TEXT NOT NULL,
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
/// );
/// ```
pub struct PostgresResumeStore {
    pool: PgPool,
}

impl PostgresResumeStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresResumeStore { pool }
    }
}

#[async_trait]
impl ResumeStore for PostgresResumeStore {
    async fn load(&self, owner: OwnerId) -> Result<Option<StoredResume>, AppError> {
        let row: Option<ResumeRow> =
            sqlx::query_as("SELECT user_id, data, style, updated_at FROM resumes WHERE user_id = $1")
                .bind(owner.0)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else { return Ok(None) };

        let resume_data: ResumeData = serde_json::from_value(row.data)
            .map_err(|e| AppError::Storage(format!("decode stored resume: {e}")))?;
        let style = ResumeStyle::from_tag(&row.style).unwrap_or_default();
        Ok(Some(StoredResume { resume_data, style }))
    }

    async fn save(
        &self,
        owner: OwnerId,
        data: &ResumeData,
        style: ResumeStyle,
    ) -> Result<(), AppError> {
        let value = serde_json::to_value(data)
            .map_err(|e| AppError::Storage(format!("encode resume: {e}")))?;

        // Idempotent upsert keyed by owner.
        sqlx::query(
            r#"
            INSERT INTO resumes (user_id, data, style, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (user_id)
            DO UPDATE SET data = EXCLUDED.data, style = EXCLUDED.style, updated_at = now()
            "#,
        )
        .bind(owner.0)
        .bind(value)
        .bind(style.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
