//! Working-time window repository

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::schedule::WorkWindow};

#[derive(Clone)]
pub struct SchedulesRepository {
    pool: Pool<Postgres>,
}

impl SchedulesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new working-time window. Semantic validation (end after
    /// start) happens in the service before this call.
    pub async fn add(
        &self,
        provider_id: i32,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> AppResult<WorkWindow> {
        let row = sqlx::query_as::<_, WorkWindow>(
            r#"
            INSERT INTO work_windows (provider_id, work_date, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(provider_id)
        .bind(date)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Windows of one provider on one date, ordered by start time
    pub async fn windows_for(&self, provider_id: i32, date: NaiveDate) -> AppResult<Vec<WorkWindow>> {
        let rows = sqlx::query_as::<_, WorkWindow>(
            r#"
            SELECT * FROM work_windows
            WHERE provider_id = $1 AND work_date = $2
            ORDER BY start_time
            "#,
        )
        .bind(provider_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every window of a provider, ordered by (date, start time)
    pub async fn all_windows(&self, provider_id: i32) -> AppResult<Vec<WorkWindow>> {
        let rows = sqlx::query_as::<_, WorkWindow>(
            "SELECT * FROM work_windows WHERE provider_id = $1 ORDER BY work_date, start_time",
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Distinct dates with at least one window, from `from_date` on,
    /// ascending
    pub async fn available_dates(
        &self,
        provider_id: i32,
        from_date: NaiveDate,
    ) -> AppResult<Vec<NaiveDate>> {
        let rows = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT DISTINCT work_date FROM work_windows
            WHERE provider_id = $1 AND work_date >= $2
            ORDER BY work_date
            "#,
        )
        .bind(provider_id)
        .bind(from_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Window by id, None if it does not exist
    pub async fn find(&self, window_id: i32) -> AppResult<Option<WorkWindow>> {
        let row = sqlx::query_as::<_, WorkWindow>("SELECT * FROM work_windows WHERE id = $1")
            .bind(window_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Delete one window. Idempotent: deleting a missing id is a no-op
    /// success.
    pub async fn delete(&self, window_id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM work_windows WHERE id = $1")
            .bind(window_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete every window of a provider; returns the count
    pub async fn delete_all_for(&self, provider_id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM work_windows WHERE provider_id = $1")
            .bind(provider_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
