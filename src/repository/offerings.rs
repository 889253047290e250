//! Offerings (service catalog) repository

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::offering::Offering,
};

#[derive(Clone)]
pub struct OfferingsRepository {
    pool: Pool<Postgres>,
}

impl OfferingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        provider_id: i32,
        name: &str,
        price: Decimal,
        duration_minutes: i32,
    ) -> AppResult<Offering> {
        let row = sqlx::query_as::<_, Offering>(
            r#"
            INSERT INTO offerings (provider_id, name, price, duration_minutes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(provider_id)
        .bind(name)
        .bind(price)
        .bind(duration_minutes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Get offering by ID. Retired offerings are still returned so that
    /// existing bookings can resolve their details.
    pub async fn get(&self, id: i32) -> AppResult<Offering> {
        sqlx::query_as::<_, Offering>("SELECT * FROM offerings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Offering {} not found", id)))
    }

    /// Current (non-retired) catalog of a provider, ordered by name
    pub async fn list_for(&self, provider_id: i32) -> AppResult<Vec<Offering>> {
        let rows = sqlx::query_as::<_, Offering>(
            "SELECT * FROM offerings WHERE provider_id = $1 AND retired_at IS NULL ORDER BY name",
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Retire an offering. Idempotent: retiring a missing or
    /// already-retired offering is a no-op success.
    pub async fn retire(&self, id: i32) -> AppResult<()> {
        sqlx::query("UPDATE offerings SET retired_at = now() WHERE id = $1 AND retired_at IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Retire every current offering of a provider; returns the count
    pub async fn retire_all_for(&self, provider_id: i32) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE offerings SET retired_at = now() WHERE provider_id = $1 AND retired_at IS NULL",
        )
        .bind(provider_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
