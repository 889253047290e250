//! Providers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::provider::{Provider, ProviderSummary},
};

#[derive(Clone)]
pub struct ProvidersRepository {
    pool: Pool<Postgres>,
}

impl ProvidersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new provider; the secret must already be hashed
    pub async fn create(
        &self,
        name: &str,
        specialty: &str,
        contact: Option<&str>,
        address: Option<&str>,
        secret_hash: &str,
        bound_account_id: Option<i64>,
    ) -> AppResult<Provider> {
        let row = sqlx::query_as::<_, Provider>(
            r#"
            INSERT INTO providers (name, specialty, contact, address, secret_hash, bound_account_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(specialty)
        .bind(contact)
        .bind(address)
        .bind(secret_hash)
        .bind(bound_account_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Get provider by ID
    pub async fn get(&self, id: i32) -> AppResult<Provider> {
        sqlx::query_as::<_, Provider>("SELECT * FROM providers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Provider {} not found", id)))
    }

    /// Provider currently bound to the given account, if any
    pub async fn by_account(&self, account_id: i64) -> AppResult<Option<Provider>> {
        let row = sqlx::query_as::<_, Provider>(
            "SELECT * FROM providers WHERE bound_account_id = $1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// List all providers, ordered by name
    pub async fn list(&self) -> AppResult<Vec<ProviderSummary>> {
        let rows = sqlx::query_as::<_, ProviderSummary>(
            "SELECT id, name, specialty FROM providers ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List providers with the given specialty tag, ordered by name
    pub async fn list_by_specialty(&self, specialty: &str) -> AppResult<Vec<ProviderSummary>> {
        let rows = sqlx::query_as::<_, ProviderSummary>(
            "SELECT id, name, specialty FROM providers WHERE specialty = $1 ORDER BY name",
        )
        .bind(specialty)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Distinct specialty tags across current providers, sorted
    pub async fn specialties(&self) -> AppResult<Vec<String>> {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT specialty FROM providers ORDER BY specialty",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// One-way account binding: succeeds only while the provider has no
    /// bound account. Returns whether a row was updated.
    pub async fn bind_account(&self, provider_id: i32, account_id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE providers SET bound_account_id = $1 WHERE id = $2 AND bound_account_id IS NULL",
        )
        .bind(account_id)
        .bind(provider_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the stored secret hash
    pub async fn rotate_secret(&self, provider_id: i32, secret_hash: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE providers SET secret_hash = $1 WHERE id = $2")
            .bind(secret_hash)
            .bind(provider_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Provider {} not found",
                provider_id
            )));
        }
        Ok(())
    }
}
