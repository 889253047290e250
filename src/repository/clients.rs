//! Clients repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, TouchClient},
};

#[derive(Clone)]
pub struct ClientsRepository {
    pool: Pool<Postgres>,
}

impl ClientsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create-or-update on every interaction; last write wins on the
    /// display fields
    pub async fn upsert(&self, account_id: i64, data: &TouchClient) -> AppResult<Client> {
        let row = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (account_id, handle, display_name, phone)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (account_id) DO UPDATE
                SET handle = EXCLUDED.handle,
                    display_name = EXCLUDED.display_name,
                    phone = EXCLUDED.phone
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(&data.handle)
        .bind(&data.display_name)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get(&self, account_id: i64) -> AppResult<Client> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", account_id)))
    }

    /// Flag an account as bound to a provider record
    pub async fn mark_provider(&self, account_id: i64) -> AppResult<()> {
        sqlx::query("UPDATE clients SET is_provider = TRUE WHERE account_id = $1")
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
