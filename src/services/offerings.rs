//! Offering catalog service

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::offering::{CreateOffering, Offering},
    repository::Repository,
};

use super::providers::ensure_owner;

#[derive(Clone)]
pub struct OfferingService {
    repository: Repository,
}

impl OfferingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add an offering to the acting provider's catalog
    pub async fn add(
        &self,
        acting_account: i64,
        provider_id: i32,
        data: CreateOffering,
    ) -> AppResult<Offering> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if data.price <= Decimal::ZERO {
            return Err(AppError::Validation("Price must be positive".to_string()));
        }
        ensure_owner(&self.repository, acting_account, provider_id).await?;

        self.repository
            .offerings
            .create(provider_id, &data.name, data.price, data.duration_minutes)
            .await
    }

    /// Current catalog of a provider
    pub async fn list(&self, provider_id: i32) -> AppResult<Vec<Offering>> {
        // surface NotFound for an unknown provider rather than an empty list
        self.repository.providers.get(provider_id).await?;
        self.repository.offerings.list_for(provider_id).await
    }

    /// Retire one offering. Idempotent: a missing or already-retired id is
    /// a no-op success.
    pub async fn retire(&self, acting_account: i64, offering_id: i32) -> AppResult<()> {
        let offering = match self.repository.offerings.get(offering_id).await {
            Ok(offering) => offering,
            Err(AppError::NotFound(_)) => return Ok(()),
            Err(e) => return Err(e),
        };
        ensure_owner(&self.repository, acting_account, offering.provider_id).await?;
        self.repository.offerings.retire(offering_id).await
    }

    /// Retire the provider's whole catalog; returns the count retired
    pub async fn retire_all(&self, acting_account: i64, provider_id: i32) -> AppResult<u64> {
        ensure_owner(&self.repository, acting_account, provider_id).await?;
        self.repository.offerings.retire_all_for(provider_id).await
    }
}
