//! API handlers for Atelia REST endpoints

pub mod availability;
pub mod bookings;
pub mod clients;
pub mod health;
pub mod offerings;
pub mod openapi;
pub mod providers;
pub mod schedules;
pub mod tasks;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::{error::AppError, AppState};

/// Account id header set by the trusted conversational front-end
pub const ACCOUNT_HEADER: &str = "x-account-id";

/// Extractor for the acting account identity.
///
/// The front-end authenticates its users on its own transport and passes
/// the account id along; the core accepts it as given and only enforces
/// ownership rules on top (provider binding, booking ownership). It never
/// re-derives trust itself.
pub struct ActingAccount(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for ActingAccount {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ACCOUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Authorization(format!("Missing {} header", ACCOUNT_HEADER))
            })?;

        let account_id = header
            .parse::<i64>()
            .map_err(|_| AppError::Format(format!("Invalid {} header", ACCOUNT_HEADER)))?;

        Ok(ActingAccount(account_id))
    }
}
