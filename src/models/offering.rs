//! Offering (service catalog) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A bookable service offered by one provider
///
/// Offerings are retired rather than deleted so that historical bookings
/// keep a durable reference and a real duration.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Offering {
    pub id: i32,
    pub provider_id: i32,
    pub name: String,
    #[schema(value_type = String, example = "1500.00")]
    pub price: Decimal,
    /// Service duration in minutes
    pub duration_minutes: i32,
    /// Set when the owning provider removes the offering from the catalog
    pub retired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Create offering request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOffering {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Price, must be positive
    #[schema(value_type = String, example = "1500.00")]
    pub price: Decimal,
    /// Duration in minutes, must be positive
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: i32,
}
