//! Provider model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Provider record from database
///
/// `bound_account_id` is the external account currently allowed to act as
/// this provider. It is NULL for providers registered ahead of their first
/// login and is bound exactly once, on the first successful secret
/// verification.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Provider {
    pub id: i32,
    pub bound_account_id: Option<i64>,
    /// Display name
    pub name: String,
    /// Specialty tag used for client browsing (e.g. "nails", "hair")
    pub specialty: String,
    /// Contact info shown to clients (social handle, phone, ...)
    pub contact: Option<String>,
    pub address: Option<String>,
    #[serde(skip_serializing, default)]
    pub secret_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Short provider form for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProviderSummary {
    pub id: i32,
    pub name: String,
    pub specialty: String,
}

/// Provider registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterProvider {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 60))]
    pub specialty: String,
    pub contact: Option<String>,
    pub address: Option<String>,
    /// Access secret for the provider login flow; stored as a salted hash
    #[validate(length(min = 6, max = 128))]
    pub secret: String,
}

/// Secret verification request (provider login)
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifySecret {
    pub secret: String,
}

/// Secret rotation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RotateSecret {
    #[validate(length(min = 6, max = 128))]
    pub new_secret: String,
}
