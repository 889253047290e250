//! Client (end user) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A client identity, keyed by the external account id assigned by the
/// conversational front-end
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub account_id: i64,
    pub handle: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    /// Whether this account is currently bound to a provider record
    pub is_provider: bool,
    pub created_at: DateTime<Utc>,
}

/// Idempotent upsert on every interaction; last write wins on display
/// fields
#[derive(Debug, Deserialize, ToSchema)]
pub struct TouchClient {
    pub handle: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
}
