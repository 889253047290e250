//! Working-time window models

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// A contiguous interval on one date during which a provider can be booked
///
/// A provider may have zero, one, or several windows per date. Overlapping
/// windows are tolerated; the availability resolver deduplicates the slots
/// they produce.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WorkWindow {
    pub id: i32,
    pub provider_id: i32,
    pub work_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

/// Create window request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWorkWindow {
    /// Date (YYYY-MM-DD)
    pub date: String,
    /// Window start (HH:MM)
    pub start_time: String,
    /// Window end (HH:MM), must be after start
    pub end_time: String,
}

/// Query parameters for slot listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SlotQuery {
    /// Date (YYYY-MM-DD)
    pub date: String,
    /// Offering whose duration the slots must accommodate
    pub offering_id: i32,
}
