//! Booking (appointment) model and related types

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Booking lifecycle status
///
/// Legal transitions: active -> cancelled (client- or system-initiated) and
/// active -> completed (cleanup sweep, once the date has fully elapsed).
/// Both are irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
    Completed,
}

/// Booking record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i32,
    pub client_id: i64,
    pub provider_id: i32,
    pub offering_id: i32,
    pub booked_date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Booking with joined display fields for listings and reminders
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingDetails {
    pub id: i32,
    pub client_id: i64,
    pub provider_id: i32,
    pub booked_date: NaiveDate,
    pub start_time: NaiveTime,
    pub status: BookingStatus,
    pub provider_name: String,
    pub provider_address: Option<String>,
    pub offering_name: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub duration_minutes: i32,
    pub client_name: Option<String>,
}

/// Commit booking request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBooking {
    pub client_id: i64,
    pub provider_id: i32,
    pub offering_id: i32,
    /// Date (YYYY-MM-DD)
    pub date: String,
    /// Start time (HH:MM), one of the offered slots
    pub time: String,
}

/// Details returned on a successful commit, enough for the collaborator to
/// build its confirmation message
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingConfirmation {
    pub id: i32,
    pub booked_date: NaiveDate,
    pub start_time: NaiveTime,
    pub provider_name: String,
    pub provider_address: Option<String>,
    pub offering_name: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub duration_minutes: i32,
}
