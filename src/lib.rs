//! Atelia Booking Server
//!
//! Appointment booking engine for independent service providers: each
//! provider publishes working-time windows and an offering catalog, clients
//! reserve conflict-free time slots, and background duties send
//! time-relative reminders and retire elapsed bookings.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod timetable;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
