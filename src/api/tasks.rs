//! Periodic duty endpoints
//!
//! The duties also run on internal timers; these endpoints let an external
//! scheduler (cron, a timer service) drive them instead. All three are
//! idempotent-safe to invoke repeatedly.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

#[derive(Serialize, ToSchema)]
pub struct TaskRunResponse {
    /// Reminders delivered or bookings completed by this run
    pub affected: u64,
}

/// Run the day-ahead reminder batch
#[utoipa::path(
    post,
    path = "/tasks/reminders/day-ahead",
    tag = "tasks",
    responses(
        (status = 200, description = "Batch finished", body = TaskRunResponse)
    )
)]
pub async fn run_day_ahead(
    State(state): State<crate::AppState>,
) -> AppResult<Json<TaskRunResponse>> {
    let delivered = state
        .services
        .reminders
        .run_day_ahead(Utc::now().naive_utc())
        .await?;
    Ok(Json(TaskRunResponse {
        affected: u64::from(delivered),
    }))
}

/// Run the hour-ahead reminder scan
#[utoipa::path(
    post,
    path = "/tasks/reminders/hour-ahead",
    tag = "tasks",
    responses(
        (status = 200, description = "Scan finished", body = TaskRunResponse)
    )
)]
pub async fn run_hour_ahead(
    State(state): State<crate::AppState>,
) -> AppResult<Json<TaskRunResponse>> {
    let delivered = state
        .services
        .reminders
        .run_hour_ahead(Utc::now().naive_utc())
        .await?;
    Ok(Json(TaskRunResponse {
        affected: u64::from(delivered),
    }))
}

/// Run the cleanup sweep
#[utoipa::path(
    post,
    path = "/tasks/cleanup",
    tag = "tasks",
    responses(
        (status = 200, description = "Sweep finished", body = TaskRunResponse)
    )
)]
pub async fn run_cleanup(
    State(state): State<crate::AppState>,
) -> AppResult<Json<TaskRunResponse>> {
    let completed = state
        .services
        .reminders
        .run_cleanup(Utc::now().naive_utc())
        .await?;
    Ok(Json(TaskRunResponse { affected: completed }))
}
