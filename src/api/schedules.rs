//! Working-time window endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::schedule::{CreateWorkWindow, WorkWindow},
    timetable,
};

use super::ActingAccount;

/// Query parameters for window listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct WindowQuery {
    /// Limit to one date (YYYY-MM-DD); omitted = whole calendar
    pub date: Option<String>,
}

/// List a provider's windows, for one date or the whole calendar
#[utoipa::path(
    get,
    path = "/providers/{id}/windows",
    tag = "schedules",
    params(("id" = i32, Path, description = "Provider ID"), WindowQuery),
    responses(
        (status = 200, description = "Working-time windows", body = Vec<WorkWindow>),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn list_windows(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
    Query(query): Query<WindowQuery>,
) -> AppResult<Json<Vec<WorkWindow>>> {
    let windows = match query.date {
        Some(raw) => {
            let date = timetable::parse_date(&raw)?;
            state.services.schedules.windows_for(provider_id, date).await?
        }
        None => state.services.schedules.all_windows(provider_id).await?,
    };
    Ok(Json(windows))
}

/// Add a working-time window
#[utoipa::path(
    post,
    path = "/providers/{id}/windows",
    tag = "schedules",
    params(("id" = i32, Path, description = "Provider ID")),
    request_body = CreateWorkWindow,
    responses(
        (status = 201, description = "Window created", body = WorkWindow),
        (status = 400, description = "Malformed date/time or end not after start"),
        (status = 403, description = "Acting account is not bound to this provider")
    )
)]
pub async fn create_window(
    State(state): State<crate::AppState>,
    ActingAccount(account_id): ActingAccount,
    Path(provider_id): Path<i32>,
    Json(request): Json<CreateWorkWindow>,
) -> AppResult<(StatusCode, Json<WorkWindow>)> {
    let window = state
        .services
        .schedules
        .add_window(account_id, provider_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(window)))
}

/// Delete one window (idempotent)
#[utoipa::path(
    delete,
    path = "/windows/{id}",
    tag = "schedules",
    params(("id" = i32, Path, description = "Window ID")),
    responses(
        (status = 204, description = "Window deleted (or already gone)"),
        (status = 403, description = "Acting account does not own this window")
    )
)]
pub async fn delete_window(
    State(state): State<crate::AppState>,
    ActingAccount(account_id): ActingAccount,
    Path(window_id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.schedules.delete_window(account_id, window_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete the provider's whole calendar
#[utoipa::path(
    delete,
    path = "/providers/{id}/windows",
    tag = "schedules",
    params(("id" = i32, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Count of windows deleted", body = u64),
        (status = 403, description = "Acting account is not bound to this provider")
    )
)]
pub async fn delete_all_windows(
    State(state): State<crate::AppState>,
    ActingAccount(account_id): ActingAccount,
    Path(provider_id): Path<i32>,
) -> AppResult<Json<u64>> {
    let deleted = state
        .services
        .schedules
        .delete_all_windows(account_id, provider_id)
        .await?;
    Ok(Json(deleted))
}

/// Dates with any availability for a provider
#[utoipa::path(
    get,
    path = "/providers/{id}/dates",
    tag = "availability",
    params(("id" = i32, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Dates with at least one window, ascending", body = Vec<NaiveDate>),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn available_dates(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
) -> AppResult<Json<Vec<NaiveDate>>> {
    let dates = state.services.schedules.available_dates(provider_id).await?;
    Ok(Json(dates))
}
