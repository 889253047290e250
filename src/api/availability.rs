//! Slot offering endpoint

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveTime;

use crate::{error::AppResult, models::schedule::SlotQuery, timetable};

/// Offerable start times for (provider, date, offering)
///
/// An empty list means the provider has no availability for that date and
/// duration; the caller decides how to phrase that.
#[utoipa::path(
    get,
    path = "/providers/{id}/slots",
    tag = "availability",
    params(("id" = i32, Path, description = "Provider ID"), SlotQuery),
    responses(
        (status = 200, description = "Offerable start times, ascending", body = Vec<NaiveTime>),
        (status = 400, description = "Malformed date or offering mismatch"),
        (status = 404, description = "Provider or offering not found")
    )
)]
pub async fn available_slots(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<Vec<NaiveTime>>> {
    let date = timetable::parse_date(&query.date)?;
    let slots = state
        .services
        .availability
        .available_slots(provider_id, date, query.offering_id)
        .await?;
    Ok(Json(slots))
}
