//! Booking endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::booking::{BookingConfirmation, BookingDetails, CreateBooking},
};

use super::ActingAccount;

/// Commit a booking
///
/// The slot is re-validated against the live booking set inside the same
/// transaction as the insert; a 409 means the slot was taken concurrently
/// and the client should re-query availability and pick again.
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking committed", body = BookingConfirmation),
        (status = 400, description = "Malformed request or slot in the past"),
        (status = 404, description = "Provider, offering, or client not found"),
        (status = 409, description = "Slot lost to a concurrent booking")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    ActingAccount(account_id): ActingAccount,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingConfirmation>)> {
    // a client books for itself; the front-end passes both ids
    if request.client_id != account_id {
        return Err(AppError::Authorization(
            "Cannot book on behalf of another account".to_string(),
        ));
    }
    let confirmation = state.services.availability.commit_booking(request).await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

/// Get one booking
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(booking_id): Path<i32>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get(booking_id).await?;
    Ok(Json(booking))
}

/// Cancel a booking (idempotent)
#[utoipa::path(
    post,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 204, description = "Booking cancelled"),
        (status = 403, description = "Acting account does not own this booking"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    ActingAccount(account_id): ActingAccount,
    Path(booking_id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.bookings.cancel(account_id, booking_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Active bookings of a client
#[utoipa::path(
    get,
    path = "/clients/{id}/bookings",
    tag = "bookings",
    params(("id" = i64, Path, description = "Client account ID")),
    responses(
        (status = 200, description = "Active bookings, soonest first", body = Vec<BookingDetails>),
        (status = 404, description = "Client not found")
    )
)]
pub async fn client_bookings(
    State(state): State<crate::AppState>,
    Path(client_id): Path<i64>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.for_client(client_id).await?;
    Ok(Json(bookings))
}

/// Active bookings of a provider
#[utoipa::path(
    get,
    path = "/providers/{id}/bookings",
    tag = "bookings",
    params(("id" = i32, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Active bookings, soonest first", body = Vec<BookingDetails>),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn provider_bookings(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.for_provider(provider_id).await?;
    Ok(Json(bookings))
}
