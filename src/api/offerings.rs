//! Offering catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::offering::{CreateOffering, Offering},
};

use super::ActingAccount;

/// List a provider's current offerings
#[utoipa::path(
    get,
    path = "/providers/{id}/offerings",
    tag = "offerings",
    params(("id" = i32, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Current catalog", body = Vec<Offering>),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn list_offerings(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
) -> AppResult<Json<Vec<Offering>>> {
    let offerings = state.services.offerings.list(provider_id).await?;
    Ok(Json(offerings))
}

/// Add an offering to the acting provider's catalog
#[utoipa::path(
    post,
    path = "/providers/{id}/offerings",
    tag = "offerings",
    params(("id" = i32, Path, description = "Provider ID")),
    request_body = CreateOffering,
    responses(
        (status = 201, description = "Offering created", body = Offering),
        (status = 400, description = "Invalid price or duration"),
        (status = 403, description = "Acting account is not bound to this provider")
    )
)]
pub async fn create_offering(
    State(state): State<crate::AppState>,
    ActingAccount(account_id): ActingAccount,
    Path(provider_id): Path<i32>,
    Json(request): Json<CreateOffering>,
) -> AppResult<(StatusCode, Json<Offering>)> {
    let offering = state
        .services
        .offerings
        .add(account_id, provider_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(offering)))
}

/// Retire one offering (idempotent)
#[utoipa::path(
    delete,
    path = "/offerings/{id}",
    tag = "offerings",
    params(("id" = i32, Path, description = "Offering ID")),
    responses(
        (status = 204, description = "Offering retired (or already gone)"),
        (status = 403, description = "Acting account does not own this offering")
    )
)]
pub async fn delete_offering(
    State(state): State<crate::AppState>,
    ActingAccount(account_id): ActingAccount,
    Path(offering_id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.offerings.retire(account_id, offering_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Retire the provider's whole catalog
#[utoipa::path(
    delete,
    path = "/providers/{id}/offerings",
    tag = "offerings",
    params(("id" = i32, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Count of offerings retired", body = u64),
        (status = 403, description = "Acting account is not bound to this provider")
    )
)]
pub async fn delete_all_offerings(
    State(state): State<crate::AppState>,
    ActingAccount(account_id): ActingAccount,
    Path(provider_id): Path<i32>,
) -> AppResult<Json<u64>> {
    let retired = state
        .services
        .offerings
        .retire_all(account_id, provider_id)
        .await?;
    Ok(Json(retired))
}
