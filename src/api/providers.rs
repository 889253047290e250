//! Provider management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::provider::{Provider, ProviderSummary, RegisterProvider, RotateSecret, VerifySecret},
};

use super::ActingAccount;

/// Query parameters for provider listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ProviderQuery {
    /// Narrow the listing to one specialty tag
    pub specialty: Option<String>,
}

/// List specialty tags for client browsing
#[utoipa::path(
    get,
    path = "/specialties",
    tag = "providers",
    responses(
        (status = 200, description = "Distinct specialty tags", body = Vec<String>)
    )
)]
pub async fn list_specialties(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<String>>> {
    let tags = state.services.providers.specialties().await?;
    Ok(Json(tags))
}

/// List providers, optionally by specialty
#[utoipa::path(
    get,
    path = "/providers",
    tag = "providers",
    params(ProviderQuery),
    responses(
        (status = 200, description = "Provider summaries", body = Vec<ProviderSummary>)
    )
)]
pub async fn list_providers(
    State(state): State<crate::AppState>,
    Query(query): Query<ProviderQuery>,
) -> AppResult<Json<Vec<ProviderSummary>>> {
    let providers = state
        .services
        .providers
        .list(query.specialty.as_deref())
        .await?;
    Ok(Json(providers))
}

/// Get one provider
#[utoipa::path(
    get,
    path = "/providers/{id}",
    tag = "providers",
    params(("id" = i32, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider", body = Provider),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn get_provider(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<i32>,
) -> AppResult<Json<Provider>> {
    let provider = state.services.providers.get(provider_id).await?;
    Ok(Json(provider))
}

/// Register a new provider
///
/// When the request carries an acting account it is bound to the new
/// provider immediately; otherwise binding happens on first secret
/// verification.
#[utoipa::path(
    post,
    path = "/providers",
    tag = "providers",
    request_body = RegisterProvider,
    responses(
        (status = 201, description = "Provider registered", body = Provider),
        (status = 400, description = "Invalid registration data")
    )
)]
pub async fn register_provider(
    State(state): State<crate::AppState>,
    acting: Option<ActingAccount>,
    Json(request): Json<RegisterProvider>,
) -> AppResult<(StatusCode, Json<Provider>)> {
    let provider = state
        .services
        .providers
        .register(acting.map(|a| a.0), request)
        .await?;
    Ok((StatusCode::CREATED, Json(provider)))
}

/// Verify a provider's access secret (front-end login flow)
#[utoipa::path(
    post,
    path = "/providers/{id}/verify-secret",
    tag = "providers",
    params(("id" = i32, Path, description = "Provider ID")),
    request_body = VerifySecret,
    responses(
        (status = 200, description = "Secret verified, account bound", body = Provider),
        (status = 403, description = "Wrong secret or provider bound elsewhere"),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn verify_secret(
    State(state): State<crate::AppState>,
    ActingAccount(account_id): ActingAccount,
    Path(provider_id): Path<i32>,
    Json(request): Json<VerifySecret>,
) -> AppResult<Json<Provider>> {
    let provider = state
        .services
        .providers
        .verify_secret(provider_id, &request.secret, account_id)
        .await?;
    Ok(Json(provider))
}

/// Rotate a provider's access secret
#[utoipa::path(
    post,
    path = "/providers/{id}/rotate-secret",
    tag = "providers",
    params(("id" = i32, Path, description = "Provider ID")),
    request_body = RotateSecret,
    responses(
        (status = 204, description = "Secret rotated"),
        (status = 403, description = "Acting account is not bound to this provider"),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn rotate_secret(
    State(state): State<crate::AppState>,
    ActingAccount(account_id): ActingAccount,
    Path(provider_id): Path<i32>,
    Json(request): Json<RotateSecret>,
) -> AppResult<StatusCode> {
    state
        .services
        .providers
        .rotate_secret(account_id, provider_id, &request.new_secret)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
