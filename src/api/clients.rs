//! Client identity endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, TouchClient},
};

use super::ActingAccount;

/// Upsert a client identity on interaction
///
/// Called by the front-end on every conversation start; last write wins on
/// the display fields.
#[utoipa::path(
    put,
    path = "/clients/{id}",
    tag = "clients",
    params(("id" = i64, Path, description = "Client account ID")),
    request_body = TouchClient,
    responses(
        (status = 200, description = "Client record", body = Client),
        (status = 403, description = "Acting account mismatch")
    )
)]
pub async fn touch_client(
    State(state): State<crate::AppState>,
    ActingAccount(account_id): ActingAccount,
    Path(client_id): Path<i64>,
    Json(request): Json<TouchClient>,
) -> AppResult<Json<Client>> {
    if client_id != account_id {
        return Err(AppError::Authorization(
            "Cannot update another account's record".to_string(),
        ));
    }
    let client = state.services.clients.touch(client_id, request).await?;
    Ok(Json(client))
}

/// Get a client record
#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "clients",
    params(("id" = i64, Path, description = "Client account ID")),
    responses(
        (status = 200, description = "Client record", body = Client),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    State(state): State<crate::AppState>,
    Path(client_id): Path<i64>,
) -> AppResult<Json<Client>> {
    let client = state.services.clients.get(client_id).await?;
    Ok(Json(client))
}
