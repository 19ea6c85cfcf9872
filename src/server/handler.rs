//! Request handlers for the pets API

use super::AppState;
use crate::{StorageError, ValidationError};
use crate::protocol::{ApiError, PET_DELETED, PETS_DELETED, Pet, PetPayload};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::{debug, error, warn};

/// GET /pets
pub async fn list_pets(State(state): State<AppState>) -> Result<Json<Vec<Pet>>, ApiError> {
    let _timer = state.metrics.request_latency.start_timer();
    state.metrics.record_request("list");

    let pets = state
        .repository
        .find_all()
        .map_err(|e| store_failure(&state, "list", e))?;
    debug!(count = pets.len(), "Listed pets");
    Ok(Json(pets))
}

/// GET /pets/{id}
pub async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Pet>, ApiError> {
    let _timer = state.metrics.request_latency.start_timer();
    state.metrics.record_request("get");

    match state.repository.find_by_id(&id) {
        Ok(Some(pet)) => Ok(Json(pet)),
        Ok(None) => {
            state.metrics.not_found.inc();
            debug!(%id, "Pet not found");
            Err(ApiError::NotFound)
        }
        Err(e) => Err(store_failure(&state, "get", e)),
    }
}

/// POST /pets
///
/// Uses the body id when one is given, otherwise generates a fresh one.
/// Every check runs before the store is touched.
pub async fn create_pet(
    State(state): State<AppState>,
    payload: Result<Json<PetPayload>, JsonRejection>,
) -> Result<Json<Pet>, ApiError> {
    let _timer = state.metrics.request_latency.start_timer();
    state.metrics.record_request("create");

    let payload = accept_payload(&state, payload)?;
    let id = payload
        .creation_id()
        .map_err(|e| rejected(&state, e))?;
    let pet = payload.into_pet(id).map_err(|e| rejected(&state, e))?;

    let saved = state
        .repository
        .save(pet)
        .map_err(|e| store_failure(&state, "create", e))?;
    debug!(id = %saved.id, "Created pet");
    Ok(Json(saved))
}

/// PUT /pets/{id}
///
/// Full replacement at the path id; any id in the body is ignored.
pub async fn modify_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PetPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let _timer = state.metrics.request_latency.start_timer();
    state.metrics.record_request("modify");

    let payload = accept_payload(&state, payload)?;
    if let Some(body_id) = payload.requested_id()
        && body_id != id
    {
        debug!(%id, %body_id, "Body id overridden by path id");
    }
    let pet = payload.into_pet(id).map_err(|e| rejected(&state, e))?;

    state
        .repository
        .save(pet)
        .map_err(|e| store_failure(&state, "modify", e))?;
    Ok(StatusCode::OK)
}

/// DELETE /pets/{id}
pub async fn delete_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    let _timer = state.metrics.request_latency.start_timer();
    state.metrics.record_request("delete");

    match state.repository.delete_by_id(&id) {
        Ok(()) => {
            debug!(%id, "Deleted pet");
            Ok(PET_DELETED)
        }
        Err(e) => Err(delete_failure(&state, "delete", e)),
    }
}

/// DELETE /pets/all
pub async fn delete_all_pets(State(state): State<AppState>) -> Result<&'static str, ApiError> {
    let _timer = state.metrics.request_latency.start_timer();
    state.metrics.record_request("delete_all");

    match state.repository.delete_all() {
        Ok(()) => {
            debug!("Deleted all pets");
            Ok(PETS_DELETED)
        }
        Err(e) => Err(delete_failure(&state, "delete_all", e)),
    }
}

/// Unwrap the JSON body
fn accept_payload(
    state: &AppState,
    payload: Result<Json<PetPayload>, JsonRejection>,
) -> Result<PetPayload, ApiError> {
    match payload {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => Err(rejected(
            state,
            ValidationError::MalformedBody(rejection.body_text()),
        )),
    }
}

fn rejected(state: &AppState, e: ValidationError) -> ApiError {
    state.metrics.validation_errors.inc();
    warn!("Rejected pet payload: {}", e);
    ApiError::Validation(e)
}

fn store_failure(state: &AppState, op: &str, e: StorageError) -> ApiError {
    state.metrics.storage_errors.inc();
    error!(op, "Storage error: {}", e);
    ApiError::Store(e)
}

fn delete_failure(state: &AppState, op: &str, e: StorageError) -> ApiError {
    state.metrics.storage_errors.inc();
    error!(op, "Delete failed: {}", e);
    ApiError::DeleteFailed(e)
}
