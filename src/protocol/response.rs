//! HTTP response mapping for the pets API

use crate::{StorageError, ValidationError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Body of a successful single delete
pub const PET_DELETED: &str = "Pet has been deleted!";

/// Body of a successful delete-all
pub const PETS_DELETED: &str = "Pets has been deleted!";

/// Body of a failed delete (single or all)
pub const DELETE_FAILED: &str = "Fail to delete!";

/// Body of any other store failure
pub const STORE_UNAVAILABLE: &str = "Store unavailable";

/// Request-terminal failures
#[derive(Error, Debug)]
pub enum ApiError {
    /// Payload rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Requested id is absent
    #[error("Pet not found")]
    NotFound,

    /// Store failed while deleting
    #[error("Delete failed: {0}")]
    DeleteFailed(#[source] StorageError),

    /// Store failed on a read or write
    #[error("Store failure: {0}")]
    Store(#[source] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::DeleteFailed(_) => StatusCode::EXPECTATION_FAILED,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Validation(e) => (status, e.to_string()).into_response(),
            Self::NotFound => status.into_response(),
            Self::DeleteFailed(_) => (status, DELETE_FAILED).into_response(),
            Self::Store(_) => (status, STORE_UNAVAILABLE).into_response(),
        }
    }
}
