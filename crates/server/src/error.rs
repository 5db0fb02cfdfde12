use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bb_core::{FailureBody, PostInputError};
use bb_storage::StoreError;
use thiserror::Error;
use tracing::error;

use crate::pool::PoolError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid id")]
    InvalidId,

    #[error("{}", .0.message())]
    MissingFields(#[from] PostInputError),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("pool error: {0}")]
    Pool(#[from] PoolError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::MissingFields(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Maps `UnknownId` from the store to a 404 carrying `message`.
    pub fn not_found_or(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |err| match err {
            StoreError::UnknownId => ApiError::NotFound(message),
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(FailureBody::new(message))).into_response()
    }
}
