// error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorBody;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("lamp {0} not found")]
    NotFound(String),
    #[error("bad input: {0}")]
    BadInput(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("publish failed: {0}")]
    PublishFailed(#[from] rumqttc::ClientError),
    #[error("broker unavailable: {0}")]
    BrokerUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::BadInput(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_)
            | AppError::PublishFailed(_)
            | AppError::BrokerUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadInput(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
