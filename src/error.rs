use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{processor::PaymentError, response::ErrorBody, store::StoreError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl AppError {
    pub fn unauthorized() -> Self {
        AppError::Unauthenticated("unauthorized access".into())
    }

    pub fn forbidden() -> Self {
        AppError::Forbidden("forbidden access".into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::Forbidden(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation_failure",
            AppError::Upstream(_) => "upstream_failure",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            // The request carried a value BSON cannot hold.
            StoreError::Conversion(message) => {
                tracing::warn!(error = %message, "request document rejected");
                AppError::Validation(message)
            }
            err => {
                tracing::error!(error = %err, "store operation failed");
                AppError::Upstream(err.to_string())
            }
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        tracing::error!(error = %err, "payment processor call failed");
        AppError::Upstream(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            // Driver and processor details stay in the logs.
            AppError::Upstream(_) => "upstream service failure".to_string(),
            other => other.to_string(),
        };
        let body = ErrorBody::new(self.kind(), message);
        (self.status(), axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
