use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use mongodb::bson::oid::ObjectId;

use crate::error::{AppError, AppResult};

/// JSON body extractor whose rejections use the API's error body.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "request body rejected");
                Err(AppError::Validation(rejection.body_text()))
            }
        }
    }
}

/// Parses a path segment that must name a document by its object id.
pub fn parse_object_id(raw: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::Validation(format!("'{raw}' is not a valid identifier")))
}
