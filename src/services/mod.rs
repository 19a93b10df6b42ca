use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    store::Record,
};

pub mod auth_service;
pub mod cart_service;
pub mod class_service;
pub mod content_service;
pub mod history_service;
pub mod payment_service;
pub mod user_service;

/// Reads a string field the route cannot work without.
pub(crate) fn required_string<'a>(record: &'a Record, field: &str) -> AppResult<&'a str> {
    match record.get(field) {
        Some(Value::String(value)) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(AppError::Validation(format!("{field} must be a non-empty string"))),
        None => Err(AppError::Validation(format!("{field} is required"))),
    }
}
