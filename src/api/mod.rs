//! REST API module.
//!
//! Contains all routes and handlers for the browser client and the admin console.

mod admin;
mod buses;
mod drivers;
mod form;

pub use admin::*;
pub use buses::*;
pub use drivers::*;

use axum::{extract::rejection::JsonRejection, Json};

use crate::errors::AppError;

/// Handler result: the JSON body or an error envelope.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Unwrap an optional JSON body.
///
/// A request without a JSON content type counts as an empty body, so the
/// handler reports the missing field itself. Any other rejection is a 400.
fn json_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => {
            tracing::warn!("Rejected JSON body: {}", rejection.body_text());
            Err(AppError::BadRequest(rejection.body_text()))
        }
    }
}

/// Treat an absent or empty value as missing.
fn require(value: Option<String>, message: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::MissingField(message.to_string()))
}
