//! Driver registration and public status endpoints.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Multipart, Query, State,
    },
    Json,
};

use super::form::FormData;
use super::{json_body, require, ApiResult};
use crate::errors::AppError;
use crate::models::{
    DriverStatusQuery, DriverStatusView, LoginNotification, MessageResponse, NewDriver,
    RegisterDriverResponse,
};
use crate::AppState;

/// POST /bus-register - Submit a driver registration.
pub async fn register_driver(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<RegisterDriverResponse> {
    let mut form = FormData::read(multipart).await?;

    let (Some(name), Some(email), Some(phone), Some(photo), Some(license)) = (
        form.text("name"),
        form.text("email"),
        form.text("phone"),
        form.take_file("photo"),
        form.take_file("license"),
    ) else {
        return Err(AppError::MissingField(
            "All fields and files are required".to_string(),
        ));
    };

    let photo = state
        .uploads
        .save(&photo.bytes, photo.file_name.as_deref())
        .await?;
    let license = state
        .uploads
        .save(&license.bytes, license.file_name.as_deref())
        .await?;

    let driver = state
        .repo
        .register_driver(NewDriver {
            name,
            email,
            phone,
            photo,
            license,
        })
        .await?;

    tracing::info!("Driver registration {} submitted", driver.id);

    Ok(Json(RegisterDriverResponse {
        success: true,
        message: "Registration submitted successfully".to_string(),
        id: driver.id,
    }))
}

/// GET /bus-driver-status?id= - Public status of a registration.
pub async fn get_driver_status(
    State(state): State<AppState>,
    Query(query): Query<DriverStatusQuery>,
) -> ApiResult<DriverStatusView> {
    let id = require(query.id, "ID is required")?;

    match state.repo.get_driver(&id).await? {
        Some(driver) => Ok(Json(DriverStatusView::from(&driver))),
        None => Err(AppError::NotFound("Driver not found".to_string())),
    }
}

/// POST /notify-login - Acknowledge a client-side sign-in.
pub async fn notify_login(
    payload: Result<Json<LoginNotification>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let notification: LoginNotification = json_body(payload)?;
    tracing::info!(
        "Login notification from {} <{}>",
        notification.name.as_deref().unwrap_or("unknown"),
        notification.email.as_deref().unwrap_or("no email")
    );
    Ok(Json(MessageResponse::ok("Login noted")))
}
