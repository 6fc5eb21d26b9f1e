//! Bus management and route search endpoints.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Multipart, Query, State,
    },
    Json,
};

use super::form::{parse_string_list, FormData};
use super::{json_body, require, ApiResult};
use crate::errors::AppError;
use crate::models::{
    AddBusResponse, BusListQuery, BusRecord, BusSearchQuery, DeleteBusRequest, MessageResponse,
    NewBus,
};
use crate::AppState;

/// POST /bus/add - Add a bus for a driver.
pub async fn add_bus(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<AddBusResponse> {
    let mut form = FormData::read(multipart).await?;

    let (Some(driver_id), Some(bus_number), Some(start_point), Some(end_point), Some(photo)) = (
        form.text("driverId"),
        form.text("busNumber"),
        form.text("startPoint"),
        form.text("endPoint"),
        form.take_file("photo"),
    ) else {
        return Err(AppError::MissingField(
            "All fields and photo are required".to_string(),
        ));
    };

    // Parse the optional lists before anything is written
    let stops = parse_string_list("stops", form.text("stops").as_deref())?;
    let times = parse_string_list("times", form.text("times").as_deref())?;

    let photo = state
        .uploads
        .save(&photo.bytes, photo.file_name.as_deref())
        .await?;

    let bus = state
        .repo
        .add_bus(NewBus {
            driver_id,
            bus_number,
            start_point,
            end_point,
            stops,
            times,
            photo,
        })
        .await?;

    tracing::info!("Bus {} added for driver {}", bus.id, bus.driver_id);

    Ok(Json(AddBusResponse {
        success: true,
        message: "Bus added successfully".to_string(),
        bus_id: bus.id,
    }))
}

/// GET /bus/list?driverId= - Buses registered by a driver.
pub async fn list_buses(
    State(state): State<AppState>,
    Query(query): Query<BusListQuery>,
) -> ApiResult<Vec<BusRecord>> {
    let driver_id = require(query.driver_id, "driverId is required")?;
    Ok(Json(state.repo.list_buses_for_driver(&driver_id).await?))
}

/// DELETE /bus/delete - Remove a bus by ID.
pub async fn delete_bus(
    State(state): State<AppState>,
    payload: Result<Json<DeleteBusRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let request: DeleteBusRequest = json_body(payload)?;
    let bus_id = require(request.bus_id, "busId is required")?;

    let removed = state.repo.delete_bus(&bus_id).await?;
    tracing::info!("Bus {} deleted", removed.id);

    Ok(Json(MessageResponse::ok("Bus deleted successfully")))
}

/// GET /bus/search?from=&to= - Buses running exactly between two points.
pub async fn search_buses(
    State(state): State<AppState>,
    Query(query): Query<BusSearchQuery>,
) -> ApiResult<Vec<BusRecord>> {
    let (Some(from), Some(to)) = (
        query.from.filter(|v| !v.is_empty()),
        query.to.filter(|v| !v.is_empty()),
    ) else {
        return Err(AppError::MissingField(
            "from and to are required".to_string(),
        ));
    };

    Ok(Json(state.repo.search_buses(&from, &to).await?))
}
