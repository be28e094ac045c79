use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::payload::ApiJson;
use crate::api::dtos::requests::{CreateBookingRequest, UpdateStatusRequest};
use crate::api::dtos::responses::{BookingCreatedResponse, BookingUpdatedResponse, MessageResponse};
use crate::domain::models::booking::BookingStatus;
use crate::domain::services::validation::BookingCandidate;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let candidate = BookingCandidate::from(payload);
    let booking = state.bookings.create(&candidate, state.today()).await?;

    // Delivery happens after the response; a mail failure never fails the booking.
    state.notifier.spawn_booking_created(booking.clone());

    info!("create_booking: {} booked {} for {}", booking.id, booking.hall, booking.date);
    Ok(Json(BookingCreatedResponse {
        success: true,
        message: "Booking created successfully".to_string(),
        booking,
    }))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.bookings.list().await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.bookings.get(&id).await?;
    Ok(Json(booking))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let raw = payload
        .status
        .filter(|s| !s.trim().is_empty())
        .ok_or(AppError::Validation("Status is required".into()))?;
    let status: BookingStatus = raw
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid status: {}", raw)))?;

    let booking = state.bookings.update_status(&id, status).await?;
    Ok(Json(BookingUpdatedResponse { success: true, booking }))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.bookings.delete(&id).await?;
    Ok(Json(MessageResponse::ok("Booking deleted")))
}

pub async fn booked_dates(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.bookings.booked_dates().await))
}
