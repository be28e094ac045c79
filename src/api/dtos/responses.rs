use chrono::NaiveDate;
use serde::Serialize;
use crate::domain::models::booking::Booking;
use crate::domain::models::hall::Hall;
use crate::domain::services::calendar::DayState;

#[derive(Serialize)]
pub struct BookingCreatedResponse {
    pub success: bool,
    pub message: String,
    pub booking: Booking,
}

#[derive(Serialize)]
pub struct BookingUpdatedResponse {
    pub success: bool,
    pub booking: Booking,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub hall: Hall,
    pub date: NaiveDate,
    pub state: DayState,
}

#[derive(Serialize)]
pub struct QuoteResponse {
    pub hall: String,
    pub package: String,
    pub total: f64,
    pub deposit: f64,
}
