use axum::{extract::{State, Path}, response::IntoResponse, Json};
use chrono::NaiveDate;
use crate::state::AppState;
use crate::api::extractors::payload::ApiQuery;
use crate::api::dtos::requests::{CalendarQuery, QuoteQuery};
use crate::api::dtos::responses::{AvailabilityResponse, QuoteResponse};
use crate::domain::models::hall::Hall;
use crate::domain::services::calendar::{classify, render_grid, MonthCursor};
use crate::domain::services::pricing::quote_for;
use crate::error::AppError;
use std::sync::Arc;

fn parse_hall(raw: &str) -> Result<Hall, AppError> {
    raw.parse().map_err(|e| AppError::Validation(format!("{}", e)))
}

/// Month grid for one hall. Defaults to the venue's current month.
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Path(hall): Path<String>,
    ApiQuery(query): ApiQuery<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let hall = parse_hall(&hall)?;
    let today = state.today();
    let current = MonthCursor::containing(today);
    let cursor = MonthCursor::new(
        query.year.unwrap_or(current.year),
        query.month.unwrap_or(current.month as i32),
    );

    let booked = state.bookings.booked_set(hall).await;
    Ok(Json(render_grid(cursor, hall, &booked, today)))
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path((hall, date)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let hall = parse_hall(&hall)?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;

    let booked = state.bookings.booked_set(hall).await;
    Ok(Json(AvailabilityResponse {
        hall,
        date,
        state: classify(date, &booked, state.today()),
    }))
}

/// Unknown halls or packages price at 0 rather than failing.
pub async fn get_quote(ApiQuery(query): ApiQuery<QuoteQuery>) -> impl IntoResponse {
    let hall = query.hall.unwrap_or_default();
    let package = query.package.unwrap_or_default();
    let quote = quote_for(&hall, &package);
    Json(QuoteResponse {
        hall,
        package,
        total: quote.total,
        deposit: quote.deposit,
    })
}
