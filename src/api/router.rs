use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{booking, calendar, contact, health};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .route("/health", get(health::health_check))

        // Availability & calendar
        .route("/api/booked-dates", get(booking::booked_dates))
        .route("/api/calendar/{hall}", get(calendar::get_calendar))
        .route("/api/availability/{hall}/{date}", get(calendar::get_availability))
        .route("/api/quote", get(calendar::get_quote))

        // Bookings
        .route("/api/book", post(booking::create_booking))
        .route("/api/bookings", get(booking::list_bookings))
        .route(
            "/api/bookings/{id}",
            get(booking::get_booking)
                .patch(booking::update_booking_status)
                .delete(booking::delete_booking),
        )

        // Contact
        .route("/api/contact", post(contact::submit_contact).get(contact::list_contact_messages));

    // Front-end files, if any, answer everything the API does not.
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
