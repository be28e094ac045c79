mod common;

use axum::http::StatusCode;
use common::{booking_payload, TestApp};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_calendar_defaults_to_current_month() {
    let app = TestApp::new().await;
    let (status, grid) = app.get("/api/calendar/small").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(grid["hall"], "small");
    assert_eq!(grid["year"], 2030);
    assert_eq!(grid["month"], 1);
    assert_eq!(grid["label"], "January 2030");
    // 1 January 2030 is a Tuesday.
    assert_eq!(grid["firstWeekday"], 2);
    assert_eq!(grid["daysInMonth"], 31);

    let slots = grid["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 33);
    assert_eq!(slots[0]["kind"], "blank");
    assert_eq!(slots[2]["date"], "2030-01-01");
    assert_eq!(slots[2]["isToday"], true);
    assert_eq!(slots[2]["state"], "available");
}

#[tokio::test]
async fn test_calendar_marks_booked_and_past_days() {
    let app = TestApp::new().await;
    app.request("POST", "/api/book", Some(booking_payload("big", "2030-02-14"))).await;

    let (_, grid) = app.get("/api/calendar/big?year=2030&month=2").await;
    let day = |d: &str| {
        grid["slots"].as_array().unwrap().iter().find(|s| s["date"] == d).cloned().unwrap()
    };
    assert_eq!(day("2030-02-14")["state"], "booked");
    assert_eq!(day("2030-02-15")["state"], "available");

    // Same day on the other hall stays free.
    let (_, small) = app.get("/api/calendar/small?year=2030&month=2").await;
    assert!(small["slots"].as_array().unwrap().iter().all(|s| s["kind"] == "blank" || s["state"] == "available"));

    let (_, past) = app.get("/api/calendar/big?year=2029&month=12").await;
    assert!(past["slots"].as_array().unwrap().iter().filter(|s| s["kind"] == "day").all(|s| s["state"] == "past"));
}

#[tokio::test]
async fn test_calendar_normalizes_month_overflow() {
    let app = TestApp::new().await;
    let (status, grid) = app.get("/api/calendar/small?year=2030&month=13").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(grid["year"], 2031);
    assert_eq!(grid["month"], 1);

    let (_, grid) = app.get("/api/calendar/small?year=2030&month=0").await;
    assert_eq!(grid["year"], 2029);
    assert_eq!(grid["month"], 12);
}

#[tokio::test]
async fn test_calendar_unknown_hall() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/calendar/rooftop").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("rooftop"));
}

#[tokio::test]
async fn test_availability_states() {
    let app = TestApp::new().await;
    app.request("POST", "/api/book", Some(booking_payload("small", "2030-01-20"))).await;

    let (_, body) = app.get("/api/availability/small/2030-01-20").await;
    assert_eq!(body["hall"], "small");
    assert_eq!(body["date"], "2030-01-20");
    assert_eq!(body["state"], "booked");

    let (_, body) = app.get("/api/availability/big/2030-01-20").await;
    assert_eq!(body["state"], "available");

    let (_, body) = app.get("/api/availability/small/2029-06-01").await;
    assert_eq!(body["state"], "past");

    let (status, body) = app.get("/api/availability/small/20-01-2030").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid date format (YYYY-MM-DD)");
}

#[tokio::test]
async fn test_quote_is_lenient() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/quote?hall=small&package=basic").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4500.0);
    assert_eq!(body["deposit"], 450.0);

    let (_, body) = app.get("/api/quote?hall=big&package=premium").await;
    assert_eq!(body["total"], 10000.0);
    assert_eq!(body["deposit"], 1000.0);

    let (status, body) = app.get("/api/quote?hall=big&package=gold").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5000.0);

    let (_, body) = app.get("/api/quote").await;
    assert_eq!(body["total"], 0.0);
}

#[tokio::test]
async fn test_bad_query_values_are_json_validation_errors() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/calendar/small?year=2030&month=june").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid query string"));
}
