//! Fixtures shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;

use crate::domain::models::booking::{Booking, NewBookingParams, Package};
use crate::domain::models::hall::Hall;
use crate::domain::ports::{EmailAttachment, EmailService};
use crate::domain::services::booking_store::BookingStore;
use crate::domain::services::pricing;
use crate::domain::services::validation::BookingCandidate;
use crate::error::AppError;
use crate::infra::repositories::sqlite_booking_repo::SqliteBookingRepo;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
}

pub fn candidate(hall: &str, package: &str, date: &str) -> BookingCandidate {
    BookingCandidate {
        name: Some("Dana Levi".into()),
        email: Some("dana@example.com".into()),
        phone: Some("050-123-4567".into()),
        date: Some(date.into()),
        guests: Some("100".into()),
        event_type: Some("wedding".into()),
        hall: Some(hall.into()),
        package: Some(package.into()),
    }
}

pub fn sample_booking() -> Booking {
    let params = NewBookingParams {
        name: "Dana Levi".into(),
        email: "dana@example.com".into(),
        phone: "050-123-4567".into(),
        date: NaiveDate::from_ymd_opt(2031, 6, 15).unwrap(),
        guests: 180,
        event_type: "wedding".into(),
        hall: Hall::Big,
        package: Package::Luxury,
    };
    Booking::new(params, pricing::quote(Hall::Big, Package::Luxury))
}

pub async fn memory_store() -> BookingStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations/sqlite").run(&pool).await.unwrap();
    BookingStore::load(Arc::new(SqliteBookingRepo::new(pool))).await.unwrap()
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
    /// (filename, content)
    pub attachment: Option<(String, String)>,
}

#[derive(Default)]
pub struct RecordingEmailService {
    outbox: Mutex<Vec<SentEmail>>,
}

impl RecordingEmailService {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.outbox.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailService for RecordingEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment: Option<EmailAttachment<'_>>,
    ) -> Result<(), AppError> {
        self.outbox.lock().unwrap().push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            attachment: attachment.map(|a| (a.filename.to_string(), String::from_utf8_lossy(a.data).into_owned())),
        });
        Ok(())
    }
}

pub struct FailingEmailService;

#[async_trait]
impl EmailService for FailingEmailService {
    async fn send(&self, _: &str, _: &str, _: &str, _: Option<EmailAttachment<'_>>) -> Result<(), AppError> {
        Err(AppError::NotificationFailed("relay unreachable".into()))
    }
}
