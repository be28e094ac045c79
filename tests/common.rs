use hall_booking::{
    api::router::create_router,
    config::Config,
    domain::ports::{EmailAttachment, EmailService},
    domain::services::calendar::VenueClock,
    error::AppError,
    infra::factory::assemble_state,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_contact_repo::SqliteContactRepo,
    },
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use tower::ServiceExt;
use serde_json::Value;

#[derive(Clone, Debug)]
#[allow(dead_code)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
    pub attachment_name: Option<String>,
}

#[derive(Default)]
pub struct MockEmailService {
    sent: Mutex<Vec<SentEmail>>,
}

#[allow(dead_code)]
impl MockEmailService {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment: Option<EmailAttachment<'_>>,
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            attachment_name: attachment.map(|a| a.filename.to_string()),
        });
        Ok(())
    }
}

pub struct FailingEmailService;

#[async_trait]
impl EmailService for FailingEmailService {
    async fn send(&self, _: &str, _: &str, _: &str, _: Option<EmailAttachment<'_>>) -> Result<(), AppError> {
        Err(AppError::NotificationFailed("SMTP relay unreachable".into()))
    }
}

/// Every test runs with the venue clock pinned to this day.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub mailer: Arc<MockEmailService>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let mailer = Arc::new(MockEmailService::default());
        Self::with_email_service(mailer.clone(), mailer).await
    }

    pub async fn with_failing_email() -> Self {
        Self::with_email_service(Arc::new(FailingEmailService), Arc::new(MockEmailService::default())).await
    }

    async fn with_email_service(email_service: Arc<dyn EmailService>, mailer: Arc<MockEmailService>) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            admin_email: "admin@test.local".to_string(),
            ..Config::default()
        };

        let state = assemble_state(
            &config,
            VenueClock::Fixed(today()),
            Arc::new(SqliteBookingRepo::new(pool.clone())),
            Arc::new(SqliteContactRepo::new(pool.clone())),
            email_service,
        )
        .await
        .expect("Failed to assemble state");
        let state = Arc::new(state);

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            mailer,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    /// Sends `body` verbatim with a JSON content type.
    pub async fn request_raw(&self, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    /// Background notifications finish shortly after the response.
    pub async fn wait_for_emails(&self, count: usize) -> Vec<SentEmail> {
        for _ in 0..100 {
            if self.mailer.sent().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.mailer.sent()
    }
}

#[allow(dead_code)]
pub fn booking_payload(hall: &str, date: &str) -> Value {
    serde_json::json!({
        "name": "Dana Levi",
        "email": "dana@example.com",
        "phone": "050-123-4567",
        "date": date,
        "guests": 150,
        "eventType": "wedding",
        "hall": hall,
        "package": "basic"
    })
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
