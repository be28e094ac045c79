use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{info, warn};
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::ports::{BookingRepository, ContactRepository, EmailService};
use crate::domain::services::booking_store::BookingStore;
use crate::domain::services::calendar::VenueClock;
use crate::domain::services::notification::{load_templates, NotificationService};
use crate::error::AppError;
use crate::infra::email::{
    http_email_service::HttpEmailService, log_email_service::LogEmailService,
    smtp_email_service::SmtpEmailService,
};
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_contact_repo::PostgresContactRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_contact_repo::SqliteContactRepo,
};
use crate::state::AppState;

/// HTTP relay wins over SMTP; with neither configured mail only goes to the log.
pub fn build_email_service(config: &Config) -> Result<Arc<dyn EmailService>, AppError> {
    if let Some(url) = &config.mail_service_url {
        info!("Using HTTP mail relay at {}", url);
        return Ok(Arc::new(HttpEmailService::new(
            url.clone(),
            config.mail_service_token.clone(),
            config.mail_from.clone(),
        )?));
    }
    if let Some(smtp) = &config.smtp {
        info!("Using SMTP relay {}:{}", smtp.host, smtp.port);
        return Ok(Arc::new(SmtpEmailService::new(smtp, &config.mail_from)?));
    }
    warn!("No mail transport configured; emails will only be logged");
    Ok(Arc::new(LogEmailService::new()))
}

/// Builds the state from already-constructed adapters. Loads the booked-date
/// index from the booking repository.
pub async fn assemble_state(
    config: &Config,
    clock: VenueClock,
    booking_repo: Arc<dyn BookingRepository>,
    contact_repo: Arc<dyn ContactRepository>,
    email_service: Arc<dyn EmailService>,
) -> Result<AppState, AppError> {
    let templates = Arc::new(load_templates()?);
    let notifier = Arc::new(NotificationService::new(
        email_service,
        templates,
        config.admin_email.clone(),
        config.notifications_enabled,
    ));
    let bookings = Arc::new(BookingStore::load(booking_repo).await?);

    Ok(AppState {
        config: config.clone(),
        clock,
        bookings,
        contact_repo,
        notifier,
    })
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let database_url = &config.database_url;
    let email_service = build_email_service(config)?;
    let clock = VenueClock::Zone(config.venue_timezone);

    let (booking_repo, contact_repo) =
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            info!("Initializing PostgreSQL connection...");

            let mut opts: PgConnectOptions = database_url
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid Postgres URL: {}", e)))?;
            opts = opts.log_statements(LevelFilter::Debug)
                .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect_with(opts)
                .await?;

            run_postgres_migrations(&pool).await?;

            let booking_repo: Arc<dyn BookingRepository> = Arc::new(PostgresBookingRepo::new(pool.clone()));
            let contact_repo: Arc<dyn ContactRepository> = Arc::new(PostgresContactRepo::new(pool));
            (booking_repo, contact_repo)
        } else {
            info!("Initializing SQLite connection with WAL Mode...");

            let opts = SqliteConnectOptions::from_str(database_url)
                .map_err(|e| AppError::Config(format!("Invalid SQLite connection string: {}", e)))?
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(5))
                .log_statements(LevelFilter::Debug)
                .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

            let pool = SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(opts)
                .await?;

            run_sqlite_migrations(&pool).await?;

            let booking_repo: Arc<dyn BookingRepository> = Arc::new(SqliteBookingRepo::new(pool.clone()));
            let contact_repo: Arc<dyn ContactRepository> = Arc::new(SqliteContactRepo::new(pool));
            (booking_repo, contact_repo)
        };

    assemble_state(config, clock, booking_repo, contact_repo, email_service).await
}

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .map_err(|e| AppError::Config(format!("Failed to run Postgres migrations: {}", e)))
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| AppError::Config(format!("Failed to run SQLite migrations: {}", e)))
}
