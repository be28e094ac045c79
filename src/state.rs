use std::sync::Arc;
use chrono::NaiveDate;
use crate::config::Config;
use crate::domain::ports::ContactRepository;
use crate::domain::services::booking_store::BookingStore;
use crate::domain::services::calendar::VenueClock;
use crate::domain::services::notification::NotificationService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub clock: VenueClock,
    pub bookings: Arc<BookingStore>,
    pub contact_repo: Arc<dyn ContactRepository>,
    pub notifier: Arc<NotificationService>,
}

impl AppState {
    /// Venue-local calendar date.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
