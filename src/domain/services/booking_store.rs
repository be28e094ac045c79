use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::models::booking::{Booking, BookingStatus};
use crate::domain::models::hall::{Hall, HallMap};
use crate::domain::ports::BookingRepository;
use crate::domain::services::pricing;
use crate::domain::services::validation::BookingCandidate;
use crate::error::AppError;

/// Dates held by active (non-cancelled) bookings, per hall.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedDateIndex {
    dates: HallMap<BTreeSet<NaiveDate>>,
}

impl BookedDateIndex {
    pub fn from_bookings<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Self {
        let mut index = Self::default();
        for booking in bookings.into_iter().filter(|b| b.status.is_active()) {
            index.insert(booking.hall, booking.date);
        }
        index
    }

    pub fn contains(&self, hall: Hall, date: NaiveDate) -> bool {
        self.dates[hall].contains(&date)
    }

    pub fn insert(&mut self, hall: Hall, date: NaiveDate) -> bool {
        self.dates[hall].insert(date)
    }

    pub fn remove(&mut self, hall: Hall, date: NaiveDate) -> bool {
        self.dates[hall].remove(&date)
    }

    pub fn dates(&self, hall: Hall) -> &BTreeSet<NaiveDate> {
        &self.dates[hall]
    }

    pub fn snapshot(&self) -> HallMap<Vec<NaiveDate>> {
        self.dates.map(|set| set.iter().copied().collect())
    }
}

/// Authoritative bookings plus the derived booked-date index.
///
/// Every mutation takes the index write lock for its whole
/// check-persist-update sequence, so writers inside one process are
/// serialized. Separate processes sharing a database are not coordinated:
/// two of them can still book the same (hall, date). Freeing a date
/// re-checks the repository so such a pair keeps it booked until both go.
pub struct BookingStore {
    repo: Arc<dyn BookingRepository>,
    index: RwLock<BookedDateIndex>,
}

impl BookingStore {
    /// Builds the store and its index from what the repository holds.
    pub async fn load(repo: Arc<dyn BookingRepository>) -> Result<Self, AppError> {
        let active = repo.list_active().await?;
        let index = BookedDateIndex::from_bookings(&active);
        info!(
            small = index.dates(Hall::Small).len(),
            big = index.dates(Hall::Big).len(),
            "Booked-date index loaded"
        );
        Ok(Self {
            repo,
            index: RwLock::new(index),
        })
    }

    pub async fn create(&self, candidate: &BookingCandidate, today: NaiveDate) -> Result<Booking, AppError> {
        let params = candidate.validate(today)?;

        let mut index = self.index.write().await;
        if index.contains(params.hall, params.date) {
            warn!("Booking rejected: {} already booked for hall {}", params.date, params.hall);
            return Err(AppError::DateConflict("This date is already booked".into()));
        }

        let quote = pricing::quote(params.hall, params.package);
        let booking = Booking::new(params, quote);
        let created = self.repo.create(&booking).await?;
        index.insert(created.hall, created.date);

        info!("Booking {} created for {} on {}", created.id, created.hall, created.date);
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<Booking>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: &str) -> Result<Booking, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }

    /// Cancelling frees the date unless another active row still holds it.
    /// Re-activating a cancelled booking takes the date back only if no other
    /// active booking holds it meanwhile.
    pub async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, AppError> {
        let mut index = self.index.write().await;
        let current = self.get(id).await?;

        if current.status == status {
            return Ok(current);
        }

        let reactivating = !current.status.is_active() && status.is_active();
        if reactivating && index.contains(current.hall, current.date) {
            warn!("Cannot re-activate booking {}: {} was booked meanwhile", current.id, current.date);
            return Err(AppError::DateConflict("This date has been booked by someone else".into()));
        }

        let updated = self
            .repo
            .update_status(id, status)
            .await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        if current.status.is_active() && !updated.status.is_active() {
            self.release_if_unheld(&mut index, updated.hall, updated.date).await?;
        } else if reactivating {
            index.insert(updated.hall, updated.date);
        }

        info!("Booking {} status {} -> {}", updated.id, current.status, updated.status);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut index = self.index.write().await;
        let current = self.get(id).await?;

        self.repo.delete(id).await?;
        if current.status.is_active() {
            self.release_if_unheld(&mut index, current.hall, current.date).await?;
        }

        info!("Booking {} deleted", id);
        Ok(())
    }

    /// Drops the date from the index unless another active row still holds
    /// it, which happens after a cross-process double booking.
    async fn release_if_unheld(&self, index: &mut BookedDateIndex, hall: Hall, date: NaiveDate) -> Result<(), AppError> {
        if self.repo.has_active_on(hall, date).await? {
            warn!("{} in hall {} is still held by another active booking", date, hall);
        } else {
            index.remove(hall, date);
        }
        Ok(())
    }

    pub async fn booked_dates(&self) -> HallMap<Vec<NaiveDate>> {
        self.index.read().await.snapshot()
    }

    pub async fn booked_set(&self, hall: Hall) -> BTreeSet<NaiveDate> {
        self.index.read().await.dates(hall).clone()
    }

    pub async fn is_booked(&self, hall: Hall, date: NaiveDate) -> bool {
        self.index.read().await.contains(hall, date)
    }
}
