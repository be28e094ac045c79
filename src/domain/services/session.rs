use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::models::booking::Booking;
use crate::domain::models::hall::Hall;
use crate::domain::services::booking_store::BookingStore;
use crate::domain::services::calendar::{render_grid, CalendarView, MonthCursor, MonthGrid, VenueClock};
use crate::domain::services::notification::NotificationService;
use crate::domain::services::validation::BookingCandidate;
use crate::error::AppError;

/// The day a visitor picked on a hall's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub hall: Hall,
    pub date: NaiveDate,
}

/// Contact and event details entered after picking a day.
#[derive(Debug, Clone, Default)]
pub struct BookingDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guests: Option<String>,
    pub event_type: Option<String>,
    pub package: Option<String>,
}

impl BookingDetails {
    fn into_candidate(self, selection: Selection) -> BookingCandidate {
        BookingCandidate {
            name: self.name,
            email: self.email,
            phone: self.phone,
            date: Some(selection.date.format("%Y-%m-%d").to_string()),
            guests: self.guests,
            event_type: self.event_type,
            hall: Some(selection.hall.as_str().to_string()),
            package: self.package,
        }
    }
}

/// One visitor's walk through the booking flow: browse months, pick a free
/// day, fill in details, submit.
pub struct BookingSession {
    store: Arc<BookingStore>,
    notifier: Option<Arc<NotificationService>>,
    clock: VenueClock,
    view: CalendarView,
    selection: Option<Selection>,
}

impl BookingSession {
    pub fn new(store: Arc<BookingStore>, notifier: Option<Arc<NotificationService>>, clock: VenueClock) -> Self {
        Self {
            store,
            notifier,
            view: CalendarView::new(clock.today()),
            clock,
            selection: None,
        }
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn cursor(&self, hall: Hall) -> MonthCursor {
        self.view.cursor(hall)
    }

    pub async fn render(&self, hall: Hall) -> MonthGrid {
        let booked = self.store.booked_set(hall).await;
        render_grid(self.view.cursor(hall), hall, &booked, self.clock.today())
    }

    pub fn change_month(&mut self, hall: Hall, direction: i32) -> MonthCursor {
        self.view.change_month(hall, direction)
    }

    /// Selects the day if it is currently available. Past and booked days
    /// are ignored and leave any earlier selection in place.
    pub async fn click(&mut self, hall: Hall, date: NaiveDate) -> bool {
        let today = self.clock.today();
        let booked = self.store.booked_set(hall).await;
        let grid = render_grid(MonthCursor::containing(date), hall, &booked, today);

        match grid.cell(date) {
            Some(cell) if cell.is_clickable() => {
                debug!("Selected {} in {}", date, hall);
                self.selection = Some(Selection { hall, date });
                true
            }
            _ => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Books the selected day. On success the selection is cleared and the
    /// notifications are sent in the background; on failure it is kept so
    /// the visitor can fix the details or pick another day.
    pub async fn submit(&mut self, details: BookingDetails) -> Result<Booking, AppError> {
        let selection = self
            .selection
            .ok_or_else(|| AppError::Validation("Please select a date first".into()))?;

        let candidate = details.into_candidate(selection);
        let booking = match self.store.create(&candidate, self.clock.today()).await {
            Ok(booking) => booking,
            Err(e) => {
                warn!("Submission for {} on {} failed: {}", selection.hall, selection.date, e);
                return Err(e);
            }
        };

        if let Some(notifier) = &self.notifier {
            notifier.spawn_booking_created(booking.clone());
        }

        self.selection = None;
        info!("Session booked {} on {}", booking.hall, booking.date);
        Ok(booking)
    }
}
