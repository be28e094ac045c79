use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};
use serde::{Deserialize, Serialize};

use crate::domain::models::booking::Booking;
use crate::domain::models::hall::{Hall, HallMap};

/// Cursor years are clamped to what an ISO `YYYY-MM-DD` string can carry.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// A (year, month) pair, month in `1..=12`. Always normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    /// Accepts any month number and carries the overflow into the year:
    /// `(2024, 13)` is January 2025, `(2024, 0)` is December 2023. Results
    /// outside January `MIN_YEAR` ..= December `MAX_YEAR` stop at that edge.
    pub fn new(year: i32, month: i32) -> Self {
        let first = i64::from(MIN_YEAR) * 12;
        let last = i64::from(MAX_YEAR) * 12 + 11;
        let index = (i64::from(year) * 12 + i64::from(month) - 1).clamp(first, last);
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) + 1;
        Self {
            year: year as i32,
            month: month as u32,
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn shifted(self, months: i32) -> Self {
        Self::new(self.year, self.month as i32 + months)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let (year, month) = if self.month == 12 { (self.year + 1, 1) } else { (self.year, self.month + 1) };
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|next| (next - self.first_day()).num_days() as u32)
            .unwrap_or(31)
    }

    /// 0 = Sunday.
    pub fn first_weekday(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayState {
    Past,
    Booked,
    Available,
}

/// Priority: past, then booked, then available.
pub fn classify(date: NaiveDate, booked: &BTreeSet<NaiveDate>, today: NaiveDate) -> DayState {
    if date < today {
        DayState::Past
    } else if booked.contains(&date) {
        DayState::Booked
    } else {
        DayState::Available
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub state: DayState,
    pub is_today: bool,
}

impl DayCell {
    pub fn is_clickable(&self) -> bool {
        self.state == DayState::Available
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CalendarSlot {
    Blank,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub hall: Hall,
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub first_weekday: u32,
    pub days_in_month: u32,
    pub weekdays: Vec<String>,
    pub slots: Vec<CalendarSlot>,
}

impl MonthGrid {
    pub fn cursor(&self) -> MonthCursor {
        MonthCursor { year: self.year, month: self.month }
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.slots.iter().filter_map(|slot| match slot {
            CalendarSlot::Day(cell) => Some(cell),
            CalendarSlot::Blank => None,
        })
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == date)
    }
}

/// Lays out one month: `first_weekday` blanks, then one cell per day.
pub fn render_grid(cursor: MonthCursor, hall: Hall, booked: &BTreeSet<NaiveDate>, today: NaiveDate) -> MonthGrid {
    let first_weekday = cursor.first_weekday();
    let days_in_month = cursor.days_in_month();
    let first_day = cursor.first_day();

    let mut slots = Vec::with_capacity((first_weekday + days_in_month) as usize);
    slots.extend((0..first_weekday).map(|_| CalendarSlot::Blank));

    for offset in 0..days_in_month {
        let Some(date) = first_day.checked_add_days(Days::new(u64::from(offset))) else {
            break;
        };
        slots.push(CalendarSlot::Day(DayCell {
            date,
            day: offset + 1,
            state: classify(date, booked, today),
            is_today: date == today,
        }));
    }

    MonthGrid {
        hall,
        year: cursor.year,
        month: cursor.month,
        label: cursor.label(),
        first_weekday,
        days_in_month,
        weekdays: WEEKDAY_HEADERS.iter().map(|d| d.to_string()).collect(),
        slots,
    }
}

/// Which month each hall's calendar is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    cursors: HallMap<MonthCursor>,
}

impl CalendarView {
    pub fn new(today: NaiveDate) -> Self {
        let start = MonthCursor::containing(today);
        Self {
            cursors: HallMap::from_fn(|_| start),
        }
    }

    pub fn cursor(&self, hall: Hall) -> MonthCursor {
        self.cursors[hall]
    }

    pub fn set_cursor(&mut self, hall: Hall, cursor: MonthCursor) {
        self.cursors[hall] = MonthCursor::new(cursor.year, cursor.month as i32);
    }

    /// Moves one month back (negative), forward (positive) or nowhere (zero).
    pub fn change_month(&mut self, hall: Hall, direction: i32) -> MonthCursor {
        let next = self.cursors[hall].shifted(direction.signum());
        self.cursors[hall] = next;
        next
    }
}

/// Source of the venue-local "today" used for past-day classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueClock {
    Zone(Tz),
    Fixed(NaiveDate),
}

impl VenueClock {
    pub fn today(&self) -> NaiveDate {
        match self {
            VenueClock::Zone(tz) => Utc::now().with_timezone(tz).date_naive(),
            VenueClock::Fixed(date) => *date,
        }
    }
}

/// Generates an iCalendar (.ics) all-day event for a booking.
pub fn generate_ics(booking: &Booking) -> String {
    let mut calendar = Calendar::new();

    let ical_event = IcalEvent::new()
        .summary(&format!("{} - {}", booking.event_type, booking.hall.display_name()))
        .description(&format!(
            "{} package for {} guests. Booking #{}",
            booking.package.display_name(),
            booking.guests,
            booking.short_id()
        ))
        .location(booking.hall.display_name())
        .all_day(booking.date)
        .uid(&booking.id)
        .done();

    calendar.push(ical_event);
    calendar.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_february_leap_year() {
        let grid = render_grid(MonthCursor::new(2024, 2), Hall::Small, &BTreeSet::new(), date(2024, 1, 1));
        // 1 Feb 2024 was a Thursday.
        assert_eq!(grid.first_weekday, 4);
        assert_eq!(grid.days_in_month, 29);
        assert_eq!(grid.slots.len(), 33);
        assert_eq!(grid.days().count(), 29);
        assert_eq!(grid.label, "February 2024");
        assert!(grid.slots[..4].iter().all(|s| *s == CalendarSlot::Blank));
    }

    #[test]
    fn test_slot_count_for_every_month() {
        for year in [1900, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let cursor = MonthCursor::new(year, month);
                let grid = render_grid(cursor, Hall::Big, &BTreeSet::new(), date(1900, 1, 1));
                assert_eq!(grid.slots.len() as u32, grid.first_weekday + grid.days_in_month);
                let last = grid.days().last().unwrap();
                assert_eq!(grid.days().count() as u32, grid.days_in_month);
                assert_eq!(last.date.month(), cursor.month);
                assert_eq!(last.date.succ_opt().unwrap().day(), 1);
            }
        }
        assert_eq!(MonthCursor::new(1900, 2).days_in_month(), 28);
        assert_eq!(MonthCursor::new(2000, 2).days_in_month(), 29);
    }

    #[test]
    fn test_classification_priority() {
        let today = date(2025, 3, 10);
        let booked: BTreeSet<_> = [date(2025, 3, 5), date(2025, 3, 10), date(2025, 3, 20)].into();
        let grid = render_grid(MonthCursor::new(2025, 3), Hall::Small, &booked, today);

        assert_eq!(grid.cell(date(2025, 3, 5)).unwrap().state, DayState::Past);
        assert_eq!(grid.cell(date(2025, 3, 9)).unwrap().state, DayState::Past);

        let today_cell = grid.cell(today).unwrap();
        assert_eq!(today_cell.state, DayState::Booked);
        assert!(today_cell.is_today);

        assert_eq!(grid.cell(date(2025, 3, 20)).unwrap().state, DayState::Booked);
        assert_eq!(grid.cell(date(2025, 3, 21)).unwrap().state, DayState::Available);
        assert_eq!(grid.days().filter(|c| c.is_today).count(), 1);
        assert!(grid.days().filter(|c| c.is_clickable()).all(|c| c.date > today || c.date == today));
    }

    #[test]
    fn test_booked_future_date_never_available() {
        let today = date(2025, 1, 1);
        let booked: BTreeSet<_> = (1..=31).map(|d| date(2025, 1, d)).collect();
        let grid = render_grid(MonthCursor::new(2025, 1), Hall::Big, &booked, today);
        assert!(grid.days().all(|c| c.state == DayState::Booked));
    }

    #[test]
    fn test_cursor_normalization() {
        assert_eq!(MonthCursor::new(2024, 13), MonthCursor { year: 2025, month: 1 });
        assert_eq!(MonthCursor::new(2024, 0), MonthCursor { year: 2023, month: 12 });
        assert_eq!(MonthCursor::new(2024, -12), MonthCursor { year: 2022, month: 12 });
        assert_eq!(MonthCursor::new(2024, 37), MonthCursor { year: 2027, month: 1 });
        assert_eq!(MonthCursor::new(i32::MAX, i32::MAX).year, MAX_YEAR);
        assert_eq!(MonthCursor::new(-5, 1).year, MIN_YEAR);
        assert_eq!(MonthCursor::new(i32::MAX, 1), MonthCursor { year: MAX_YEAR, month: 12 });
        assert_eq!(MonthCursor::new(i32::MIN, 7), MonthCursor { year: MIN_YEAR, month: 1 });
    }

    #[test]
    fn test_navigation_stops_at_range_edges() {
        let mut view = CalendarView::new(date(9999, 12, 1));
        assert_eq!(view.change_month(Hall::Small, 1), MonthCursor { year: 9999, month: 12 });
        assert_eq!(view.change_month(Hall::Small, -1), MonthCursor { year: 9999, month: 11 });

        let mut view = CalendarView::new(date(1, 1, 1));
        assert_eq!(view.change_month(Hall::Big, -1), MonthCursor { year: 1, month: 1 });
        assert_eq!(view.change_month(Hall::Big, 1), MonthCursor { year: 1, month: 2 });
    }

    #[test]
    fn test_change_month_wraps_year() {
        let mut view = CalendarView::new(date(2024, 12, 15));
        assert_eq!(view.change_month(Hall::Small, 1), MonthCursor { year: 2025, month: 1 });
        assert_eq!(view.change_month(Hall::Small, -1), MonthCursor { year: 2024, month: 12 });
        assert_eq!(view.change_month(Hall::Small, -12), MonthCursor { year: 2024, month: 11 });
        // The other hall is untouched.
        assert_eq!(view.cursor(Hall::Big), MonthCursor { year: 2024, month: 12 });
    }

    #[test]
    fn test_twelve_steps_forward_is_one_year() {
        let mut view = CalendarView::new(date(2023, 7, 4));
        for _ in 0..12 {
            view.change_month(Hall::Big, 1);
        }
        assert_eq!(view.cursor(Hall::Big), MonthCursor { year: 2024, month: 7 });
    }

    #[test]
    fn test_wrapped_grid_matches_fresh_grid() {
        let today = date(2024, 12, 31);
        let booked: BTreeSet<_> = [date(2025, 1, 2)].into();
        let mut view = CalendarView::new(today);
        let cursor = view.change_month(Hall::Small, 1);
        let navigated = render_grid(cursor, Hall::Small, &booked, today);
        let fresh = render_grid(MonthCursor::new(2025, 1), Hall::Small, &booked, today);
        assert_eq!(navigated, fresh);
    }

    #[test]
    fn test_grid_serialization_shape() {
        let grid = render_grid(MonthCursor::new(2024, 9), Hall::Small, &BTreeSet::new(), date(2024, 9, 1));
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["hall"], "small");
        assert_eq!(json["firstWeekday"], 0);
        assert_eq!(json["slots"][0]["kind"], "day");
        assert_eq!(json["slots"][0]["date"], "2024-09-01");
        assert_eq!(json["slots"][0]["isToday"], true);
        assert_eq!(json["weekdays"][0], "Sun");
    }
}
