use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::models::booking::{NewBookingParams, Package};
use crate::domain::models::hall::Hall;
use crate::error::AppError;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\u{0590}-\u{05FF} ]+$").expect("name pattern"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

// 0 / 972 / +972, then a landline area code (2,3,4,8,9), a mobile prefix (5x)
// or a VoIP/nationwide prefix (7x), then 7 subscriber digits.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+972|972|0)(?:[23489]|5\d|7\d)\d{7}$").expect("phone pattern"));

pub fn validate_name(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.chars().count() >= 2 && NAME_PATTERN.is_match(trimmed)
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

pub fn validate_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    PHONE_PATTERN.is_match(&digits)
}

/// Raw booking submission as it arrives from a form: every field optional,
/// nothing parsed yet.
#[derive(Debug, Clone, Default)]
pub struct BookingCandidate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date: Option<String>,
    pub guests: Option<String>,
    pub event_type: Option<String>,
    pub hall: Option<String>,
    pub package: Option<String>,
}

fn required(field: &Option<String>) -> Result<&str, AppError> {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::Validation("All fields are required".into())),
    }
}

impl BookingCandidate {
    /// Checks presence, formats and ranges. `today` is the venue-local date;
    /// bookings for earlier days are rejected.
    pub fn validate(&self, today: NaiveDate) -> Result<NewBookingParams, AppError> {
        let name = required(&self.name)?;
        let email = required(&self.email)?;
        let phone = required(&self.phone)?;
        let date = required(&self.date)?;
        let guests = required(&self.guests)?;
        let event_type = required(&self.event_type)?;
        let hall = required(&self.hall)?;
        let package = required(&self.package)?;

        if !validate_name(name) {
            return Err(AppError::Validation("Please enter a valid name (letters only, at least 2 characters)".into()));
        }
        if !validate_email(email) {
            return Err(AppError::Validation("Please enter a valid email address".into()));
        }
        if !validate_phone(phone) {
            return Err(AppError::Validation("Please enter a valid Israeli phone number".into()));
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;
        if date < today {
            return Err(AppError::Validation("Cannot book a date in the past".into()));
        }

        let guests: i32 = guests
            .parse()
            .ok()
            .filter(|g| *g > 0)
            .ok_or_else(|| AppError::Validation("Guests must be a positive number".into()))?;

        let hall: Hall = hall.parse().map_err(|e| AppError::Validation(format!("{}", e)))?;
        let package: Package = package.parse().map_err(|e| AppError::Validation(format!("{}", e)))?;

        Ok(NewBookingParams {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            date,
            guests,
            event_type: event_type.to_string(),
            hall,
            package,
        })
    }
}
