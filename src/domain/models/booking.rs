use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use crate::domain::models::hall::{Hall, ParseEnumError};
use crate::domain::services::pricing::Quote;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Package {
    Basic,
    Premium,
    Luxury,
}

impl Package {
    pub fn as_str(&self) -> &'static str {
        match self {
            Package::Basic => "basic",
            Package::Premium => "premium",
            Package::Luxury => "luxury",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Package::Basic => "Basic",
            Package::Premium => "Premium",
            Package::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Package {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Package::Basic),
            "premium" => Ok(Package::Premium),
            "luxury" => Ok(Package::Luxury),
            _ => Err(ParseEnumError::new("package", s)),
        }
    }
}

impl TryFrom<String> for Package {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Active bookings hold their date in the booked-date index.
    pub fn is_active(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            _ => Err(ParseEnumError::new("status", s)),
        }
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub guests: i32,
    pub event_type: String,
    #[sqlx(try_from = "String")]
    pub hall: Hall,
    #[sqlx(try_from = "String")]
    pub package: Package,
    pub total: f64,
    pub deposit: f64,
    #[sqlx(try_from = "String")]
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// A validated submission, ready to be priced and stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookingParams {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub guests: i32,
    pub event_type: String,
    pub hall: Hall,
    pub package: Package,
}

impl Booking {
    pub fn new(params: NewBookingParams, quote: Quote) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            email: params.email,
            phone: params.phone,
            date: params.date,
            guests: params.guests,
            event_type: params.event_type,
            hall: params.hall,
            package: params.package,
            total: quote.total,
            deposit: quote.deposit,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}
