use serde::Deserialize;
use serde_json::Number;
use crate::domain::services::validation::BookingCandidate;

/// `guests` arrives either as a JSON number or as a numeric string.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum GuestsField {
    Count(Number),
    Text(String),
}

impl GuestsField {
    pub fn into_text(self) -> String {
        match self {
            GuestsField::Count(n) => n.to_string(),
            GuestsField::Text(s) => s,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date: Option<String>,
    pub guests: Option<GuestsField>,
    pub event_type: Option<String>,
    pub hall: Option<String>,
    pub package: Option<String>,
}

impl From<CreateBookingRequest> for BookingCandidate {
    fn from(req: CreateBookingRequest) -> Self {
        BookingCandidate {
            name: req.name,
            email: req.email,
            phone: req.phone,
            date: req.date,
            guests: req.guests.map(GuestsField::into_text),
            event_type: req.event_type,
            hall: req.hall,
            package: req.package,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<i32>,
}

#[derive(Deserialize, Debug)]
pub struct QuoteQuery {
    pub hall: Option<String>,
    pub package: Option<String>,
}
