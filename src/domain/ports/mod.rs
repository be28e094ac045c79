use crate::domain::models::{
    booking::{Booking, BookingStatus},
    contact::ContactMessage,
    hall::Hall,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// Newest `created_at` first.
    async fn list(&self) -> Result<Vec<Booking>, AppError>;
    async fn list_active(&self) -> Result<Vec<Booking>, AppError>;
    /// Whether any non-cancelled booking still holds `date` in `hall`.
    async fn has_active_on(&self, hall: Hall, date: NaiveDate) -> Result<bool, AppError>;
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Option<Booking>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, message: &ContactMessage) -> Result<ContactMessage, AppError>;
    async fn list(&self) -> Result<Vec<ContactMessage>, AppError>;
}

pub struct EmailAttachment<'a> {
    pub filename: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment: Option<EmailAttachment<'_>>,
    ) -> Result<(), AppError>;
}
