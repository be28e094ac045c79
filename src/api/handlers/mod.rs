pub mod booking;
pub mod calendar;
pub mod contact;
pub mod health;
