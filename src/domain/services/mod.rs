pub mod booking_store;
pub mod calendar;
pub mod notification;
pub mod pricing;
pub mod session;
pub mod validation;
