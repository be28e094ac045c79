pub mod sqlite_booking_repo;
pub mod sqlite_contact_repo;

pub mod postgres_booking_repo;
pub mod postgres_contact_repo;
