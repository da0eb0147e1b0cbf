pub mod sqlite_booking_repo;
pub mod sqlite_profile_repo;
pub mod sqlite_favorite_repo;

pub mod postgres_booking_repo;
pub mod postgres_profile_repo;
pub mod postgres_favorite_repo;
