pub mod agreement;
pub mod booking_service;
pub mod display;
pub mod favorite_service;
pub mod profile_service;
pub mod retry;
