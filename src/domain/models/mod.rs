pub mod auth;
pub mod booking;
pub mod favorite;
pub mod profile;
