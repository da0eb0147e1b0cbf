pub mod booking;
pub mod event;
pub mod favorite;
pub mod health;
pub mod profile;
