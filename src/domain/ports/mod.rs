use crate::domain::models::{
    booking::{Booking, Party},
    favorite::{FavoriteEvent, FavoriteMaker},
    profile::{Profile, Role},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// Upcoming bookings where the user is sender or receiver, earliest event first, undated last.
    async fn list_upcoming_for_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;
    /// Publicly listed bookings where the maker is a party: `status = upcoming`,
    /// `is_public_after_approval` and `both_parties_approved`.
    ///
    /// `published_at` plays no part here. Publishing does not control listing
    /// visibility, so an approved public booking is listed before it is published.
    async fn list_public_for_maker(&self, maker_id: &str) -> Result<Vec<Booking>, AppError>;
    /// Same filter as [`list_public_for_maker`](Self::list_public_for_maker), across all makers.
    async fn list_all_public(&self) -> Result<Vec<Booking>, AppError>;
    /// Writes only the given party's approval column and recomputes `both_parties_approved` in the same statement.
    async fn set_approval(&self, id: &str, party: Party, approved: bool) -> Result<Booking, AppError>;
    async fn mark_agreement_read(&self, id: &str, party: Party) -> Result<Booking, AppError>;
    /// Returns `None` when the row no longer satisfies the publish gate.
    async fn publish(&self, id: &str, at: DateTime<Utc>) -> Result<Option<Booking>, AppError>;
    async fn cancel(&self, id: &str) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, profile: &Profile) -> Result<Profile, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>, AppError>;
    async fn update(&self, profile: &Profile) -> Result<Profile, AppError>;
    async fn set_mode(&self, id: &str, mode: Role) -> Result<Profile, AppError>;
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn is_favorite_maker(&self, user_id: &str, maker_id: &str) -> Result<bool, AppError>;
    async fn add_favorite_maker(&self, favorite: &FavoriteMaker) -> Result<(), AppError>;
    async fn remove_favorite_maker(&self, user_id: &str, maker_id: &str) -> Result<(), AppError>;
    async fn list_favorite_makers(&self, user_id: &str) -> Result<Vec<FavoriteMaker>, AppError>;

    async fn is_favorite_event(&self, user_id: &str, booking_id: &str) -> Result<bool, AppError>;
    async fn add_favorite_event(&self, favorite: &FavoriteEvent) -> Result<(), AppError>;
    async fn remove_favorite_event(&self, user_id: &str, booking_id: &str) -> Result<(), AppError>;
    async fn list_favorite_events(&self, user_id: &str) -> Result<Vec<FavoriteEvent>, AppError>;
}
