use std::sync::Arc;
use tracing::debug;

use crate::domain::{
    models::favorite::{FavoriteEvent, FavoriteMaker},
    ports::FavoriteRepository,
};
use crate::error::AppError;

/// Read-modify-write toggles over the caller's favorites.
pub struct FavoriteService {
    repo: Arc<dyn FavoriteRepository>,
}

impl FavoriteService {
    pub fn new(repo: Arc<dyn FavoriteRepository>) -> Self {
        Self { repo }
    }

    /// Returns whether the maker is a favorite after the toggle.
    pub async fn toggle_maker(&self, user_id: &str, maker_id: &str) -> Result<bool, AppError> {
        if user_id == maker_id {
            return Err(AppError::Validation("You cannot favorite yourself".into()));
        }

        if self.repo.is_favorite_maker(user_id, maker_id).await? {
            self.repo.remove_favorite_maker(user_id, maker_id).await?;
            debug!("{} unfavorited maker {}", user_id, maker_id);
            Ok(false)
        } else {
            self.repo.add_favorite_maker(&FavoriteMaker::new(user_id.to_string(), maker_id.to_string())).await?;
            debug!("{} favorited maker {}", user_id, maker_id);
            Ok(true)
        }
    }

    pub async fn toggle_event(&self, user_id: &str, booking_id: &str) -> Result<bool, AppError> {
        if self.repo.is_favorite_event(user_id, booking_id).await? {
            self.repo.remove_favorite_event(user_id, booking_id).await?;
            Ok(false)
        } else {
            self.repo.add_favorite_event(&FavoriteEvent::new(user_id.to_string(), booking_id.to_string())).await?;
            Ok(true)
        }
    }

    pub async fn makers(&self, user_id: &str) -> Result<Vec<FavoriteMaker>, AppError> {
        self.repo.list_favorite_makers(user_id).await
    }

    pub async fn events(&self, user_id: &str) -> Result<Vec<FavoriteEvent>, AppError> {
        self.repo.list_favorite_events(user_id).await
    }
}
