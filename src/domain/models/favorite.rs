use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct FavoriteMaker {
    pub user_id: String,
    pub maker_id: String,
    pub created_at: DateTime<Utc>,
}

impl FavoriteMaker {
    pub fn new(user_id: String, maker_id: String) -> Self {
        Self { user_id, maker_id, created_at: Utc::now() }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct FavoriteEvent {
    pub user_id: String,
    pub booking_id: String,
    pub created_at: DateTime<Utc>,
}

impl FavoriteEvent {
    pub fn new(user_id: String, booking_id: String) -> Self {
        Self { user_id, booking_id, created_at: Utc::now() }
    }
}
