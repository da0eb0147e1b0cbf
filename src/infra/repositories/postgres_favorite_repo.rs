use crate::domain::{
    models::favorite::{FavoriteEvent, FavoriteMaker},
    ports::FavoriteRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresFavoriteRepo {
    pool: PgPool,
}

impl PostgresFavoriteRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepo {
    async fn is_favorite_maker(&self, user_id: &str, maker_id: &str) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorite_makers WHERE user_id = $1 AND maker_id = $2")
            .bind(user_id)
            .bind(maker_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(count > 0)
    }

    async fn add_favorite_maker(&self, favorite: &FavoriteMaker) -> Result<(), AppError> {
        sqlx::query("INSERT INTO favorite_makers (user_id, maker_id, created_at) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING")
            .bind(&favorite.user_id)
            .bind(&favorite.maker_id)
            .bind(favorite.created_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn remove_favorite_maker(&self, user_id: &str, maker_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM favorite_makers WHERE user_id = $1 AND maker_id = $2")
            .bind(user_id)
            .bind(maker_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_favorite_makers(&self, user_id: &str) -> Result<Vec<FavoriteMaker>, AppError> {
        sqlx::query_as::<_, FavoriteMaker>("SELECT * FROM favorite_makers WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn is_favorite_event(&self, user_id: &str, booking_id: &str) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorite_events WHERE user_id = $1 AND booking_id = $2")
            .bind(user_id)
            .bind(booking_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(count > 0)
    }

    async fn add_favorite_event(&self, favorite: &FavoriteEvent) -> Result<(), AppError> {
        sqlx::query("INSERT INTO favorite_events (user_id, booking_id, created_at) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING")
            .bind(&favorite.user_id)
            .bind(&favorite.booking_id)
            .bind(favorite.created_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn remove_favorite_event(&self, user_id: &str, booking_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM favorite_events WHERE user_id = $1 AND booking_id = $2")
            .bind(user_id)
            .bind(booking_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_favorite_events(&self, user_id: &str) -> Result<Vec<FavoriteEvent>, AppError> {
        sqlx::query_as::<_, FavoriteEvent>("SELECT * FROM favorite_events WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
