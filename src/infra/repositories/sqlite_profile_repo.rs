use crate::domain::{
    models::profile::{Profile, ProfileRow, Role},
    ports::ProfileRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteProfileRepo {
    pool: SqlitePool,
}

impl SqliteProfileRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepo {
    async fn create(&self, profile: &Profile) -> Result<Profile, AppError> {
        sqlx::query_as::<_, ProfileRow>(
            "INSERT INTO profiles (id, display_name, role, current_mode, bio, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&profile.id)
            .bind(&profile.display_name)
            .bind(profile.role.as_str())
            .bind(profile.current_mode.as_str())
            .bind(&profile.bio)
            .bind(profile.created_at)
            .bind(profile.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?
            .try_into()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>, AppError> {
        sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .map(Profile::try_from)
            .transpose()
    }

    async fn update(&self, profile: &Profile) -> Result<Profile, AppError> {
        sqlx::query_as::<_, ProfileRow>(
            "UPDATE profiles SET display_name = ?, bio = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
            .bind(&profile.display_name)
            .bind(&profile.bio)
            .bind(profile.updated_at)
            .bind(&profile.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Profile not found".into()))?
            .try_into()
    }

    async fn set_mode(&self, id: &str, mode: Role) -> Result<Profile, AppError> {
        sqlx::query_as::<_, ProfileRow>(
            "UPDATE profiles SET current_mode = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
            .bind(mode.as_str())
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Profile not found".into()))?
            .try_into()
    }
}
