use std::sync::Arc;
use chrono::Utc;
use tokio::sync::broadcast;
use tracing::info;

use crate::domain::{
    events::{DomainEvent, EventBus},
    models::profile::{Profile, Role},
    ports::ProfileRepository,
    services::retry::{poll_with_backoff, RetryPolicy},
};
use crate::error::AppError;

pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
    events: EventBus,
    poll_policy: RetryPolicy,
}

pub struct ProfileChanges {
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfileRepository>, events: EventBus, poll_policy: RetryPolicy) -> Self {
        Self { repo, events, poll_policy }
    }

    pub async fn create(&self, user_id: &str, display_name: String, role: Role, bio: Option<String>) -> Result<Profile, AppError> {
        if display_name.trim().is_empty() {
            return Err(AppError::Validation("display_name is required".into()));
        }
        if self.repo.find_by_id(user_id).await?.is_some() {
            return Err(AppError::Conflict("Profile already exists".into()));
        }

        let created = self.repo.create(&Profile::new(user_id.to_string(), display_name, role, bio)).await?;
        info!("Profile created: {} as {}", created.id, created.role);
        Ok(created)
    }

    pub async fn get(&self, user_id: &str) -> Result<Profile, AppError> {
        self.repo.find_by_id(user_id).await?
            .ok_or_else(|| AppError::NotFound("Profile not found".into()))
    }

    /// Waits for a profile that the sign-up hook may not have written yet.
    pub async fn wait_for_profile(&self, user_id: &str, cancel: &mut broadcast::Receiver<()>) -> Result<Profile, AppError> {
        let repo = self.repo.clone();
        poll_with_backoff(&self.poll_policy, cancel, "Profile", || {
            let repo = repo.clone();
            let user_id = user_id.to_string();
            async move { repo.find_by_id(&user_id).await }
        }).await
    }

    pub async fn update(&self, user_id: &str, changes: ProfileChanges) -> Result<Profile, AppError> {
        let mut profile = self.get(user_id).await?;

        if let Some(name) = changes.display_name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("display_name cannot be empty".into()));
            }
            profile.display_name = name;
        }
        if let Some(bio) = changes.bio {
            profile.bio = Some(bio);
        }
        profile.updated_at = Utc::now();

        let updated = self.repo.update(&profile).await?;
        self.events.publish(DomainEvent::ProfileUpdated { user_id: updated.id.clone() });
        Ok(updated)
    }

    pub async fn set_mode(&self, user_id: &str, mode: Role) -> Result<Profile, AppError> {
        let profile = self.get(user_id).await?;

        if !profile.can_use_mode(mode) {
            return Err(AppError::Validation(format!("A {} profile cannot switch to {} mode", profile.role, mode)));
        }
        if profile.current_mode == mode {
            return Ok(profile);
        }

        let updated = self.repo.set_mode(user_id, mode).await?;
        self.events.publish(DomainEvent::ModeChanged { user_id: updated.id.clone(), mode });

        info!("Profile {} switched to {} mode", user_id, mode);
        Ok(updated)
    }
}
