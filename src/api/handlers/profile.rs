use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateProfileRequest, SetModeRequest, UpdateProfileRequest};
use crate::domain::services::profile_service::ProfileChanges;
use crate::error::AppError;
use std::sync::Arc;
use tokio::sync::broadcast;

pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.profile_service
        .create(&user.id, payload.display_name, payload.role, payload.bio)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn get_my_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    // Dropping the request future drops both ends and ends the poll.
    let (_cancel_tx, mut cancel_rx) = broadcast::channel::<()>(1);

    let profile = state.profile_service.wait_for_profile(&user.id, &mut cancel_rx).await?;
    Ok(Json(profile))
}

pub async fn update_my_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let changes = ProfileChanges {
        display_name: payload.display_name,
        bio: payload.bio,
    };
    let profile = state.profile_service.update(&user.id, changes).await?;
    Ok(Json(profile))
}

pub async fn set_my_mode(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<SetModeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.profile_service.set_mode(&user.id, payload.mode).await?;
    Ok(Json(profile))
}
