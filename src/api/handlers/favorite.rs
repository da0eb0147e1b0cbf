use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::FavoriteToggleResponse;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_favorite_makers(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.favorite_service.makers(&user.id).await?))
}

pub async fn toggle_favorite_maker(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(maker_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let favorite = state.favorite_service.toggle_maker(&user.id, &maker_id).await?;
    Ok(Json(FavoriteToggleResponse { favorite }))
}

pub async fn list_favorite_events(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.favorite_service.events(&user.id).await?))
}

pub async fn toggle_favorite_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // Private agreements are off limits to outsiders, same as reading them
    state.booking_service.get_for_viewer(&booking_id, Some(&user.id)).await?;

    let favorite = state.favorite_service.toggle_event(&user.id, &booking_id).await?;
    Ok(Json(FavoriteToggleResponse { favorite }))
}
