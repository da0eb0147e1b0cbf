use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::maybe_auth::MaybeAuthUser;
use crate::api::dtos::responses::BookingView;
use crate::error::AppError;
use std::sync::Arc;

/// Published events, open to anonymous visitors.
pub async fn list_public_events(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.all_public().await?;
    Ok(Json(BookingView::list(bookings, user.as_ref().map(|u| u.id.as_str()))))
}

pub async fn list_maker_events(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(user): MaybeAuthUser,
    Path(maker_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.public_for_maker(&maker_id).await?;
    Ok(Json(BookingView::list(bookings, user.as_ref().map(|u| u.id.as_str()))))
}
