use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AuthUser, maybe_auth::MaybeAuthUser};
use crate::api::dtos::{
    requests::{ApproveBookingRequest, CreateBookingRequest},
    responses::BookingView,
};
use crate::domain::models::booking::NewBookingParams;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_booking: {} proposing to {}", user.id, payload.receiver_id);

    let params = NewBookingParams {
        sender_id: user.id.clone(),
        receiver_id: payload.receiver_id,
        title: payload.title,
        description: payload.description,
        event_date: payload.event_date,
        time: payload.time,
        venue: payload.venue,
        address: payload.address,
        ticket_price: payload.ticket_price,
        audience_estimate: payload.audience_estimate,
        artist_fee: payload.artist_fee,
        price_musician: payload.price_musician,
        door_deal: payload.door_deal,
        by_agreement: payload.by_agreement,
        door_percentage: payload.door_percentage,
        is_public_after_approval: payload.is_public_after_approval,
    };

    let created = state.booking_service.create(params).await?;
    Ok((StatusCode::CREATED, Json(BookingView::for_viewer(created, Some(&user.id)))))
}

pub async fn list_upcoming(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.upcoming_for_user(&user.id).await?;
    Ok(Json(BookingView::list(bookings, Some(&user.id))))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(user): MaybeAuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let viewer_id = user.as_ref().map(|u| u.id.as_str());
    let booking = state.booking_service.get_for_viewer(&booking_id, viewer_id).await?;
    Ok(Json(BookingView::for_viewer(booking, viewer_id)))
}

pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
    payload: Option<Json<ApproveBookingRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let approved = payload.map(|Json(p)| p.approved).unwrap_or(true);
    let booking = state.booking_service.set_approval(&booking_id, &user.id, approved).await?;
    Ok(Json(BookingView::for_viewer(booking, Some(&user.id))))
}

pub async fn read_agreement(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.mark_agreement_read(&booking_id, &user.id).await?;
    Ok(Json(BookingView::for_viewer(booking, Some(&user.id))))
}

pub async fn publish_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.publish(&booking_id, &user.id).await?;
    Ok(Json(BookingView::for_viewer(booking, Some(&user.id))))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.cancel(&booking_id, &user.id).await?;
    Ok(Json(BookingView::for_viewer(booking, Some(&user.id))))
}
