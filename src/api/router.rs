use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, booking, event, profile, favorite};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Bookings
        .route("/api/v1/bookings", post(booking::create_booking))
        .route("/api/v1/bookings/upcoming", get(booking::list_upcoming))
        .route("/api/v1/bookings/{id}", get(booking::get_booking))
        .route("/api/v1/bookings/{id}/approve", post(booking::approve_booking))
        .route("/api/v1/bookings/{id}/read-agreement", post(booking::read_agreement))
        .route("/api/v1/bookings/{id}/publish", post(booking::publish_booking))
        .route("/api/v1/bookings/{id}/cancel", post(booking::cancel_booking))

        // Public listings
        .route("/api/v1/events", get(event::list_public_events))
        .route("/api/v1/makers/{maker_id}/events", get(event::list_maker_events))

        // Profiles
        .route("/api/v1/profiles", post(profile::create_profile))
        .route("/api/v1/profiles/me", get(profile::get_my_profile).put(profile::update_my_profile))
        .route("/api/v1/profiles/me/mode", put(profile::set_my_mode))

        // Favorites
        .route("/api/v1/favorites/makers", get(favorite::list_favorite_makers))
        .route("/api/v1/favorites/makers/{maker_id}", post(favorite::toggle_favorite_maker))
        .route("/api/v1/favorites/events", get(favorite::list_favorite_events))
        .route("/api/v1/favorites/events/{booking_id}", post(favorite::toggle_favorite_event))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
