use serde::Serialize;

use crate::domain::models::booking::Booking;
use crate::domain::services::{
    agreement::{both_parties_read_agreement, can_be_published, is_receiver, is_sender},
    display::{format_safe_date, payment_display_text, BadgeVariant},
};

/// A booking as rendered for one viewer: the stored fields plus the
/// evaluated agreement state.
#[derive(Serialize)]
pub struct BookingView {
    #[serde(flatten)]
    pub booking: Booking,
    pub is_sender: bool,
    pub is_receiver: bool,
    pub both_parties_read_agreement: bool,
    pub can_be_published: bool,
    pub payment_display_text: String,
    pub status_badge: BadgeVariant,
    pub event_date_display: String,
}

impl BookingView {
    pub fn for_viewer(booking: Booking, viewer_id: Option<&str>) -> Self {
        let viewer_id = viewer_id.unwrap_or_default();
        Self {
            is_sender: !viewer_id.is_empty() && is_sender(viewer_id, &booking),
            is_receiver: !viewer_id.is_empty() && is_receiver(viewer_id, &booking),
            both_parties_read_agreement: both_parties_read_agreement(&booking),
            can_be_published: can_be_published(&booking),
            payment_display_text: payment_display_text(&booking),
            status_badge: BadgeVariant::from(&booking.status),
            event_date_display: format_safe_date(booking.event_date.as_deref()),
            booking,
        }
    }

    pub fn list(bookings: Vec<Booking>, viewer_id: Option<&str>) -> Vec<Self> {
        bookings.into_iter().map(|b| Self::for_viewer(b, viewer_id)).collect()
    }
}

#[derive(Serialize)]
pub struct FavoriteToggleResponse {
    pub favorite: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
