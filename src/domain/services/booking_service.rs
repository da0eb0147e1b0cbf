use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{
    events::{DomainEvent, EventBus},
    models::booking::{Booking, NewBookingParams},
    ports::BookingRepository,
    services::agreement::{can_be_published, involvement, is_publicly_listed},
};
use crate::error::AppError;

pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
    events: EventBus,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>, events: EventBus) -> Self {
        Self { repo, events }
    }

    pub async fn create(&self, params: NewBookingParams) -> Result<Booking, AppError> {
        validate_new_booking(&params)?;

        let created = self.repo.create(&Booking::new(params)).await?;
        info!("Booking proposed: {} ({} -> {})", created.id, created.sender_id, created.receiver_id);

        self.events.publish(DomainEvent::BookingCreated {
            booking_id: created.id.clone(),
            sender_id: created.sender_id.clone(),
            receiver_id: created.receiver_id.clone(),
        });
        Ok(created)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Booking, AppError> {
        self.repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    /// Parties always see the booking; anyone else only once it is publicly listed.
    pub async fn get_for_viewer(&self, id: &str, viewer_id: Option<&str>) -> Result<Booking, AppError> {
        let booking = self.get_by_id(id).await?;

        let is_party = viewer_id.is_some_and(|uid| involvement(uid, &booking).is_party());
        if !is_party && !is_publicly_listed(&booking) {
            return Err(AppError::Forbidden("Booking is not visible to you".into()));
        }
        Ok(booking)
    }

    pub async fn upcoming_for_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        self.repo.list_upcoming_for_user(user_id).await
    }

    /// Listing is gated by `is_publicly_listed`, not by `publish`.
    pub async fn public_for_maker(&self, maker_id: &str) -> Result<Vec<Booking>, AppError> {
        self.repo.list_public_for_maker(maker_id).await
    }

    pub async fn all_public(&self) -> Result<Vec<Booking>, AppError> {
        self.repo.list_all_public().await
    }

    pub async fn set_approval(&self, id: &str, user_id: &str, approved: bool) -> Result<Booking, AppError> {
        let mut booking = self.load_for_party_write(id, user_id).await?;

        for &party in involvement(user_id, &booking).parties() {
            booking = self.repo.set_approval(id, party, approved).await?;
            self.events.publish(DomainEvent::BookingApproved {
                booking_id: booking.id.clone(),
                party,
                approved,
            });
        }

        info!("Booking {} approval set to {} by {}", id, approved, user_id);
        Ok(booking)
    }

    pub async fn mark_agreement_read(&self, id: &str, user_id: &str) -> Result<Booking, AppError> {
        let mut booking = self.load_for_party_write(id, user_id).await?;

        for &party in involvement(user_id, &booking).parties() {
            booking = self.repo.mark_agreement_read(id, party).await?;
            self.events.publish(DomainEvent::AgreementRead {
                booking_id: booking.id.clone(),
                party,
            });
        }

        info!("Booking {} agreement read by {}", id, user_id);
        Ok(booking)
    }

    pub async fn publish(&self, id: &str, user_id: &str) -> Result<Booking, AppError> {
        let booking = self.load_for_party_write(id, user_id).await?;

        if !can_be_published(&booking) {
            return Err(AppError::Conflict(
                "Both parties must approve and read the agreement before publishing".into()
            ));
        }

        // The repository re-checks the gate in the UPDATE itself, so a
        // concurrent withdrawal of approval surfaces here as `None`.
        let published = self.repo.publish(id, Utc::now()).await?
            .ok_or_else(|| {
                warn!("Publish of booking {} lost a race with a flag change", id);
                AppError::Conflict("Booking is no longer publishable".into())
            })?;

        if let Some(at) = published.published_at {
            self.events.publish(DomainEvent::BookingPublished {
                booking_id: published.id.clone(),
                published_at: at,
            });
        }

        info!("Booking {} published by {}", id, user_id);
        Ok(published)
    }

    pub async fn cancel(&self, id: &str, user_id: &str) -> Result<Booking, AppError> {
        let booking = self.get_by_id(id).await?;
        if !involvement(user_id, &booking).is_party() {
            return Err(AppError::Forbidden("Only the sender or receiver can cancel a booking".into()));
        }
        if booking.is_cancelled() {
            return Ok(booking);
        }

        let cancelled = self.repo.cancel(id).await?;
        self.events.publish(DomainEvent::BookingCancelled { booking_id: cancelled.id.clone() });

        info!("Booking {} cancelled by {}", id, user_id);
        Ok(cancelled)
    }

    async fn load_for_party_write(&self, id: &str, user_id: &str) -> Result<Booking, AppError> {
        let booking = self.get_by_id(id).await?;

        if !involvement(user_id, &booking).is_party() {
            return Err(AppError::Forbidden("Only the sender or receiver can change this booking".into()));
        }
        if booking.is_cancelled() {
            return Err(AppError::Validation("Booking is cancelled".into()));
        }
        Ok(booking)
    }
}

pub fn validate_new_booking(params: &NewBookingParams) -> Result<(), AppError> {
    if params.receiver_id.trim().is_empty() {
        return Err(AppError::Validation("receiver_id is required".into()));
    }
    if params.receiver_id == params.sender_id {
        return Err(AppError::Validation("Cannot propose a booking to yourself".into()));
    }
    if params.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".into()));
    }
    if params.door_deal && params.by_agreement {
        return Err(AppError::Validation("Choose either a door deal or payment by agreement, not both".into()));
    }
    if params.door_percentage.is_some_and(|p| !(0.0..=100.0).contains(&p)) {
        return Err(AppError::Validation("door_percentage must be between 0 and 100".into()));
    }
    if params.ticket_price.is_some_and(|p| p < 0.0) || params.artist_fee.is_some_and(|f| f < 0.0) {
        return Err(AppError::Validation("Prices cannot be negative".into()));
    }
    if params.audience_estimate.is_some_and(|a| a < 0) {
        return Err(AppError::Validation("audience_estimate cannot be negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> NewBookingParams {
        NewBookingParams {
            sender_id: "sender".into(),
            receiver_id: "receiver".into(),
            title: "Summer session".into(),
            description: None,
            event_date: Some("2024-07-01".into()),
            time: Some("20:00".into()),
            venue: Some("Blå".into()),
            address: None,
            ticket_price: Some(200.0),
            audience_estimate: Some(150),
            artist_fee: None,
            price_musician: None,
            door_deal: true,
            by_agreement: false,
            door_percentage: Some(70.0),
            is_public_after_approval: true,
        }
    }

    #[test]
    fn test_valid_booking_passes() {
        assert!(validate_new_booking(&params()).is_ok());
    }

    #[test]
    fn test_rejects_invalid_bookings() {
        let cases: Vec<Box<dyn Fn(&mut NewBookingParams)>> = vec![
            Box::new(|p| p.receiver_id = "sender".into()),
            Box::new(|p| p.receiver_id = " ".into()),
            Box::new(|p| p.title = "".into()),
            Box::new(|p| p.by_agreement = true),
            Box::new(|p| p.door_percentage = Some(101.0)),
            Box::new(|p| p.ticket_price = Some(-5.0)),
            Box::new(|p| p.audience_estimate = Some(-1)),
        ];

        for mutate in cases {
            let mut p = params();
            mutate(&mut p);
            assert!(matches!(validate_new_booking(&p), Err(AppError::Validation(_))));
        }
    }
}
