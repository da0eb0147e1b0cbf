//! In-process domain event bus.
//!
//! Profile, mode and agreement changes are announced here as typed events
//! instead of being pushed through shared mutable state. Subscribers get
//! their own receiver; a slow subscriber lags and loses the oldest events
//! without blocking publishers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::domain::models::{booking::Party, profile::Role};

const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    ModeChanged { user_id: String, mode: Role },
    ProfileUpdated { user_id: String },
    BookingCreated { booking_id: String, sender_id: String, receiver_id: String },
    BookingApproved { booking_id: String, party: Party, approved: bool },
    AgreementRead { booking_id: String, party: Party },
    BookingPublished { booking_id: String, published_at: DateTime<Utc> },
    BookingCancelled { booking_id: String },
}

impl DomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::ModeChanged { .. } => "MODE_CHANGED",
            DomainEvent::ProfileUpdated { .. } => "PROFILE_UPDATED",
            DomainEvent::BookingCreated { .. } => "BOOKING_CREATED",
            DomainEvent::BookingApproved { .. } => "BOOKING_APPROVED",
            DomainEvent::AgreementRead { .. } => "AGREEMENT_READ",
            DomainEvent::BookingPublished { .. } => "BOOKING_PUBLISHED",
            DomainEvent::BookingCancelled { .. } => "BOOKING_CANCELLED",
        }
    }
}

#[derive(Clone, Debug)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns how many subscribers received the event. Zero subscribers is not an error.
    pub fn publish(&self, event: DomainEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(DomainEvent::BookingCancelled { booking_id: "b".into() }), 0);
    }

    #[tokio::test]
    async fn test_every_subscriber_sees_event() {
        let bus = EventBus::new(8);
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        let event = DomainEvent::ModeChanged { user_id: "u".into(), mode: Role::Goer };
        assert_eq!(bus.publish(event.clone()), 2);

        assert_eq!(a.recv().await.unwrap(), event);
        assert_eq!(b.recv().await.unwrap(), event);
    }

    #[test]
    fn test_serialized_shape() {
        let event = DomainEvent::BookingApproved { booking_id: "b".into(), party: Party::Receiver, approved: true };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "BOOKING_APPROVED");
        assert_eq!(json["party"], "receiver");
        assert_eq!(event.name(), "BOOKING_APPROVED");
    }
}
