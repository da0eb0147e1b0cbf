//! Agreement state evaluation.
//!
//! Pure functions over a [`Booking`]. Nothing here touches storage; the
//! stored flags are taken as-is and the derived state is recomputed on
//! every call.

use serde::Serialize;

use crate::domain::models::booking::{Booking, BookingStatus, Party};

pub fn is_sender(user_id: &str, booking: &Booking) -> bool {
    user_id == booking.sender_id
}

pub fn is_receiver(user_id: &str, booking: &Booking) -> bool {
    user_id == booking.receiver_id
}

pub fn both_parties_approved(booking: &Booking) -> bool {
    booking.approved_by_sender && booking.approved_by_receiver
}

pub fn both_parties_read_agreement(booking: &Booking) -> bool {
    booking.sender_read_agreement && booking.receiver_read_agreement
}

pub fn can_be_published(booking: &Booking) -> bool {
    both_parties_approved(booking) && both_parties_read_agreement(booking)
}

/// The filter the public listings apply, evaluated on a single booking.
pub fn is_publicly_listed(booking: &Booking) -> bool {
    booking.status == BookingStatus::Upcoming
        && booking.is_public_after_approval
        && booking.both_parties_approved
}

/// How a user relates to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Involvement {
    Sender,
    Receiver,
    /// Self-booking: the same user on both sides.
    Both,
    None,
}

impl Involvement {
    /// The flag columns a user with this involvement is allowed to write.
    pub fn parties(&self) -> &'static [Party] {
        match self {
            Involvement::Sender => &[Party::Sender],
            Involvement::Receiver => &[Party::Receiver],
            Involvement::Both => &[Party::Sender, Party::Receiver],
            Involvement::None => &[],
        }
    }

    pub fn is_party(&self) -> bool {
        *self != Involvement::None
    }
}

pub fn involvement(user_id: &str, booking: &Booking) -> Involvement {
    match (is_sender(user_id, booking), is_receiver(user_id, booking)) {
        (true, true) => Involvement::Both,
        (true, false) => Involvement::Sender,
        (false, true) => Involvement::Receiver,
        (false, false) => Involvement::None,
    }
}

pub const DEFAULT_DOOR_PERCENTAGE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub enum PricingMode {
    DoorDeal { percentage: f64 },
    ByAgreement,
    Fee { amount: String },
}

/// Door deal wins over "by agreement", which wins over a plain fee.
/// Zero or empty values fall through to the next source.
pub fn pricing_mode(booking: &Booking) -> PricingMode {
    if booking.door_deal {
        let percentage = booking.door_percentage
            .filter(|p| *p != 0.0)
            .unwrap_or(DEFAULT_DOOR_PERCENTAGE);
        return PricingMode::DoorDeal { percentage };
    }
    if booking.by_agreement {
        return PricingMode::ByAgreement;
    }

    let amount = booking.artist_fee
        .filter(|fee| *fee != 0.0 && !fee.is_nan())
        .map(|fee| fee.to_string())
        .or_else(|| booking.price_musician.clone().filter(|p| !p.is_empty()))
        .unwrap_or_else(|| "0".to_string());

    PricingMode::Fee { amount }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::NewBookingParams;

    fn booking(sender: &str, receiver: &str) -> Booking {
        Booking::new(NewBookingParams {
            sender_id: sender.into(),
            receiver_id: receiver.into(),
            title: "Gig".into(),
            description: None,
            event_date: None,
            time: None,
            venue: None,
            address: None,
            ticket_price: None,
            audience_estimate: None,
            artist_fee: None,
            price_musician: None,
            door_deal: false,
            by_agreement: false,
            door_percentage: None,
            is_public_after_approval: true,
        })
    }

    #[test]
    fn test_can_be_published_matches_all_four_flags() {
        let mut b = booking("s", "r");
        for mask in 0u8..16 {
            b.approved_by_sender = mask & 1 != 0;
            b.approved_by_receiver = mask & 2 != 0;
            b.sender_read_agreement = mask & 4 != 0;
            b.receiver_read_agreement = mask & 8 != 0;
            assert_eq!(can_be_published(&b), mask == 15, "mask {:04b}", mask);
        }
    }

    #[test]
    fn test_sender_and_receiver_are_exclusive() {
        let b = booking("s", "r");
        for user in ["s", "r", "x"] {
            assert!(!(is_sender(user, &b) && is_receiver(user, &b)));
        }
        assert_eq!(involvement("s", &b), Involvement::Sender);
        assert_eq!(involvement("r", &b), Involvement::Receiver);
        assert_eq!(involvement("x", &b), Involvement::None);
        assert!(involvement("x", &b).parties().is_empty());
    }

    #[test]
    fn test_self_booking_is_both() {
        let b = booking("me", "me");
        assert!(is_sender("me", &b) && is_receiver("me", &b));
        assert_eq!(involvement("me", &b).parties(), &[Party::Sender, Party::Receiver]);
    }

    #[test]
    fn test_approval_scenario() {
        let mut b = booking("s", "r");
        assert!(!can_be_published(&b));

        b.approved_by_sender = true;
        assert!(!can_be_published(&b));

        b.approved_by_receiver = true;
        b.sender_read_agreement = true;
        b.receiver_read_agreement = true;
        assert!(both_parties_approved(&b));
        assert!(both_parties_read_agreement(&b));
        assert!(can_be_published(&b));
    }

    #[test]
    fn test_public_listing_filter() {
        let mut b = booking("s", "r");
        assert!(!is_publicly_listed(&b));

        b.both_parties_approved = true;
        assert!(is_publicly_listed(&b));

        b.status = BookingStatus::Cancelled;
        assert!(!is_publicly_listed(&b));
    }

    #[test]
    fn test_pricing_precedence() {
        let mut b = booking("s", "r");
        b.door_deal = true;
        b.by_agreement = true;
        b.door_percentage = Some(30.0);
        b.artist_fee = Some(5000.0);
        assert_eq!(pricing_mode(&b), PricingMode::DoorDeal { percentage: 30.0 });

        b.door_deal = false;
        assert_eq!(pricing_mode(&b), PricingMode::ByAgreement);

        b.by_agreement = false;
        assert_eq!(pricing_mode(&b), PricingMode::Fee { amount: "5000".into() });
    }

    #[test]
    fn test_fee_fallback_chain() {
        let mut b = booking("s", "r");
        assert_eq!(pricing_mode(&b), PricingMode::Fee { amount: "0".into() });

        b.price_musician = Some("3500".into());
        assert_eq!(pricing_mode(&b), PricingMode::Fee { amount: "3500".into() });

        b.artist_fee = Some(0.0);
        assert_eq!(pricing_mode(&b), PricingMode::Fee { amount: "3500".into() });

        b.door_deal = true;
        assert_eq!(pricing_mode(&b), PricingMode::DoorDeal { percentage: DEFAULT_DOOR_PERCENTAGE });
    }
}
