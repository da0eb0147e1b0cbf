use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::error::AppError;

pub const STATUS_UPCOMING: &str = "upcoming";
pub const STATUS_CANCELLED: &str = "cancelled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Upcoming,
    Cancelled,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Upcoming => STATUS_UPCOMING,
            BookingStatus::Cancelled => STATUS_CANCELLED,
            BookingStatus::Other(s) => s,
        }
    }
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            STATUS_UPCOMING => BookingStatus::Upcoming,
            STATUS_CANCELLED => BookingStatus::Cancelled,
            _ => BookingStatus::Other(s),
        }
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Which side of a booking an action is taken on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Sender,
    Receiver,
}

/// Row exactly as stored. Nothing here is trusted until it passes
/// through `Booking::try_from`.
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub ticket_price: Option<f64>,
    pub audience_estimate: Option<i32>,
    pub artist_fee: Option<f64>,
    pub price_musician: Option<String>,
    pub door_deal: Option<bool>,
    pub by_agreement: Option<bool>,
    pub door_percentage: Option<f64>,
    pub status: String,
    pub approved_by_sender: Option<bool>,
    pub approved_by_receiver: Option<bool>,
    pub sender_read_agreement: Option<bool>,
    pub receiver_read_agreement: Option<bool>,
    pub is_public_after_approval: Option<bool>,
    pub both_parties_approved: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub ticket_price: Option<f64>,
    pub audience_estimate: Option<i32>,
    pub artist_fee: Option<f64>,
    pub price_musician: Option<String>,
    pub door_deal: bool,
    pub by_agreement: bool,
    pub door_percentage: Option<f64>,
    pub status: BookingStatus,
    pub approved_by_sender: bool,
    pub approved_by_receiver: bool,
    pub sender_read_agreement: bool,
    pub receiver_read_agreement: bool,
    pub is_public_after_approval: bool,
    pub both_parties_approved: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub sender_id: String,
    pub receiver_id: String,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub ticket_price: Option<f64>,
    pub audience_estimate: Option<i32>,
    pub artist_fee: Option<f64>,
    pub price_musician: Option<String>,
    pub door_deal: bool,
    pub by_agreement: bool,
    pub door_percentage: Option<f64>,
    pub is_public_after_approval: bool,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender_id: params.sender_id,
            receiver_id: params.receiver_id,
            title: params.title,
            description: params.description,
            event_date: params.event_date,
            time: params.time,
            venue: params.venue,
            address: params.address,
            ticket_price: params.ticket_price,
            audience_estimate: params.audience_estimate,
            artist_fee: params.artist_fee,
            price_musician: params.price_musician,
            door_deal: params.door_deal,
            by_agreement: params.by_agreement,
            door_percentage: params.door_percentage,
            status: BookingStatus::Upcoming,
            approved_by_sender: false,
            approved_by_receiver: false,
            sender_read_agreement: false,
            receiver_read_agreement: false,
            is_public_after_approval: params.is_public_after_approval,
            both_parties_approved: false,
            published_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let malformed = |field: &str| AppError::InvalidRecord(format!("booking {}: invalid {}", row.id, field));

        if row.id.trim().is_empty() {
            return Err(AppError::InvalidRecord("booking without id".into()));
        }
        if row.sender_id.trim().is_empty() {
            return Err(malformed("sender_id"));
        }
        if row.receiver_id.trim().is_empty() {
            return Err(malformed("receiver_id"));
        }
        if row.door_percentage.is_some_and(|p| !(0.0..=100.0).contains(&p)) {
            return Err(malformed("door_percentage"));
        }
        if row.ticket_price.is_some_and(|p| p < 0.0) {
            return Err(malformed("ticket_price"));
        }
        if row.artist_fee.is_some_and(|f| f < 0.0) {
            return Err(malformed("artist_fee"));
        }
        if row.audience_estimate.is_some_and(|a| a < 0) {
            return Err(malformed("audience_estimate"));
        }

        Ok(Self {
            id: row.id,
            sender_id: row.sender_id,
            receiver_id: row.receiver_id,
            title: row.title,
            description: row.description,
            event_date: row.event_date,
            time: row.time,
            venue: row.venue,
            address: row.address,
            ticket_price: row.ticket_price,
            audience_estimate: row.audience_estimate,
            artist_fee: row.artist_fee,
            price_musician: row.price_musician,
            door_deal: row.door_deal.unwrap_or(false),
            by_agreement: row.by_agreement.unwrap_or(false),
            door_percentage: row.door_percentage,
            status: BookingStatus::from(row.status),
            approved_by_sender: row.approved_by_sender.unwrap_or(false),
            approved_by_receiver: row.approved_by_receiver.unwrap_or(false),
            sender_read_agreement: row.sender_read_agreement.unwrap_or(false),
            receiver_read_agreement: row.receiver_read_agreement.unwrap_or(false),
            is_public_after_approval: row.is_public_after_approval.unwrap_or(false),
            both_parties_approved: row.both_parties_approved.unwrap_or(false),
            published_at: row.published_at,
            created_at: row.created_at,
        })
    }
}

/// Validates a batch of rows; the first malformed row fails the whole read.
pub fn validate_rows(rows: Vec<BookingRow>) -> Result<Vec<Booking>, AppError> {
    rows.into_iter().map(Booking::try_from).collect()
}
