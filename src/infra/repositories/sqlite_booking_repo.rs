use crate::domain::{
    models::booking::{validate_rows, Booking, BookingRow, Party},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::{DateTime, Utc};

const PUBLIC_FILTER: &str = "status = 'upcoming' AND is_public_after_approval = 1 AND both_parties_approved = 1";
const EVENT_DATE_ORDER: &str = "ORDER BY event_date IS NULL, event_date ASC";

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one_updated(&self, sql: &str, id: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, BookingRow>(sql)
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Booking not found".into()))?
            .try_into()
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, BookingRow>(
            "INSERT INTO bookings (id, sender_id, receiver_id, title, description, event_date, time, venue, address, ticket_price, audience_estimate, artist_fee, price_musician, door_deal, by_agreement, door_percentage, status, approved_by_sender, approved_by_receiver, sender_read_agreement, receiver_read_agreement, is_public_after_approval, both_parties_approved, published_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.sender_id).bind(&booking.receiver_id).bind(&booking.title)
            .bind(&booking.description).bind(&booking.event_date).bind(&booking.time).bind(&booking.venue)
            .bind(&booking.address).bind(booking.ticket_price).bind(booking.audience_estimate).bind(booking.artist_fee)
            .bind(&booking.price_musician).bind(booking.door_deal).bind(booking.by_agreement).bind(booking.door_percentage)
            .bind(booking.status.as_str()).bind(booking.approved_by_sender).bind(booking.approved_by_receiver)
            .bind(booking.sender_read_agreement).bind(booking.receiver_read_agreement)
            .bind(booking.is_public_after_approval).bind(booking.both_parties_approved)
            .bind(booking.published_at).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?
            .try_into()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .map(Booking::try_from)
            .transpose()
    }

    async fn list_upcoming_for_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        let sql = format!("SELECT * FROM bookings WHERE (sender_id = ? OR receiver_id = ?) AND status = 'upcoming' {}", EVENT_DATE_ORDER);
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(user_id).bind(user_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;
        validate_rows(rows)
    }

    async fn list_public_for_maker(&self, maker_id: &str) -> Result<Vec<Booking>, AppError> {
        let sql = format!("SELECT * FROM bookings WHERE {} AND (sender_id = ? OR receiver_id = ?) {}", PUBLIC_FILTER, EVENT_DATE_ORDER);
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(maker_id).bind(maker_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;
        validate_rows(rows)
    }

    async fn list_all_public(&self) -> Result<Vec<Booking>, AppError> {
        let sql = format!("SELECT * FROM bookings WHERE {} {}", PUBLIC_FILTER, EVENT_DATE_ORDER);
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;
        validate_rows(rows)
    }

    async fn set_approval(&self, id: &str, party: Party, approved: bool) -> Result<Booking, AppError> {
        let sql = match party {
            Party::Sender => "UPDATE bookings SET approved_by_sender = ?, both_parties_approved = (? AND approved_by_receiver) WHERE id = ? RETURNING *",
            Party::Receiver => "UPDATE bookings SET approved_by_receiver = ?, both_parties_approved = (? AND approved_by_sender) WHERE id = ? RETURNING *",
        };
        sqlx::query_as::<_, BookingRow>(sql)
            .bind(approved).bind(approved).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Booking not found".into()))?
            .try_into()
    }

    async fn mark_agreement_read(&self, id: &str, party: Party) -> Result<Booking, AppError> {
        let sql = match party {
            Party::Sender => "UPDATE bookings SET sender_read_agreement = 1 WHERE id = ? RETURNING *",
            Party::Receiver => "UPDATE bookings SET receiver_read_agreement = 1 WHERE id = ? RETURNING *",
        };
        self.fetch_one_updated(sql, id).await
    }

    async fn publish(&self, id: &str, at: DateTime<Utc>) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, BookingRow>(
            "UPDATE bookings SET is_public_after_approval = 1, both_parties_approved = 1, published_at = COALESCE(published_at, ?)
             WHERE id = ? AND status = 'upcoming'
               AND approved_by_sender = 1 AND approved_by_receiver = 1
               AND COALESCE(sender_read_agreement, 0) = 1 AND COALESCE(receiver_read_agreement, 0) = 1
             RETURNING *"
        )
            .bind(at).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .map(Booking::try_from)
            .transpose()
    }

    async fn cancel(&self, id: &str) -> Result<Booking, AppError> {
        self.fetch_one_updated("UPDATE bookings SET status = 'cancelled' WHERE id = ? RETURNING *", id).await
    }
}
