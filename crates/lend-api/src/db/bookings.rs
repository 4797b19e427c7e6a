//! Booking persistence.

use lend_booking::{Booking, BookingStatus};
use lend_core::BookingWindow;
use sqlx::PgPool;

/// Upsert one booking row. Called on creation and again on decision;
/// only the status changes between the two.
pub async fn save_booking(pool: &PgPool, booking: &Booking) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO bookings (id, item_id, booker_id, start_at, end_at, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (id) DO UPDATE SET
            status = EXCLUDED.status
        "#,
    )
    .bind(booking.id)
    .bind(booking.item_id)
    .bind(booking.booker_id)
    .bind(booking.window.start)
    .bind(booking.window.end)
    .bind(booking.status.as_str())
    .bind(booking.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Load all bookings for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Booking>, sqlx::Error> {
    let rows: Vec<BookingRow> = sqlx::query_as(
        "SELECT id, item_id, booker_id, start_at, end_at, status, created_at \
         FROM bookings ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Booking::try_from).collect()
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: uuid::Uuid,
    item_id: uuid::Uuid,
    booker_id: uuid::Uuid,
    start_at: chrono::DateTime<chrono::Utc>,
    end_at: chrono::DateTime<chrono::Utc>,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = sqlx::Error;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status = match row.status.as_str() {
            "WAITING" => BookingStatus::Waiting,
            "APPROVED" => BookingStatus::Approved,
            "REJECTED" => BookingStatus::Rejected,
            other => {
                return Err(sqlx::Error::Protocol(format!(
                    "booking {} has unknown status {other:?}",
                    row.id
                )))
            }
        };
        Ok(Booking {
            id: row.id,
            item_id: row.item_id,
            booker_id: row.booker_id,
            window: BookingWindow::new(row.start_at, row.end_at),
            status,
            created_at: row.created_at,
        })
    }
}
