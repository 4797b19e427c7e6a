//! # Database Persistence Layer
//!
//! Optional Postgres persistence via SQLx. When `DATABASE_URL` is set,
//! every successful write (user, item, request, comment, booking
//! create/decide) is journaled to Postgres and the in-memory stores are
//! hydrated from it at startup. When absent, the API runs in-memory only — suitable
//! for development and testing, state does not survive restarts.
//!
//! The in-memory stores stay authoritative at request time; the pool is
//! never read on a request path.

pub mod bookings;
pub mod comments;
pub mod items;
pub mod requests;
pub mod users;

use lend_booking::BookingStore;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::state::AppState;

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set — running in-memory only mode. \
                 State will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}

/// Load every persisted record into the state's in-memory stores.
///
/// Users and requests load before items, and items before bookings and
/// comments, so referenced rows are present when the engine starts
/// answering queries.
pub async fn hydrate(state: &AppState, pool: &PgPool) -> Result<(), sqlx::Error> {
    let users = users::load_all(pool).await?;
    let user_count = users.len();
    for user in users {
        state.registry.insert_user(user);
    }

    let requests = requests::load_all(pool).await?;
    let request_count = requests.len();
    for request in requests {
        state.registry.insert_request(request);
    }

    let items = items::load_all(pool).await?;
    let item_count = items.len();
    for item in items {
        state.registry.insert_item(item);
    }

    let comments = comments::load_all(pool).await?;
    let comment_count = comments.len();
    for comment in comments {
        state.registry.insert_comment(comment);
    }

    let bookings = bookings::load_all(pool).await?;
    let booking_count = bookings.len();
    for booking in bookings {
        state.bookings.insert(booking);
    }

    tracing::info!(
        users = user_count,
        requests = request_count,
        items = item_count,
        comments = comment_count,
        bookings = booking_count,
        "state hydrated from database"
    );
    Ok(())
}
