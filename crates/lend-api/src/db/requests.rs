//! Item request persistence.

use sqlx::PgPool;

use crate::registry::RequestRecord;

/// Upsert one request row.
pub async fn save_request(pool: &PgPool, request: &RequestRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO requests (id, requester_id, description, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(request.id)
    .bind(request.requester_id)
    .bind(&request.description)
    .bind(request.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Load all requests for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<RequestRecord>, sqlx::Error> {
    let rows: Vec<RequestRow> = sqlx::query_as(
        "SELECT id, requester_id, description, created_at \
         FROM requests ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(RequestRecord::from).collect())
}

#[derive(sqlx::FromRow)]
struct RequestRow {
    id: uuid::Uuid,
    requester_id: uuid::Uuid,
    description: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<RequestRow> for RequestRecord {
    fn from(row: RequestRow) -> Self {
        Self {
            id: row.id,
            requester_id: row.requester_id,
            description: row.description,
            created_at: row.created_at,
        }
    }
}
