//! Comment persistence.

use sqlx::PgPool;

use crate::registry::CommentRecord;

/// Insert one comment row; comments are immutable once stored.
pub async fn save_comment(pool: &PgPool, comment: &CommentRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO comments (id, item_id, author_id, body, created_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(comment.id)
    .bind(comment.item_id)
    .bind(comment.author_id)
    .bind(&comment.body)
    .bind(comment.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Load all comments for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<CommentRecord>, sqlx::Error> {
    let rows: Vec<CommentRow> = sqlx::query_as(
        "SELECT id, item_id, author_id, body, created_at FROM comments ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(CommentRecord::from).collect())
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: uuid::Uuid,
    item_id: uuid::Uuid,
    author_id: uuid::Uuid,
    body: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CommentRow> for CommentRecord {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            item_id: row.item_id,
            author_id: row.author_id,
            body: row.body,
            created_at: row.created_at,
        }
    }
}
