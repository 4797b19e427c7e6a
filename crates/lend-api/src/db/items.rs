//! Item persistence.

use sqlx::PgPool;

use crate::registry::ItemRecord;

/// Upsert one item row.
pub async fn save_item(pool: &PgPool, item: &ItemRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO items (id, owner_id, name, description, available, request_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            description = EXCLUDED.description,
            available = EXCLUDED.available
        "#,
    )
    .bind(item.id)
    .bind(item.owner_id)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.available)
    .bind(item.request_id)
    .bind(item.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Load all items for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<ItemRecord>, sqlx::Error> {
    let rows: Vec<ItemRow> = sqlx::query_as(
        "SELECT id, owner_id, name, description, available, request_id, created_at \
         FROM items ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ItemRecord::from).collect())
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: uuid::Uuid,
    owner_id: uuid::Uuid,
    name: String,
    description: String,
    available: bool,
    request_id: Option<uuid::Uuid>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ItemRow> for ItemRecord {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            description: row.description,
            available: row.available,
            request_id: row.request_id,
            created_at: row.created_at,
        }
    }
}
