//! User persistence.

use sqlx::PgPool;

use crate::registry::UserRecord;

/// Upsert one user row.
pub async fn save_user(pool: &PgPool, user: &UserRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            email = EXCLUDED.email
        "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Load all users for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<UserRecord>, sqlx::Error> {
    let rows: Vec<UserRow> =
        sqlx::query_as("SELECT id, name, email, created_at FROM users ORDER BY created_at")
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(UserRecord::from).collect())
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    name: String,
    email: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}
