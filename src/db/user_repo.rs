use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Upsert a user row from verified token claims.
///
/// The identity provider owns user records; this table is a local
/// projection so authors and follow targets resolve by username.
pub async fn ensure_user(pool: &PgPool, id: Uuid, username: &str) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username)
        VALUES ($1, $2)
        ON CONFLICT (id) DO UPDATE SET username = EXCLUDED.username
        RETURNING id, username
        "#,
    )
    .bind(id)
    .bind(username)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Look up a user by username
pub async fn find_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
