use crate::models::Follow;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a follow pair; returns None when the pair already exists.
///
/// The (follower_id, followee_id) unique constraint plus ON CONFLICT makes
/// this safe against concurrent duplicate creation.
pub async fn insert_follow(
    pool: &PgPool,
    follower_id: Uuid,
    followee_id: Uuid,
) -> Result<Option<(Uuid, DateTime<Utc>)>, sqlx::Error> {
    let inserted = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
        r#"
        INSERT INTO follows (id, follower_id, followee_id, created_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (follower_id, followee_id) DO NOTHING
        RETURNING id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(follower_id)
    .bind(followee_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted)
}

/// Whether the requester already follows the given user
pub async fn follow_exists(
    pool: &PgPool,
    follower_id: Uuid,
    followee_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_as::<_, (bool,)>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM follows
            WHERE follower_id = $1 AND followee_id = $2
        )
        "#,
    )
    .bind(follower_id)
    .bind(followee_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// List follows where the given user is the follower, optionally filtered
/// by a substring of the followee's username.
pub async fn list_follows_for_follower(
    pool: &PgPool,
    follower_id: Uuid,
    search: Option<&str>,
) -> Result<Vec<Follow>, sqlx::Error> {
    let base = r#"
        SELECT f.id, f.follower_id, uf.username AS "user",
               f.followee_id, ut.username AS following, f.created_at
        FROM follows f
        JOIN users uf ON uf.id = f.follower_id
        JOIN users ut ON ut.id = f.followee_id
        WHERE f.follower_id = $1
    "#;

    let follows = match search {
        Some(term) => {
            sqlx::query_as::<_, Follow>(&format!(
                "{base} AND ut.username ILIKE '%' || $2 || '%' ORDER BY f.created_at DESC"
            ))
            .bind(follower_id)
            .bind(term)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Follow>(&format!("{base} ORDER BY f.created_at DESC"))
                .bind(follower_id)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(follows)
}
