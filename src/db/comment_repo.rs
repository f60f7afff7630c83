use crate::models::Comment;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const COMMENT_COLUMNS: &str =
    "c.id, c.post_id, c.author_id, u.username AS author, c.text, c.created_at";

/// Create a new comment under a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        WITH inserted AS (
            INSERT INTO comments (id, post_id, author_id, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, post_id, author_id, text, created_at
        )
        SELECT c.id, c.post_id, c.author_id, u.username AS author, c.text, c.created_at
        FROM inserted c
        JOIN users u ON u.id = c.author_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Find a comment by ID, scoped to its parent post
pub async fn find_comment(
    pool: &PgPool,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(&format!(
        r#"
        SELECT {COMMENT_COLUMNS}
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.id = $1 AND c.post_id = $2
        "#
    ))
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// List comments for a post, oldest first
pub async fn list_comments_for_post(
    pool: &PgPool,
    post_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(&format!(
        r#"
        SELECT {COMMENT_COLUMNS}
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(post_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Count comments for a post
pub async fn count_comments_for_post(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Update a comment's text
pub async fn update_comment(
    pool: &PgPool,
    comment_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        WITH updated AS (
            UPDATE comments
            SET text = $2
            WHERE id = $1
            RETURNING id, post_id, author_id, text, created_at
        )
        SELECT c.id, c.post_id, c.author_id, u.username AS author, c.text, c.created_at
        FROM updated c
        JOIN users u ON u.id = c.author_id
        "#,
    )
    .bind(comment_id)
    .bind(text)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Delete a comment; returns true if a row was removed
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}
