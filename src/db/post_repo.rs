use crate::models::Post;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const POST_COLUMNS: &str = "p.id, p.author_id, u.username AS author, p.text, \
                            p.image_data, p.image_ext, p.group_id, p.created_at";

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    text: &str,
    image_data: Option<&[u8]>,
    image_ext: Option<&str>,
    group_id: Option<Uuid>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        WITH inserted AS (
            INSERT INTO posts (id, author_id, text, image_data, image_ext, group_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, author_id, text, image_data, image_ext, group_id, created_at
        )
        SELECT p.id, p.author_id, u.username AS author, p.text,
               p.image_data, p.image_ext, p.group_id, p.created_at
        FROM inserted p
        JOIN users u ON u.id = p.author_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(author_id)
    .bind(text)
    .bind(image_data)
    .bind(image_ext)
    .bind(group_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.id = $1
        "#
    ))
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List posts, newest first
pub async fn list_posts(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        ORDER BY p.created_at DESC
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Count total posts
pub async fn count_posts(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Update a post with the merged field set computed by the service layer
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    text: &str,
    image_data: Option<&[u8]>,
    image_ext: Option<&str>,
    group_id: Option<Uuid>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        WITH updated AS (
            UPDATE posts
            SET text = $2, image_data = $3, image_ext = $4, group_id = $5
            WHERE id = $1
            RETURNING id, author_id, text, image_data, image_ext, group_id, created_at
        )
        SELECT p.id, p.author_id, u.username AS author, p.text,
               p.image_data, p.image_ext, p.group_id, p.created_at
        FROM updated p
        JOIN users u ON u.id = p.author_id
        "#,
    )
    .bind(post_id)
    .bind(text)
    .bind(image_data)
    .bind(image_ext)
    .bind(group_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Delete a post; returns true if a row was removed
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(affected > 0)
}
