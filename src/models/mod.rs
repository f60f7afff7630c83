/// Data models for blog-service
///
/// Row types mapped straight from PostgreSQL. Wire representations
/// (usernames instead of ids, data URIs instead of raw bytes) live in the
/// handler DTOs; these structs mirror storage.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Service-local projection of an identity-provider user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    /// Author username, joined from users
    pub author: String,
    pub text: String,
    #[serde(skip_serializing)]
    pub image_data: Option<Vec<u8>>,
    pub image_ext: Option<String>,
    pub group_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A read-only community group
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A comment under a post
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    /// Author username, joined from users
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A follow relationship, with both sides resolved to usernames
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    /// Follower username
    pub user: String,
    pub followee_id: Uuid,
    /// Followee username
    pub following: String,
    pub created_at: DateTime<Utc>,
}
