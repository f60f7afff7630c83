/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::PaginationParams;
use crate::auth::AuthUser;
use crate::error::Result;
use crate::media;
use crate::models::Post;
use crate::services::posts::{PostChanges, PostService};

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
    /// Optional embedded image as a data:image base64 URI
    pub image: Option<String>,
    pub group: Option<Uuid>,
}

/// Update payload. `image` and `group` are tri-state: absent keeps the
/// stored value, explicit `null` clears it.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub text: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub group: Option<Option<Uuid>>,
}

/// Wrap a present field in the outer Some so `null` deserializes to
/// `Some(None)` instead of collapsing to `None`.
fn double_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author: String,
    pub text: String,
    pub image: Option<String>,
    pub group: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        let image = match (&post.image_data, &post.image_ext) {
            (Some(data), Some(ext)) => Some(media::encode_data_uri(data, ext)),
            _ => None,
        };
        PostResponse {
            id: post.id,
            author: post.author,
            text: post.text,
            image,
            group: post.group_id,
            created_at: post.created_at,
        }
    }
}

/// Paginated post list envelope
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub total_count: i64,
    pub has_more: bool,
}

/// List posts (public)
pub async fn list_posts(
    pool: web::Data<PgPool>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = query.clamp();
    let service = PostService::new((**pool).clone());
    let (posts, total_count) = service.list_posts(limit, offset).await?;

    let has_more = super::has_more(offset, limit, total_count);
    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: posts.into_iter().map(PostResponse::from).collect(),
        total_count,
        has_more,
    }))
}

/// Create a new post; the author is the authenticated requester
pub async fn create_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(
            user.id,
            &user.username,
            &req.text,
            req.image.as_deref(),
            req.group,
        )
        .await?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// Get a post by ID (public)
pub async fn get_post(pool: web::Data<PgPool>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.get_post(*post_id).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// Update a post (author only)
pub async fn update_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user: AuthUser,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let req = req.into_inner();
    let post = service
        .update_post(
            *post_id,
            user.id,
            PostChanges {
                text: req.text,
                image: req.image,
                group: req.group,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// Delete a post (author only)
pub async fn delete_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user: AuthUser,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.delete_post(*post_id, user.id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_rebuilds_data_uri() {
        let post = Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            author: "alice".to_string(),
            text: "hello".to_string(),
            image_data: Some(b"img-bytes".to_vec()),
            image_ext: Some("png".to_string()),
            group_id: None,
            created_at: Utc::now(),
        };

        let resp = PostResponse::from(post);
        let uri = resp.image.expect("image present");
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_response_without_image() {
        let post = Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            author: "alice".to_string(),
            text: "hello".to_string(),
            image_data: None,
            image_ext: None,
            group_id: None,
            created_at: Utc::now(),
        };

        assert!(PostResponse::from(post).image.is_none());
    }

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let req: UpdatePostRequest = serde_json::from_str(r#"{"text": "edited"}"#).unwrap();
        assert_eq!(req.text.as_deref(), Some("edited"));
        assert_eq!(req.image, None);
        assert_eq!(req.group, None);

        let req: UpdatePostRequest =
            serde_json::from_str(r#"{"image": null, "group": null}"#).unwrap();
        assert_eq!(req.image, Some(None));
        assert_eq!(req.group, Some(None));

        let group_id = Uuid::new_v4();
        let req: UpdatePostRequest =
            serde_json::from_str(&format!(r#"{{"group": "{}"}}"#, group_id)).unwrap();
        assert_eq!(req.group, Some(Some(group_id)));
    }

    #[test]
    fn test_create_request_ignores_client_author_field() {
        // Wire payloads carrying an "author" key deserialize fine and the
        // value never reaches the service layer.
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"text": "hello", "author": "mallory"}"#).unwrap();
        assert_eq!(req.text, "hello");
    }
}
