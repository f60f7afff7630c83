/// Comment handlers - HTTP endpoints for comments under a post
///
/// The parent post id always comes from the path; a missing post is a 404
/// before anything else happens.
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::PaginationParams;
use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::Comment;
use crate::services::CommentService;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub author: String,
    pub post: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        CommentResponse {
            id: comment.id,
            author: comment.author,
            post: comment.post_id,
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub total_count: i64,
    pub has_more: bool,
}

/// List comments for a post (public)
pub async fn list_comments(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let (limit, offset) = query.clamp();
    let service = CommentService::new((**pool).clone());
    let (comments, total_count) = service.list_comments(*post_id, limit, offset).await?;

    let has_more = super::has_more(offset, limit, total_count);
    Ok(HttpResponse::Ok().json(CommentListResponse {
        comments: comments.into_iter().map(CommentResponse::from).collect(),
        total_count,
        has_more,
    }))
}

/// Create a comment; post comes from the path, author from the requester
pub async fn create_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user: AuthUser,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comment = service
        .create_comment(*post_id, user.id, &user.username, &req.text)
        .await?;

    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// Get a single comment (public)
pub async fn get_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let service = CommentService::new((**pool).clone());
    let comment = service.get_comment(post_id, comment_id).await?;
    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// Update a comment (author only)
pub async fn update_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user: AuthUser,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let service = CommentService::new((**pool).clone());
    let comment = service
        .update_comment(post_id, comment_id, user.id, &req.text)
        .await?;

    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// Delete a comment (author only)
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user: AuthUser,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let service = CommentService::new((**pool).clone());
    service.delete_comment(post_id, comment_id, user.id).await?;
    Ok(HttpResponse::NoContent().finish())
}
