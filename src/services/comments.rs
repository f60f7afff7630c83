/// Comment service - comments scoped under a parent post
///
/// Every operation resolves the parent post first; a missing post is a
/// not-found error no matter which comment operation was requested.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, Post};
use crate::permissions;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve the parent post or fail with not-found
    async fn resolve_post(&self, post_id: Uuid) -> Result<Post> {
        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    /// List comments for a post
    pub async fn list_comments(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Comment>, i64)> {
        let post = self.resolve_post(post_id).await?;
        let comments =
            comment_repo::list_comments_for_post(&self.pool, post.id, limit, offset).await?;
        let total = comment_repo::count_comments_for_post(&self.pool, post.id).await?;
        Ok((comments, total))
    }

    /// Get a single comment belonging to the post
    pub async fn get_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Comment> {
        let post = self.resolve_post(post_id).await?;
        comment_repo::find_comment(&self.pool, post.id, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    /// Create a comment. Post comes from the path, author from the
    /// requester; neither is accepted from the client payload.
    pub async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        author_username: &str,
        text: &str,
    ) -> Result<Comment> {
        let post = self.resolve_post(post_id).await?;
        user_repo::ensure_user(&self.pool, author_id, author_username).await?;

        let comment = comment_repo::create_comment(&self.pool, post.id, author_id, text).await?;
        tracing::info!(comment_id = %comment.id, post_id = %post.id, "comment created");
        Ok(comment)
    }

    /// Update a comment's text. Only the author may do this.
    pub async fn update_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        user_id: Uuid,
        text: &str,
    ) -> Result<Comment> {
        let existing = self.get_comment(post_id, comment_id).await?;
        permissions::check_comment_ownership(user_id, &existing)?;

        let comment = comment_repo::update_comment(&self.pool, existing.id, text).await?;
        Ok(comment)
    }

    /// Delete a comment. Only the author may do this.
    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let existing = self.get_comment(post_id, comment_id).await?;
        permissions::check_comment_ownership(user_id, &existing)?;

        comment_repo::delete_comment(&self.pool, existing.id).await?;
        tracing::info!(%comment_id, %post_id, "comment deleted");
        Ok(())
    }
}
