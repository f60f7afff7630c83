/// Authorization for blog-service
///
/// Ownership-based permission checks for posts and comments. Evaluation is
/// explicitly ordered: authentication is enforced first by the `AuthUser`
/// extractor (401), then these predicates run against the already-loaded
/// row (403). Only the author of a resource may modify it.
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Comment, Post};

/// Result type for permission checks
pub type PermissionResult = Result<(), AppError>;

/// Check if a user authored a post
pub fn check_post_ownership(user_id: Uuid, post: &Post) -> PermissionResult {
    if post.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You don't have permission to modify this post".to_string(),
        ))
    }
}

/// Check if a user authored a comment
pub fn check_comment_ownership(user_id: Uuid, comment: &Comment) -> PermissionResult {
    if comment.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You don't have permission to modify this comment".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_by(author_id: Uuid) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id,
            author: "alice".to_string(),
            text: "hello".to_string(),
            image_data: None,
            image_ext: None,
            group_id: None,
            created_at: Utc::now(),
        }
    }

    fn comment_by(author_id: Uuid) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
            author_id,
            author: "alice".to_string(),
            text: "nice".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_author_may_modify_post() {
        let author = Uuid::new_v4();
        assert!(check_post_ownership(author, &post_by(author)).is_ok());
    }

    #[test]
    fn test_non_author_is_forbidden() {
        let author = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        assert!(matches!(
            check_post_ownership(stranger, &post_by(author)),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            check_comment_ownership(stranger, &comment_by(author)),
            Err(AppError::Forbidden(_))
        ));
    }
}
