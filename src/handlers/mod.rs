/// HTTP handlers for blog-service
///
/// Handlers convert between wire DTOs and the service layer. Route
/// registration lives in [`configure`]; nested comment routes must be
/// registered before the bare `/{post_id}` resource so the longer path
/// wins.
pub mod comments;
pub mod follows;
pub mod groups;
pub mod posts;

use actix_web::web;
use serde::Deserialize;

pub use comments::{create_comment, delete_comment, get_comment, list_comments, update_comment};
pub use follows::{create_follow, list_follows};
pub use groups::{get_group, list_groups};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post};

const DEFAULT_PAGE_LIMIT: i64 = 10;
const MAX_PAGE_LIMIT: i64 = 100;

/// Limit/offset pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Apply defaults and clamp to sane bounds
    pub fn clamp(&self) -> (i64, i64) {
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Whether rows exist past the current page window. Saturating so an
/// offset near i64::MAX cannot overflow the addition.
pub(crate) fn has_more(offset: i64, limit: i64, total: i64) -> bool {
    offset.saturating_add(limit) < total
}

/// Register all API routes under /api/v1
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(list_posts))
                            .route(web::post().to(create_post)),
                    )
                    .service(
                        web::resource("/{post_id}/comments")
                            .route(web::get().to(list_comments))
                            .route(web::post().to(create_comment)),
                    )
                    .service(
                        web::resource("/{post_id}/comments/{comment_id}")
                            .route(web::get().to(get_comment))
                            .route(web::put().to(update_comment))
                            .route(web::patch().to(update_comment))
                            .route(web::delete().to(delete_comment)),
                    )
                    .service(
                        web::resource("/{post_id}")
                            .route(web::get().to(get_post))
                            .route(web::put().to(update_post))
                            .route(web::patch().to(update_post))
                            .route(web::delete().to(delete_post)),
                    ),
            )
            .service(
                web::scope("/groups")
                    .service(web::resource("").route(web::get().to(list_groups)))
                    .service(web::resource("/{group_id}").route(web::get().to(get_group))),
            )
            .service(
                web::scope("/follows").service(
                    web::resource("")
                        .route(web::get().to(list_follows))
                        .route(web::post().to(create_follow)),
                ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let params = PaginationParams {
            limit: None,
            offset: None,
        };
        assert_eq!(params.clamp(), (10, 0));
    }

    #[test]
    fn test_pagination_clamps_limit() {
        let params = PaginationParams {
            limit: Some(5000),
            offset: Some(20),
        };
        assert_eq!(params.clamp(), (100, 20));

        let params = PaginationParams {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(params.clamp(), (1, 0));
    }

    #[test]
    fn test_pagination_floors_negative_offset() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(-5),
        };
        assert_eq!(params.clamp(), (10, 0));
    }

    #[test]
    fn test_has_more_windows() {
        assert!(has_more(0, 10, 11));
        assert!(!has_more(0, 10, 10));
        assert!(!has_more(10, 10, 15));
    }

    #[test]
    fn test_has_more_saturates_on_huge_offset() {
        // A client-supplied offset near i64::MAX must not overflow
        assert!(!has_more(i64::MAX, 100, i64::MAX));
        assert!(!has_more(i64::MAX - 1, 100, 50));
    }
}
