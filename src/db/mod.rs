/// Data access layer for blog-service
///
/// Repository functions over `PgPool`, one module per entity. All queries
/// are parameterized; wire-facing rows join usernames in so callers never
/// re-resolve ids.
pub mod comment_repo;
pub mod follow_repo;
pub mod group_repo;
pub mod post_repo;
pub mod user_repo;
