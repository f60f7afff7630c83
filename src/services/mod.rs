/// Business logic layer for blog-service
///
/// One service per resource. Services own a `PgPool`, enforce ownership
/// and validation rules, and map missing rows to not-found errors so the
/// handlers stay thin.
pub mod comments;
pub mod follows;
pub mod groups;
pub mod posts;

pub use comments::CommentService;
pub use follows::FollowService;
pub use groups::GroupService;
pub use posts::PostService;
