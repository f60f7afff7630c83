/// Follow handlers - list and create only
///
/// Both operations require authentication; the follower side of every
/// record is the requester.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::Follow;
use crate::services::FollowService;

#[derive(Debug, Deserialize)]
pub struct CreateFollowRequest {
    /// Username of the user to follow
    pub following: String,
}

#[derive(Debug, Deserialize)]
pub struct FollowSearchParams {
    /// Substring filter over the followee's username
    pub search: Option<String>,
}

/// Wire record: exactly the follower and followee usernames
#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub user: String,
    pub following: String,
}

impl From<Follow> for FollowResponse {
    fn from(follow: Follow) -> Self {
        FollowResponse {
            user: follow.user,
            following: follow.following,
        }
    }
}

/// List the requester's follows, optionally filtered by `search`
pub async fn list_follows(
    pool: web::Data<PgPool>,
    user: AuthUser,
    query: web::Query<FollowSearchParams>,
) -> Result<HttpResponse> {
    let service = FollowService::new((**pool).clone());
    let follows = service
        .list_follows(user.id, query.search.as_deref())
        .await?;

    let records: Vec<FollowResponse> = follows.into_iter().map(FollowResponse::from).collect();
    Ok(HttpResponse::Ok().json(records))
}

/// Follow another user by username
pub async fn create_follow(
    pool: web::Data<PgPool>,
    user: AuthUser,
    req: web::Json<CreateFollowRequest>,
) -> Result<HttpResponse> {
    let service = FollowService::new((**pool).clone());
    let follow = service
        .create_follow(user.id, &user.username, &req.following)
        .await?;

    Ok(HttpResponse::Created().json(FollowResponse::from(follow)))
}
