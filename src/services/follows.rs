/// Follow service - follow relationships scoped to the requester
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{follow_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Follow, User};

pub const ERR_UNKNOWN_USER: &str = "user not found";
pub const ERR_SELF_FOLLOW: &str = "cannot follow yourself";
pub const ERR_ALREADY_FOLLOWING: &str = "already following this author";

pub struct FollowService {
    pool: PgPool,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List follows where the requester is the follower, never the global
    /// set. `search` filters by followee-username substring.
    pub async fn list_follows(
        &self,
        follower_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Follow>> {
        let follows =
            follow_repo::list_follows_for_follower(&self.pool, follower_id, search).await?;
        Ok(follows)
    }

    /// Create a follow. The follower side is always the requester.
    ///
    /// Validation is ordered: target must exist, must not be the requester,
    /// and must not already be followed by the requester. The insert itself
    /// is conflict-tolerant, so a concurrent duplicate surfaces the same
    /// validation error rather than a constraint failure.
    pub async fn create_follow(
        &self,
        follower_id: Uuid,
        follower_username: &str,
        following: &str,
    ) -> Result<Follow> {
        user_repo::ensure_user(&self.pool, follower_id, follower_username).await?;

        let target = user_repo::find_by_username(&self.pool, following).await?;
        let already_follows = match &target {
            Some(t) => follow_repo::follow_exists(&self.pool, follower_id, t.id).await?,
            None => false,
        };
        let target = validate_follow_target(follower_id, target, already_follows)?;

        let (id, created_at) = follow_repo::insert_follow(&self.pool, follower_id, target.id)
            .await?
            .ok_or_else(|| AppError::validation("following", ERR_ALREADY_FOLLOWING))?;

        tracing::info!(follower = follower_username, following, "follow created");

        Ok(Follow {
            id,
            follower_id,
            user: follower_username.to_string(),
            followee_id: target.id,
            following: target.username,
            created_at,
        })
    }
}

/// Ordered validation for a follow target: the username must resolve, the
/// target must not be the requester, and the requester must not already
/// follow them. `already_follows` is the requester-scoped pair check;
/// which rule fires first determines the error message the caller sees.
fn validate_follow_target(
    follower_id: Uuid,
    target: Option<User>,
    already_follows: bool,
) -> Result<User> {
    let target = target.ok_or_else(|| AppError::validation("following", ERR_UNKNOWN_USER))?;

    if target.id == follower_id {
        return Err(AppError::validation("following", ERR_SELF_FOLLOW));
    }

    if already_follows {
        return Err(AppError::validation("following", ERR_ALREADY_FOLLOWING));
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: Uuid, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
        }
    }

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::Validation { field, message } => {
                assert_eq!(field, "following");
                message
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_target_rejected() {
        let requester = Uuid::new_v4();
        let err = validate_follow_target(requester, None, false).unwrap_err();
        assert_eq!(validation_message(err), ERR_UNKNOWN_USER);
    }

    #[test]
    fn test_self_follow_rejected() {
        let requester = Uuid::new_v4();
        let target = user(requester, "alice");
        let err = validate_follow_target(requester, Some(target), false).unwrap_err();
        assert_eq!(validation_message(err), ERR_SELF_FOLLOW);
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let requester = Uuid::new_v4();
        let target = user(Uuid::new_v4(), "bob");
        let err = validate_follow_target(requester, Some(target), true).unwrap_err();
        assert_eq!(validation_message(err), ERR_ALREADY_FOLLOWING);
    }

    #[test]
    fn test_unknown_target_wins_over_duplicate() {
        // An unresolved username reports "user not found" even if the
        // duplicate flag is somehow set.
        let requester = Uuid::new_v4();
        let err = validate_follow_target(requester, None, true).unwrap_err();
        assert_eq!(validation_message(err), ERR_UNKNOWN_USER);
    }

    #[test]
    fn test_self_follow_wins_over_duplicate() {
        let requester = Uuid::new_v4();
        let target = user(requester, "alice");
        let err = validate_follow_target(requester, Some(target), true).unwrap_err();
        assert_eq!(validation_message(err), ERR_SELF_FOLLOW);
    }

    #[test]
    fn test_valid_target_passes() {
        let requester = Uuid::new_v4();
        let target_id = Uuid::new_v4();
        let target = validate_follow_target(requester, Some(user(target_id, "bob")), false)
            .expect("valid target");
        assert_eq!(target.id, target_id);
        assert_eq!(target.username, "bob");
    }
}
