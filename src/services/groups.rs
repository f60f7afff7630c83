/// Group service - read-only
///
/// Groups are managed out of band; the API never routes a write here.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::group_repo;
use crate::error::{AppError, Result};
use crate::models::Group;

pub struct GroupService {
    pool: PgPool,
}

impl GroupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        let groups = group_repo::list_groups(&self.pool).await?;
        Ok(groups)
    }

    pub async fn get_group(&self, group_id: Uuid) -> Result<Group> {
        group_repo::find_group_by_id(&self.pool, group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))
    }
}
