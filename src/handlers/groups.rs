/// Group handlers - read-only HTTP endpoints
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::services::GroupService;

/// List all groups (public)
pub async fn list_groups(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = GroupService::new((**pool).clone());
    let groups = service.list_groups().await?;
    Ok(HttpResponse::Ok().json(groups))
}

/// Get a group by ID (public)
pub async fn get_group(
    pool: web::Data<PgPool>,
    group_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = GroupService::new((**pool).clone());
    let group = service.get_group(*group_id).await?;
    Ok(HttpResponse::Ok().json(group))
}
