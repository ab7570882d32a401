//! Role CRUD operations.

use domain::Role;
use sqlx::PgPool;
use uuid::Uuid;

use super::{delete_by_id, expect_one};
use crate::{models::RoleRow, DbError};

/// Return all roles ordered by name.
pub async fn list_roles(pool: &PgPool) -> Result<Vec<RoleRow>, DbError> {
    let rows = sqlx::query_as::<_, RoleRow>(
        "SELECT id, name, description, is_active FROM roles ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_role(pool: &PgPool, id: Uuid) -> Result<Option<RoleRow>, DbError> {
    let row = sqlx::query_as::<_, RoleRow>(
        "SELECT id, name, description, is_active FROM roles WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn insert_role(pool: &PgPool, role: &Role) -> Result<(), DbError> {
    sqlx::query("INSERT INTO roles (id, name, description, is_active) VALUES ($1, $2, $3, $4)")
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.description)
        .bind(role.is_active)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_role(pool: &PgPool, role: &Role) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE roles SET name = $2, description = $3, is_active = $4 WHERE id = $1",
    )
    .bind(role.id)
    .bind(&role.name)
    .bind(&role.description)
    .bind(role.is_active)
    .execute(pool)
    .await?;

    expect_one(result.rows_affected())
}

pub async fn delete_role(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    delete_by_id(pool, "roles", id).await
}
