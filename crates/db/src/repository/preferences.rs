//! Preference CRUD operations.

use domain::Preference;
use sqlx::PgPool;
use uuid::Uuid;

use super::{delete_by_id, expect_one};
use crate::{models::PreferenceRow, DbError};

/// Return all preferences ordered by name.
pub async fn list_preferences(pool: &PgPool) -> Result<Vec<PreferenceRow>, DbError> {
    let rows = sqlx::query_as::<_, PreferenceRow>("SELECT id, name FROM preferences ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn get_preference(pool: &PgPool, id: Uuid) -> Result<Option<PreferenceRow>, DbError> {
    let row = sqlx::query_as::<_, PreferenceRow>("SELECT id, name FROM preferences WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn insert_preference(pool: &PgPool, preference: &Preference) -> Result<(), DbError> {
    sqlx::query("INSERT INTO preferences (id, name) VALUES ($1, $2)")
        .bind(preference.id)
        .bind(&preference.name)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_preference(pool: &PgPool, preference: &Preference) -> Result<(), DbError> {
    let result = sqlx::query("UPDATE preferences SET name = $2 WHERE id = $1")
        .bind(preference.id)
        .bind(&preference.name)
        .execute(pool)
        .await?;

    expect_one(result.rows_affected())
}

pub async fn delete_preference(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    delete_by_id(pool, "preferences", id).await
}
