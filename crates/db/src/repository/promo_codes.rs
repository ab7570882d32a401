//! Promo-code CRUD operations.

use domain::PromoCode;
use sqlx::PgPool;
use uuid::Uuid;

use super::{delete_by_id, expect_one};
use crate::{models::PromoCodeRow, DbError};

const PROMO_CODE_COLUMNS: &str =
    "id, code, service_info, begin_date, end_date, partner_name, preference_id, customer_id";

/// Return all promo codes, newest first.
pub async fn list_promo_codes(pool: &PgPool) -> Result<Vec<PromoCodeRow>, DbError> {
    let rows = sqlx::query_as::<_, PromoCodeRow>(&format!(
        "SELECT {PROMO_CODE_COLUMNS} FROM promo_codes ORDER BY begin_date DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_promo_code(pool: &PgPool, id: Uuid) -> Result<Option<PromoCodeRow>, DbError> {
    let row = sqlx::query_as::<_, PromoCodeRow>(&format!(
        "SELECT {PROMO_CODE_COLUMNS} FROM promo_codes WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn insert_promo_code(pool: &PgPool, promo_code: &PromoCode) -> Result<(), DbError> {
    sqlx::query(&format!(
        "INSERT INTO promo_codes ({PROMO_CODE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
    ))
    .bind(promo_code.id)
    .bind(&promo_code.code)
    .bind(&promo_code.service_info)
    .bind(promo_code.begin_date)
    .bind(promo_code.end_date)
    .bind(&promo_code.partner_name)
    .bind(promo_code.preference_id)
    .bind(promo_code.customer_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_promo_code(pool: &PgPool, promo_code: &PromoCode) -> Result<(), DbError> {
    let result = sqlx::query(
        r#"
        UPDATE promo_codes
        SET code = $2, service_info = $3, begin_date = $4, end_date = $5,
            partner_name = $6, preference_id = $7, customer_id = $8
        WHERE id = $1
        "#,
    )
    .bind(promo_code.id)
    .bind(&promo_code.code)
    .bind(&promo_code.service_info)
    .bind(promo_code.begin_date)
    .bind(promo_code.end_date)
    .bind(&promo_code.partner_name)
    .bind(promo_code.preference_id)
    .bind(promo_code.customer_id)
    .execute(pool)
    .await?;

    expect_one(result.rows_affected())
}

pub async fn delete_promo_code(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    delete_by_id(pool, "promo_codes", id).await
}
