//! Partner aggregate persistence.
//!
//! A partner row and its whole limit history are always read and written
//! together.  Updates are guarded by the `version` column: the write only
//! lands if nobody else updated the partner since it was loaded.

use domain::{Partner, PartnerPromoCodeLimit};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use super::delete_by_id;
use crate::{
    models::{assemble_partners, PartnerLimitRow, PartnerRow},
    DbError,
};

const LIMIT_COLUMNS: &str = "id, partner_id, limit_value, create_date, end_date, cancel_date";

/// Return all partners with their limit histories, ordered by name.
pub async fn list_partners(pool: &PgPool) -> Result<Vec<Partner>, DbError> {
    let partners = sqlx::query_as::<_, PartnerRow>(
        "SELECT id, name, is_active, number_issued_promo_codes, version FROM partners ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    let limits = sqlx::query_as::<_, PartnerLimitRow>(&format!(
        "SELECT {LIMIT_COLUMNS} FROM partner_promo_code_limits ORDER BY create_date, id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(assemble_partners(partners, limits))
}

/// Fetch a single partner with its limit history.
pub async fn get_partner(pool: &PgPool, id: Uuid) -> Result<Option<Partner>, DbError> {
    let partner = sqlx::query_as::<_, PartnerRow>(
        "SELECT id, name, is_active, number_issued_promo_codes, version FROM partners WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(partner) = partner else {
        return Ok(None);
    };

    let limits = sqlx::query_as::<_, PartnerLimitRow>(&format!(
        "SELECT {LIMIT_COLUMNS} FROM partner_promo_code_limits WHERE partner_id = $1 ORDER BY create_date, id"
    ))
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(assemble_partners(vec![partner], limits).pop())
}

/// Insert a new partner together with any limits it already carries.
pub async fn insert_partner(pool: &PgPool, partner: &Partner) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO partners (id, name, is_active, number_issued_promo_codes, version)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(partner.id)
    .bind(&partner.name)
    .bind(partner.is_active)
    .bind(partner.number_issued_promo_codes)
    .bind(partner.version)
    .execute(&mut *tx)
    .await?;

    upsert_limits(&mut tx, &partner.partner_limits).await?;

    tx.commit().await?;
    Ok(())
}

/// Write the partner aggregate back in one transaction.
///
/// Returns `DbError::Conflict` if the stored version differs from
/// `partner.version`, and `DbError::NotFound` if the partner is gone.
/// Nothing is written in either case.
pub async fn update_partner(pool: &PgPool, partner: &Partner) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE partners
        SET name = $2, is_active = $3, number_issued_promo_codes = $4, version = version + 1
        WHERE id = $1 AND version = $5
        "#,
    )
    .bind(partner.id)
    .bind(&partner.name)
    .bind(partner.is_active)
    .bind(partner.number_issued_promo_codes)
    .bind(partner.version)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM partners WHERE id = $1)")
            .bind(partner.id)
            .fetch_one(&mut *tx)
            .await?;
        tx.rollback().await?;

        debug!(partner_id = %partner.id, exists, "partner update matched no row");
        return Err(if exists { DbError::Conflict } else { DbError::NotFound });
    }

    upsert_limits(&mut tx, &partner.partner_limits).await?;

    tx.commit().await?;
    Ok(())
}

/// Delete a partner.  Its limits cascade.
pub async fn delete_partner(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    delete_by_id(pool, "partners", id).await
}

/// Insert new limit rows and refresh `cancel_date` on existing ones.
///
/// Every other limit column is immutable once written.
async fn upsert_limits(
    tx: &mut Transaction<'_, Postgres>,
    limits: &[PartnerPromoCodeLimit],
) -> Result<(), DbError> {
    for limit in limits {
        sqlx::query(&format!(
            r#"
            INSERT INTO partner_promo_code_limits ({LIMIT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET cancel_date = EXCLUDED.cancel_date
            "#
        ))
        .bind(limit.id)
        .bind(limit.partner_id)
        .bind(limit.limit)
        .bind(limit.create_date)
        .bind(limit.end_date)
        .bind(limit.cancel_date)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
