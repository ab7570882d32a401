//! Repository functions — one function per database operation.
//!
//! Every function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! Pure SQL plus row assembly; validation lives in `domain`.

pub mod roles;
pub mod employees;
pub mod preferences;
pub mod customers;
pub mod promo_codes;
pub mod partners;

use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// Delete a single row from `table` by primary key.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub(crate) async fn delete_by_id(pool: &PgPool, table: &'static str, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}

/// Map "zero rows touched" onto `DbError::NotFound`.
pub(crate) fn expect_one(rows_affected: u64) -> Result<(), DbError> {
    if rows_affected == 0 {
        Err(DbError::NotFound)
    } else {
        Ok(())
    }
}
