//! Customer CRUD operations.
//!
//! A customer spans `customers` and `customer_preferences`; writes touch
//! both inside one transaction.

use domain::{Customer, Preference};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::delete_by_id;
use crate::{
    models::{assemble_customers, CustomerPreferenceRow, CustomerRow},
    DbError,
};

/// Return all customers, fully assembled, ordered by name.
pub async fn list_customers(pool: &PgPool) -> Result<Vec<Customer>, DbError> {
    let rows = sqlx::query_as::<_, CustomerRow>(
        "SELECT id, first_name, last_name, email FROM customers ORDER BY last_name, first_name",
    )
    .fetch_all(pool)
    .await?;

    load_preferences(pool, rows).await
}

/// Fetch a single customer with its preferences.
pub async fn get_customer(pool: &PgPool, id: Uuid) -> Result<Option<Customer>, DbError> {
    let row = sqlx::query_as::<_, CustomerRow>(
        "SELECT id, first_name, last_name, email FROM customers WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    Ok(load_preferences(pool, vec![row]).await?.pop())
}

/// Insert the customer row and its preference links.
pub async fn insert_customer(pool: &PgPool, customer: &Customer) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO customers (id, first_name, last_name, email) VALUES ($1, $2, $3, $4)")
        .bind(customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .execute(&mut *tx)
        .await?;

    insert_preference_links(&mut tx, customer.id, &customer.preferences).await?;

    tx.commit().await?;
    Ok(())
}

/// Overwrite the customer's scalar fields and replace its preference set.
pub async fn update_customer(pool: &PgPool, customer: &Customer) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE customers SET first_name = $2, last_name = $3, email = $4 WHERE id = $1",
    )
    .bind(customer.id)
    .bind(&customer.first_name)
    .bind(&customer.last_name)
    .bind(&customer.email)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Err(DbError::NotFound);
    }

    sqlx::query("DELETE FROM customer_preferences WHERE customer_id = $1")
        .bind(customer.id)
        .execute(&mut *tx)
        .await?;

    insert_preference_links(&mut tx, customer.id, &customer.preferences).await?;

    tx.commit().await?;
    Ok(())
}

/// Delete a customer.  Preference links and promo codes cascade.
pub async fn delete_customer(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    delete_by_id(pool, "customers", id).await
}

async fn insert_preference_links(
    tx: &mut Transaction<'_, Postgres>,
    customer_id: Uuid,
    preferences: &[Preference],
) -> Result<(), DbError> {
    for preference in preferences {
        sqlx::query(
            r#"
            INSERT INTO customer_preferences (customer_id, preference_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(customer_id)
        .bind(preference.id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn load_preferences(pool: &PgPool, rows: Vec<CustomerRow>) -> Result<Vec<Customer>, DbError> {
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

    let preferences = sqlx::query_as::<_, CustomerPreferenceRow>(
        r#"
        SELECT cp.customer_id, cp.preference_id, p.name
        FROM customer_preferences cp
        JOIN preferences p ON p.id = cp.preference_id
        WHERE cp.customer_id = ANY($1)
        ORDER BY p.name
        "#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    Ok(assemble_customers(rows, preferences))
}
