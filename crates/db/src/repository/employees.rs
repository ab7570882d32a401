//! Employee CRUD operations.
//!
//! Reads always left-join the employee's role so the domain type comes back
//! complete; writes only store the `role_id` reference.

use domain::Employee;
use sqlx::PgPool;
use uuid::Uuid;

use super::{delete_by_id, expect_one};
use crate::{models::EmployeeRow, DbError};

const SELECT_EMPLOYEE: &str = r#"
    SELECT e.id, e.first_name, e.last_name, e.email, e.applied_promocodes_count,
           r.id AS role_id, r.name AS role_name,
           r.description AS role_description, r.is_active AS role_is_active
    FROM employees e
    LEFT JOIN roles r ON r.id = e.role_id
"#;

pub async fn list_employees(pool: &PgPool) -> Result<Vec<EmployeeRow>, DbError> {
    let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
        "{SELECT_EMPLOYEE} ORDER BY e.last_name, e.first_name"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_employee(pool: &PgPool, id: Uuid) -> Result<Option<EmployeeRow>, DbError> {
    let row = sqlx::query_as::<_, EmployeeRow>(&format!("{SELECT_EMPLOYEE} WHERE e.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn insert_employee(pool: &PgPool, employee: &Employee) -> Result<(), DbError> {
    sqlx::query(
        r#"
        INSERT INTO employees (id, first_name, last_name, email, role_id, applied_promocodes_count)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(employee.id)
    .bind(&employee.first_name)
    .bind(&employee.last_name)
    .bind(&employee.email)
    .bind(employee.role.as_ref().map(|r| r.id))
    .bind(employee.applied_promocodes_count)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn update_employee(pool: &PgPool, employee: &Employee) -> Result<(), DbError> {
    let result = sqlx::query(
        r#"
        UPDATE employees
        SET first_name = $2, last_name = $3, email = $4, role_id = $5, applied_promocodes_count = $6
        WHERE id = $1
        "#,
    )
    .bind(employee.id)
    .bind(&employee.first_name)
    .bind(&employee.last_name)
    .bind(&employee.email)
    .bind(employee.role.as_ref().map(|r| r.id))
    .bind(employee.applied_promocodes_count)
    .execute(pool)
    .await?;

    expect_one(result.rows_affected())
}

pub async fn delete_employee(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    delete_by_id(pool, "employees", id).await
}
