use axum::{
    extract::{Path, State},
    Json,
};
use domain::Employee;
use serde::Serialize;
use uuid::Uuid;

use super::AppState;
use crate::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeShortResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleItemResponse {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Option<RoleItemResponse>,
    pub applied_promocodes_count: i32,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            full_name: employee.full_name(),
            email: employee.email,
            role: employee.role.map(|r| RoleItemResponse {
                name: r.name,
                description: r.description,
            }),
            applied_promocodes_count: employee.applied_promocodes_count,
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<EmployeeShortResponse>>, ApiError> {
    let employees = state.employees.get_all().await?;
    let response = employees
        .into_iter()
        .map(|e| EmployeeShortResponse {
            id: e.id,
            full_name: e.full_name(),
            email: e.email,
        })
        .collect();

    Ok(Json(response))
}

pub async fn get(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = state.employees.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(employee.into()))
}
