use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use super::AppState;
use crate::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// Active roles only.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<RoleResponse>>, ApiError> {
    let roles = state.roles.get_all().await?;
    let response = roles
        .into_iter()
        .filter(|r| r.is_active)
        .map(|r| RoleResponse {
            id: r.id,
            name: r.name,
            description: r.description,
        })
        .collect();

    Ok(Json(response))
}
