use axum::{extract::State, Json};
use domain::Preference;
use serde::Serialize;
use uuid::Uuid;

use super::AppState;
use crate::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Preference> for PreferenceResponse {
    fn from(p: Preference) -> Self {
        Self { id: p.id, name: p.name }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PreferenceResponse>>, ApiError> {
    let preferences = state.preferences.get_all().await?;
    Ok(Json(preferences.into_iter().map(Into::into).collect()))
}
