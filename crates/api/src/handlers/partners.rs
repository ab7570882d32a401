use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use domain::{Partner, PartnerPromoCodeLimit};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AppState;
use crate::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerPromoCodeLimitResponse {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub limit: i32,
    pub create_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub cancel_date: Option<DateTime<Utc>>,
}

impl From<PartnerPromoCodeLimit> for PartnerPromoCodeLimitResponse {
    fn from(l: PartnerPromoCodeLimit) -> Self {
        Self {
            id: l.id,
            partner_id: l.partner_id,
            limit: l.limit,
            create_date: l.create_date,
            end_date: l.end_date,
            cancel_date: l.cancel_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerResponse {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub number_issued_promo_codes: i32,
    pub partner_limits: Vec<PartnerPromoCodeLimitResponse>,
}

impl From<Partner> for PartnerResponse {
    fn from(p: Partner) -> Self {
        Self {
            id: p.id,
            name: p.name,
            is_active: p.is_active,
            number_issued_promo_codes: p.number_issued_promo_codes,
            partner_limits: p.partner_limits.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPartnerPromoCodeLimitRequest {
    pub limit: i32,
    pub end_date: DateTime<Utc>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PartnerResponse>>, ApiError> {
    let partners = state.partner_limits.list_partners().await?;
    Ok(Json(partners.into_iter().map(Into::into).collect()))
}

pub async fn get_limit(
    Path((id, limit_id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
) -> Result<Json<PartnerPromoCodeLimitResponse>, ApiError> {
    let limit = state.partner_limits.get_partner_limit(id, limit_id).await?;
    Ok(Json(limit.into()))
}

/// Responds `201 Created` with a `Location` pointing at the new limit.
pub async fn set_limit(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<SetPartnerPromoCodeLimitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = state
        .partner_limits
        .set_partner_limit(id, payload.limit, payload.end_date)
        .await?;

    let location = format!("/api/v1/partners/{id}/limits/{}", limit.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PartnerPromoCodeLimitResponse::from(limit)),
    ))
}

pub async fn cancel_limit(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.partner_limits.cancel_partner_limit(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
