use axum::{extract::State, Json};
use chrono::{Duration, Months};
use domain::PromoCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::ApiError;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeShortResponse {
    pub id: Uuid,
    pub code: String,
    pub service_info: String,
    pub begin_date: String,
    pub end_date: String,
    pub partner_name: String,
}

impl From<PromoCode> for PromoCodeShortResponse {
    fn from(p: PromoCode) -> Self {
        Self {
            id: p.id,
            code: p.code,
            service_info: p.service_info,
            begin_date: p.begin_date.format(DATE_FORMAT).to_string(),
            end_date: p.end_date.format(DATE_FORMAT).to_string(),
            partner_name: p.partner_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GivePromoCodeRequest {
    pub service_info: String,
    pub partner_name: String,
    pub promo_code: String,
    /// Preference id, as sent by the client.
    pub preference: String,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PromoCodeShortResponse>>, ApiError> {
    let promo_codes = state.promo_codes.get_all().await?;
    Ok(Json(promo_codes.into_iter().map(Into::into).collect()))
}

/// Issue one promo code to every customer holding the requested preference.
///
/// Codes are valid from now for one month.
pub async fn give_to_customers_with_preference(
    State(state): State<AppState>,
    Json(payload): Json<GivePromoCodeRequest>,
) -> Result<Json<Value>, ApiError> {
    let preference_id = Uuid::parse_str(&payload.preference)
        .map_err(|_| ApiError::bad_request("invalid preference id"))?;

    let preference = state
        .preferences
        .get_by_id(preference_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("invalid preference id"))?;

    let customers = state.customers.get_all().await?;
    let now = state.clock.now();
    let end_date = now
        .checked_add_months(Months::new(1))
        .unwrap_or(now + Duration::days(30));

    let mut issued = 0usize;
    for customer in customers.iter().filter(|c| c.has_preference(preference.id)) {
        let promo_code = PromoCode {
            id: Uuid::new_v4(),
            code: payload.promo_code.clone(),
            service_info: payload.service_info.clone(),
            begin_date: now,
            end_date,
            partner_name: payload.partner_name.clone(),
            preference_id: preference.id,
            customer_id: customer.id,
        };
        state.promo_codes.add(promo_code).await?;
        issued += 1;
    }

    info!(preference = %preference.name, issued, "promo code issued");
    Ok(Json(json!({
        "message": "promo code issued to customers with the requested preference",
        "issued": issued,
    })))
}
