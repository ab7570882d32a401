use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::{Customer, Preference};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::preferences::PreferenceResponse;
use super::promocodes::PromoCodeShortResponse;
use super::AppState;
use crate::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerShortResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub preferences: Vec<PreferenceResponse>,
    pub promo_codes: Vec<PromoCodeShortResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrEditCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub preference_ids: Vec<Uuid>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CustomerShortResponse>>, ApiError> {
    let customers = state.customers.get_all().await?;
    let response = customers
        .into_iter()
        .map(|c| CustomerShortResponse {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
        })
        .collect();

    Ok(Json(response))
}

pub async fn get(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state.customers.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(full_response(&state, customer).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrEditCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    let preferences = resolve_preferences(&state, &payload.preference_ids).await?;

    let customer = Customer {
        id: Uuid::new_v4(),
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        preferences,
    };
    let customer = state.customers.add(customer).await?;
    info!(customer_id = %customer.id, "customer created");

    Ok((StatusCode::CREATED, Json(full_response(&state, customer).await?)))
}

pub async fn edit(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<CreateOrEditCustomerRequest>,
) -> Result<StatusCode, ApiError> {
    let mut customer = state.customers.get_by_id(id).await?.ok_or(ApiError::NotFound)?;
    customer.preferences = resolve_preferences(&state, &payload.preference_ids).await?;
    customer.first_name = payload.first_name;
    customer.last_name = payload.last_name;
    customer.email = payload.email;

    state.customers.update(customer).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete the customer's promo codes first, then the customer.
pub async fn delete(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let customer = state.customers.get_by_id(id).await?.ok_or(ApiError::NotFound)?;

    for promo_code in state.promo_codes.get_all().await? {
        if promo_code.customer_id == customer.id {
            state.promo_codes.delete(promo_code.id).await?;
        }
    }
    state.customers.delete(customer.id).await?;

    info!(customer_id = %customer.id, "customer deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Look up every requested preference; unknown ids are a client error.
async fn resolve_preferences(state: &AppState, ids: &[Uuid]) -> Result<Vec<Preference>, ApiError> {
    let mut preferences: Vec<Preference> = Vec::with_capacity(ids.len());
    for &id in ids {
        if preferences.iter().any(|p| p.id == id) {
            continue;
        }
        let preference = state
            .preferences
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::bad_request(format!("unknown preference {id}")))?;
        preferences.push(preference);
    }
    Ok(preferences)
}

async fn full_response(state: &AppState, customer: Customer) -> Result<CustomerResponse, ApiError> {
    let promo_codes = state
        .promo_codes
        .get_all()
        .await?
        .into_iter()
        .filter(|p| p.customer_id == customer.id)
        .map(Into::into)
        .collect();

    Ok(CustomerResponse {
        id: customer.id,
        first_name: customer.first_name,
        last_name: customer.last_name,
        email: customer.email,
        preferences: customer.preferences.into_iter().map(Into::into).collect(),
        promo_codes,
    })
}
