//! Row structs that map 1-to-1 onto database tables (or joins over them).
//!
//! These are *persistence* models.  Each one converts into the matching
//! `domain` type; aggregates that span several tables (customers, partners)
//! are stitched together by the `assemble_*` functions.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use domain::{Customer, Employee, Partner, PartnerPromoCodeLimit, Preference, PromoCode, Role};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// roles / employees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct RoleRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            description: row.description,
            is_active: row.is_active,
        }
    }
}

/// An employee left-joined with its role.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub applied_promocodes_count: i32,
    pub role_id: Option<Uuid>,
    pub role_name: Option<String>,
    pub role_description: Option<String>,
    pub role_is_active: Option<bool>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        let role = match (row.role_id, row.role_name) {
            (Some(id), Some(name)) => Some(Role {
                id,
                name,
                description: row.role_description.unwrap_or_default(),
                is_active: row.role_is_active.unwrap_or(true),
            }),
            _ => None,
        };

        Employee {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            role,
            applied_promocodes_count: row.applied_promocodes_count,
        }
    }
}

// ---------------------------------------------------------------------------
// preferences / promo_codes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct PreferenceRow {
    pub id: Uuid,
    pub name: String,
}

impl From<PreferenceRow> for Preference {
    fn from(row: PreferenceRow) -> Self {
        Preference { id: row.id, name: row.name }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PromoCodeRow {
    pub id: Uuid,
    pub code: String,
    pub service_info: String,
    pub begin_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub partner_name: String,
    pub preference_id: Uuid,
    pub customer_id: Uuid,
}

impl From<PromoCodeRow> for PromoCode {
    fn from(row: PromoCodeRow) -> Self {
        PromoCode {
            id: row.id,
            code: row.code,
            service_info: row.service_info,
            begin_date: row.begin_date,
            end_date: row.end_date,
            partner_name: row.partner_name,
            preference_id: row.preference_id,
            customer_id: row.customer_id,
        }
    }
}

// ---------------------------------------------------------------------------
// customers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A `customer_preferences` link joined with the preference name.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerPreferenceRow {
    pub customer_id: Uuid,
    pub preference_id: Uuid,
    pub name: String,
}

/// Attach preferences to their customers, keeping the order of `customers`.
pub fn assemble_customers(
    customers: Vec<CustomerRow>,
    preferences: Vec<CustomerPreferenceRow>,
) -> Vec<Customer> {
    let mut prefs_by_customer: HashMap<Uuid, Vec<Preference>> = HashMap::new();
    for row in preferences {
        prefs_by_customer
            .entry(row.customer_id)
            .or_default()
            .push(Preference { id: row.preference_id, name: row.name });
    }

    customers
        .into_iter()
        .map(|c| Customer {
            preferences: prefs_by_customer.remove(&c.id).unwrap_or_default(),
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// partners
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct PartnerRow {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub number_issued_promo_codes: i32,
    pub version: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct PartnerLimitRow {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub limit_value: i32,
    pub create_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub cancel_date: Option<DateTime<Utc>>,
}

impl From<PartnerLimitRow> for PartnerPromoCodeLimit {
    fn from(row: PartnerLimitRow) -> Self {
        PartnerPromoCodeLimit {
            id: row.id,
            partner_id: row.partner_id,
            limit: row.limit_value,
            create_date: row.create_date,
            end_date: row.end_date,
            cancel_date: row.cancel_date,
        }
    }
}

/// Attach limit histories to their partners.  `limits` must already be in
/// history order.
pub fn assemble_partners(partners: Vec<PartnerRow>, limits: Vec<PartnerLimitRow>) -> Vec<Partner> {
    let mut by_partner: HashMap<Uuid, Vec<PartnerPromoCodeLimit>> = HashMap::new();
    for row in limits {
        by_partner.entry(row.partner_id).or_default().push(row.into());
    }

    partners
        .into_iter()
        .map(|p| Partner {
            partner_limits: by_partner.remove(&p.id).unwrap_or_default(),
            id: p.id,
            name: p.name,
            is_active: p.is_active,
            number_issued_promo_codes: p.number_issued_promo_codes,
            version: p.version,
        })
        .collect()
}
