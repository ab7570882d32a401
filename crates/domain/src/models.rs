//! Core domain models for the promo-code factory.
//!
//! These types are the in-memory source of truth.  Persistence crates map
//! their rows onto them; the HTTP layer maps them onto response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::Entity;

// ---------------------------------------------------------------------------
// Administration
// ---------------------------------------------------------------------------

/// An employee role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Inactive roles stay in storage but are hidden from listings.
    pub is_active: bool,
}

/// An employee who may apply promo codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Option<Role>,
    pub applied_promocodes_count: i32,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ---------------------------------------------------------------------------
// Promo-code management
// ---------------------------------------------------------------------------

/// A customer interest that promo codes are targeted at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub id: Uuid,
    pub name: String,
}

/// A promo code issued to one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: Uuid,
    pub code: String,
    pub service_info: String,
    pub begin_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub partner_name: String,
    pub preference_id: Uuid,
    pub customer_id: Uuid,
}

/// A customer together with its preferences.
///
/// Issued promo codes reference the customer by id and live in their own
/// repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub preferences: Vec<Preference>,
}

impl Customer {
    pub fn has_preference(&self, preference_id: Uuid) -> bool {
        self.preferences.iter().any(|p| p.id == preference_id)
    }
}

// ---------------------------------------------------------------------------
// Partners
// ---------------------------------------------------------------------------

/// One entry of a partner's limit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerPromoCodeLimit {
    pub id: Uuid,
    pub partner_id: Uuid,
    /// Maximum number of codes issuable under this limit.
    pub limit: i32,
    pub create_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Set only when the limit was superseded or cancelled before `end_date`.
    pub cancel_date: Option<DateTime<Utc>>,
}

impl PartnerPromoCodeLimit {
    /// Not cancelled and not yet expired at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.cancel_date.is_none() && self.end_date > now
    }
}

/// Aggregate root owning the whole limit history of a partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub number_issued_promo_codes: i32,
    /// Append-only; cancellation is a field update, never a removal.
    pub partner_limits: Vec<PartnerPromoCodeLimit>,
    /// Optimistic concurrency token, bumped by every successful update.
    pub version: i64,
}

impl Partner {
    /// The limit a new one supersedes: the active limit if there is one,
    /// otherwise the most recent uncancelled (naturally expired) one.
    ///
    /// Expired limits keep `cancel_date == None`, so the history may hold
    /// several uncancelled entries.
    pub fn current_limit_mut(&mut self, now: DateTime<Utc>) -> Option<&mut PartnerPromoCodeLimit> {
        let index = self
            .partner_limits
            .iter()
            .position(|l| l.is_active_at(now))
            .or_else(|| self.partner_limits.iter().rposition(|l| l.cancel_date.is_none()))?;
        self.partner_limits.get_mut(index)
    }

    pub fn active_limit_mut(&mut self, now: DateTime<Utc>) -> Option<&mut PartnerPromoCodeLimit> {
        self.partner_limits.iter_mut().find(|l| l.is_active_at(now))
    }

    pub fn limit(&self, limit_id: Uuid) -> Option<&PartnerPromoCodeLimit> {
        self.partner_limits.iter().find(|l| l.id == limit_id)
    }
}

// ---------------------------------------------------------------------------
// Entity impls
// ---------------------------------------------------------------------------

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
        })*
    };
}

impl_entity!(Role, Employee, Preference, PromoCode, Customer);

impl Entity for Partner {
    fn id(&self) -> Uuid {
        self.id
    }

    fn row_version(&self) -> Option<i64> {
        Some(self.version)
    }

    fn set_row_version(&mut self, version: i64) {
        self.version = version;
    }
}
