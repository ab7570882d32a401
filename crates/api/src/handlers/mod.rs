//! Route handlers, one module per resource.
//!
//! Handlers are thin: extract, call a repository or the partner-limit
//! service, map the result onto a response DTO.

pub mod employees;
pub mod roles;
pub mod preferences;
pub mod customers;
pub mod promocodes;
pub mod partners;

use std::sync::Arc;

use domain::{
    Clock, Customer, Employee, Partner, PartnerLimitService, Preference, PromoCode, Repository,
    Role,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<dyn Repository<Employee>>,
    pub roles: Arc<dyn Repository<Role>>,
    pub preferences: Arc<dyn Repository<Preference>>,
    pub customers: Arc<dyn Repository<Customer>>,
    pub promo_codes: Arc<dyn Repository<PromoCode>>,
    pub partner_limits: Arc<PartnerLimitService>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Build every repository view from one store that implements them all.
    pub fn from_store<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Self
    where
        S: Repository<Employee>
            + Repository<Role>
            + Repository<Preference>
            + Repository<Customer>
            + Repository<PromoCode>
            + Repository<Partner>
            + 'static,
    {
        let partners: Arc<dyn Repository<Partner>> = store.clone();
        Self {
            employees: store.clone(),
            roles: store.clone(),
            preferences: store.clone(),
            customers: store.clone(),
            promo_codes: store,
            partner_limits: Arc::new(PartnerLimitService::new(partners, clock.clone())),
            clock,
        }
    }
}
