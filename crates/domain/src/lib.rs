//! `domain` crate — entities, the repository contract, and the partner-limit service.
//!
//! Nothing in here knows about HTTP or SQL.  Storage backends implement
//! [`Repository`]; the `api` crate drives everything through trait objects.

pub mod models;
pub mod error;
pub mod repository;
pub mod clock;
pub mod memory;
pub mod partner_limits;

pub use models::{
    Customer, Employee, Partner, PartnerPromoCodeLimit, Preference, PromoCode, Role,
};
pub use error::{PartnerLimitError, RepositoryError};
pub use repository::{Entity, Repository};
pub use clock::{Clock, FixedClock, SystemClock};
pub use memory::InMemoryRepository;
pub use partner_limits::PartnerLimitService;

#[cfg(test)]
mod partner_limits_tests;
