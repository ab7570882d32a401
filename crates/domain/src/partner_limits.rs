//! Partner promo-code limits.
//!
//! `PartnerLimitService` owns the only real business rule in the system:
//! replacing a partner's issuance limit.
//!
//! 1. Loads the partner aggregate and validates the request.
//! 2. Cancels the previous limit if it is still active, resetting the
//!    issued-code counter.  A naturally expired limit is left untouched.
//! 3. Appends the new limit and writes the whole aggregate back exactly once.
//!
//! The service takes no locks.  Concurrent writers are caught by the
//! partner's `version` token, which surfaces as `RepositoryError::Conflict`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{Clock, Partner, PartnerLimitError, PartnerPromoCodeLimit, Repository};

pub struct PartnerLimitService {
    partners: Arc<dyn Repository<Partner>>,
    clock: Arc<dyn Clock>,
}

impl PartnerLimitService {
    pub fn new(partners: Arc<dyn Repository<Partner>>, clock: Arc<dyn Clock>) -> Self {
        Self { partners, clock }
    }

    pub async fn list_partners(&self) -> Result<Vec<Partner>, PartnerLimitError> {
        Ok(self.partners.get_all().await?)
    }

    /// Look up one limit from a partner's history.
    pub async fn get_partner_limit(
        &self,
        partner_id: Uuid,
        limit_id: Uuid,
    ) -> Result<PartnerPromoCodeLimit, PartnerLimitError> {
        let partner = self.load(partner_id).await?;
        partner
            .limit(limit_id)
            .cloned()
            .ok_or(PartnerLimitError::LimitNotFound(limit_id))
    }

    /// Replace the partner's current limit with a new one.
    ///
    /// # Errors
    /// `NotFound` for an unknown partner, `InvalidOperation` for an inactive
    /// one, `InvalidArgument` for a non-positive limit.  None of these write
    /// anything.  Persistence failures are passed through as `Repository`.
    #[instrument(skip(self))]
    pub async fn set_partner_limit(
        &self,
        partner_id: Uuid,
        limit: i32,
        end_date: DateTime<Utc>,
    ) -> Result<PartnerPromoCodeLimit, PartnerLimitError> {
        let mut partner = self.load_active(partner_id).await?;
        if limit <= 0 {
            return Err(PartnerLimitError::InvalidArgument);
        }

        let now = self.clock.now();

        if let Some(current) = partner.current_limit_mut(now) {
            if current.end_date > now {
                debug!(previous = %current.id, "cancelling active limit");
                current.cancel_date = Some(now);
                partner.number_issued_promo_codes = 0;
            }
        }

        let new_limit = PartnerPromoCodeLimit {
            id: Uuid::new_v4(),
            partner_id,
            limit,
            create_date: now,
            end_date,
            cancel_date: None,
        };
        partner.partner_limits.push(new_limit.clone());

        self.partners.update(partner).await?;
        info!(limit_id = %new_limit.id, "partner limit set");

        Ok(new_limit)
    }

    /// Cancel the partner's active limit, if any.
    ///
    /// Writes only when a limit was actually cancelled.  The issued-code
    /// counter is left as is.
    #[instrument(skip(self))]
    pub async fn cancel_partner_limit(&self, partner_id: Uuid) -> Result<(), PartnerLimitError> {
        let mut partner = self.load_active(partner_id).await?;
        let now = self.clock.now();

        let Some(active) = partner.active_limit_mut(now) else {
            debug!("no active limit to cancel");
            return Ok(());
        };
        active.cancel_date = Some(now);
        let limit_id = active.id;

        self.partners.update(partner).await?;
        info!(%limit_id, "partner limit cancelled");

        Ok(())
    }

    async fn load(&self, partner_id: Uuid) -> Result<Partner, PartnerLimitError> {
        self.partners
            .get_by_id(partner_id)
            .await?
            .ok_or(PartnerLimitError::NotFound(partner_id))
    }

    async fn load_active(&self, partner_id: Uuid) -> Result<Partner, PartnerLimitError> {
        let partner = self.load(partner_id).await?;
        if !partner.is_active {
            return Err(PartnerLimitError::InvalidOperation);
        }
        Ok(partner)
    }
}
