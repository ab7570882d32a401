//! Tests for `PartnerLimitService`.
//!
//! Every test runs against `InMemoryRepository` with a `FixedClock`, so
//! "now" is the same instant for the arrange and act phases.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::memory::WriteCall;
use crate::{
    FixedClock, InMemoryRepository, Partner, PartnerLimitError, PartnerLimitService,
    PartnerPromoCodeLimit, Repository, RepositoryError,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 23, 14, 48, 0).unwrap()
}

/// Builds partners the way the tests need them, one knob at a time.
struct PartnerBuilder {
    partner: Partner,
}

impl PartnerBuilder {
    fn new() -> Self {
        Self {
            partner: Partner {
                id: Uuid::new_v4(),
                name: "Суперигрушки".into(),
                is_active: true,
                number_issued_promo_codes: 0,
                partner_limits: Vec::new(),
                version: 0,
            },
        }
    }

    fn inactive(mut self) -> Self {
        self.partner.is_active = false;
        self
    }

    fn issued(mut self, count: i32) -> Self {
        self.partner.number_issued_promo_codes = count;
        self
    }

    /// Add an uncancelled limit created `created_ago` before now and ending
    /// `ends_in` after now (negative for an already expired limit).
    fn with_limit(mut self, created_ago: Duration, ends_in: Duration) -> Self {
        self.partner.partner_limits.push(PartnerPromoCodeLimit {
            id: Uuid::new_v4(),
            partner_id: self.partner.id,
            limit: 5,
            create_date: now() - created_ago,
            end_date: now() + ends_in,
            cancel_date: None,
        });
        self
    }

    fn build(self) -> Partner {
        self.partner
    }
}

fn setup(partners: Vec<Partner>) -> (Arc<InMemoryRepository<Partner>>, PartnerLimitService) {
    let repo = Arc::new(InMemoryRepository::with_items(partners));
    let service = PartnerLimitService::new(repo.clone(), Arc::new(FixedClock(now())));
    (repo, service)
}

async fn reload(repo: &InMemoryRepository<Partner>, id: Uuid) -> Partner {
    repo.get_by_id(id).await.unwrap().expect("partner should exist")
}

// ============================================================
// Validation
// ============================================================

#[tokio::test]
async fn unknown_partner_is_not_found_and_nothing_is_written() {
    let (repo, service) = setup(vec![]);
    let missing = Uuid::new_v4();

    let result = service
        .set_partner_limit(missing, 10, now() + Duration::days(30))
        .await;

    assert!(matches!(result, Err(PartnerLimitError::NotFound(id)) if id == missing));
    assert!(repo.writes().await.is_empty());
}

#[tokio::test]
async fn inactive_partner_is_rejected_regardless_of_limit() {
    let partner = PartnerBuilder::new().inactive().build();
    let id = partner.id;
    let (repo, service) = setup(vec![partner]);

    for limit in [10, 0, -3] {
        let result = service
            .set_partner_limit(id, limit, now() + Duration::days(30))
            .await;
        assert!(matches!(result, Err(PartnerLimitError::InvalidOperation)));
    }
    assert!(repo.writes().await.is_empty());
}

#[tokio::test]
async fn non_positive_limit_is_an_invalid_argument() {
    let partner = PartnerBuilder::new().build();
    let id = partner.id;
    let (repo, service) = setup(vec![partner]);

    for limit in [0, -1, i32::MIN] {
        let result = service
            .set_partner_limit(id, limit, now() + Duration::days(30))
            .await;
        assert!(matches!(result, Err(PartnerLimitError::InvalidArgument)));
    }
    assert!(repo.writes().await.is_empty());
    assert!(reload(&repo, id).await.partner_limits.is_empty());
}

// ============================================================
// State transitions
// ============================================================

#[tokio::test]
async fn first_limit_is_appended_without_touching_the_counter() {
    let partner = PartnerBuilder::new().build();
    let id = partner.id;
    let (repo, service) = setup(vec![partner]);
    let end_date = now() + Duration::days(30);

    let created = service.set_partner_limit(id, 10, end_date).await.unwrap();

    assert_eq!(created.partner_id, id);
    assert_eq!(created.limit, 10);
    assert_eq!(created.create_date, now());
    assert_eq!(created.end_date, end_date);
    assert_eq!(created.cancel_date, None);

    let stored = reload(&repo, id).await;
    assert_eq!(stored.partner_limits, vec![created]);
    assert_eq!(stored.number_issued_promo_codes, 0);
    assert_eq!(repo.writes().await, vec![WriteCall::Update(id)]);
}

#[tokio::test]
async fn active_limit_is_cancelled_and_counter_reset() {
    let partner = PartnerBuilder::new()
        .issued(7)
        .with_limit(Duration::days(1), Duration::days(10))
        .build();
    let id = partner.id;
    let previous_id = partner.partner_limits[0].id;
    let (repo, service) = setup(vec![partner]);

    let created = service
        .set_partner_limit(id, 10, now() + Duration::days(30))
        .await
        .unwrap();

    let stored = reload(&repo, id).await;
    assert_eq!(stored.partner_limits.len(), 2);
    assert_eq!(stored.number_issued_promo_codes, 0);

    let previous = stored.limit(previous_id).unwrap();
    assert_eq!(previous.cancel_date, Some(now()));
    assert_eq!(stored.limit(created.id).unwrap().cancel_date, None);
    assert_eq!(repo.update_count().await, 1);
}

#[tokio::test]
async fn expired_limit_is_left_alone_and_counter_kept() {
    let partner = PartnerBuilder::new()
        .issued(5)
        .with_limit(Duration::days(10), -Duration::days(1))
        .build();
    let id = partner.id;
    let expired_id = partner.partner_limits[0].id;
    let (repo, service) = setup(vec![partner]);

    service
        .set_partner_limit(id, 10, now() + Duration::days(30))
        .await
        .unwrap();

    let stored = reload(&repo, id).await;
    assert_eq!(stored.partner_limits.len(), 2);
    assert_eq!(stored.number_issued_promo_codes, 5);
    assert_eq!(stored.limit(expired_id).unwrap().cancel_date, None);
    assert_eq!(repo.update_count().await, 1);
}

#[tokio::test]
async fn limit_ending_exactly_now_counts_as_expired() {
    let partner = PartnerBuilder::new()
        .issued(3)
        .with_limit(Duration::days(10), Duration::zero())
        .build();
    let id = partner.id;
    let (repo, service) = setup(vec![partner]);

    service
        .set_partner_limit(id, 1, now() + Duration::days(1))
        .await
        .unwrap();

    let stored = reload(&repo, id).await;
    assert_eq!(stored.number_issued_promo_codes, 3);
    assert_eq!(stored.partner_limits[0].cancel_date, None);
}

#[tokio::test]
async fn repeated_updates_keep_a_single_active_limit() {
    let partner = PartnerBuilder::new().build();
    let id = partner.id;
    let (repo, service) = setup(vec![partner]);

    for limit in 1..=3 {
        service
            .set_partner_limit(id, limit, now() + Duration::days(30))
            .await
            .unwrap();
    }

    let stored = reload(&repo, id).await;
    assert_eq!(stored.partner_limits.len(), 3);
    let active: Vec<_> = stored
        .partner_limits
        .iter()
        .filter(|l| l.is_active_at(now()))
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].limit, 3);
    assert_eq!(repo.update_count().await, 3);
}

#[tokio::test]
async fn active_limit_is_superseded_even_behind_an_expired_one() {
    let partner = PartnerBuilder::new()
        .with_limit(Duration::days(10), -Duration::days(1))
        .build();
    let id = partner.id;
    let expired_id = partner.partner_limits[0].id;
    let (repo, service) = setup(vec![partner]);

    let first = service
        .set_partner_limit(id, 10, now() + Duration::days(30))
        .await
        .unwrap();

    let mut issued = reload(&repo, id).await;
    issued.number_issued_promo_codes = 7;
    repo.update(issued).await.unwrap();

    let second = service
        .set_partner_limit(id, 20, now() + Duration::days(60))
        .await
        .unwrap();

    let stored = reload(&repo, id).await;
    let active: Vec<_> = stored
        .partner_limits
        .iter()
        .filter(|l| l.is_active_at(now()))
        .map(|l| l.id)
        .collect();
    assert_eq!(active, vec![second.id]);
    assert_eq!(stored.limit(first.id).unwrap().cancel_date, Some(now()));
    assert_eq!(stored.limit(expired_id).unwrap().cancel_date, None);
    assert_eq!(stored.number_issued_promo_codes, 0);
}

// ============================================================
// Lookup and cancellation
// ============================================================

#[tokio::test]
async fn get_partner_limit_finds_only_own_limits() {
    let partner = PartnerBuilder::new()
        .with_limit(Duration::days(1), Duration::days(10))
        .build();
    let id = partner.id;
    let limit_id = partner.partner_limits[0].id;
    let (_repo, service) = setup(vec![partner]);

    let found = service.get_partner_limit(id, limit_id).await.unwrap();
    assert_eq!(found.id, limit_id);

    let unknown = Uuid::new_v4();
    let missing = service.get_partner_limit(id, unknown).await;
    assert!(matches!(missing, Err(PartnerLimitError::LimitNotFound(l)) if l == unknown));
    assert_eq!(
        missing.unwrap_err().to_string(),
        format!("limit {unknown} not found")
    );
}

#[tokio::test]
async fn cancel_sets_cancel_date_on_active_limit_only() {
    let partner = PartnerBuilder::new()
        .issued(4)
        .with_limit(Duration::days(1), Duration::days(10))
        .build();
    let id = partner.id;
    let (repo, service) = setup(vec![partner]);

    service.cancel_partner_limit(id).await.unwrap();

    let stored = reload(&repo, id).await;
    assert_eq!(stored.partner_limits[0].cancel_date, Some(now()));
    assert_eq!(stored.number_issued_promo_codes, 4);
    assert_eq!(repo.update_count().await, 1);
}

#[tokio::test]
async fn cancel_without_active_limit_writes_nothing() {
    let partner = PartnerBuilder::new()
        .with_limit(Duration::days(10), -Duration::days(1))
        .build();
    let id = partner.id;
    let (repo, service) = setup(vec![partner]);

    service.cancel_partner_limit(id).await.unwrap();

    assert!(repo.writes().await.is_empty());
    assert_eq!(reload(&repo, id).await.partner_limits[0].cancel_date, None);
}

#[tokio::test]
async fn cancel_rejects_inactive_partner() {
    let partner = PartnerBuilder::new()
        .inactive()
        .with_limit(Duration::days(1), Duration::days(10))
        .build();
    let id = partner.id;
    let (repo, service) = setup(vec![partner]);

    let result = service.cancel_partner_limit(id).await;

    assert!(matches!(result, Err(PartnerLimitError::InvalidOperation)));
    assert!(repo.writes().await.is_empty());
}

// ============================================================
// Persistence failures
// ============================================================

#[tokio::test]
async fn stale_partner_copy_is_rejected_as_conflict() {
    let partner = PartnerBuilder::new().build();
    let id = partner.id;
    let (repo, service) = setup(vec![partner]);

    let stale = reload(&repo, id).await;
    service
        .set_partner_limit(id, 10, now() + Duration::days(30))
        .await
        .unwrap();

    let result = repo.update(stale).await;
    assert!(matches!(result, Err(RepositoryError::Conflict)));
    assert_eq!(reload(&repo, id).await.partner_limits.len(), 1);
}

/// Serves one partner but refuses every write.
struct ReadOnlyRepository(Partner);

#[async_trait]
impl Repository<Partner> for ReadOnlyRepository {
    async fn get_all(&self) -> Result<Vec<Partner>, RepositoryError> {
        Ok(vec![self.0.clone()])
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Partner>, RepositoryError> {
        Ok((self.0.id == id).then(|| self.0.clone()))
    }

    async fn add(&self, _entity: Partner) -> Result<Partner, RepositoryError> {
        Err(RepositoryError::storage("read-only"))
    }

    async fn update(&self, _entity: Partner) -> Result<(), RepositoryError> {
        Err(RepositoryError::storage("read-only"))
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepositoryError> {
        Err(RepositoryError::storage("read-only"))
    }
}

#[tokio::test]
async fn storage_failure_propagates_to_caller() {
    let partner = PartnerBuilder::new().build();
    let id = partner.id;
    let service = PartnerLimitService::new(
        Arc::new(ReadOnlyRepository(partner)),
        Arc::new(FixedClock(now())),
    );

    let result = service
        .set_partner_limit(id, 10, now() + Duration::days(30))
        .await;

    assert!(matches!(
        result,
        Err(PartnerLimitError::Repository(RepositoryError::Storage(_)))
    ));
}
