//! `PgStore` — the Postgres implementation of `domain::Repository`.
//!
//! One store implements the trait for every entity, so the HTTP layer can
//! hand out `Arc<dyn Repository<E>>` views over a single pool.

use async_trait::async_trait;
use domain::{
    Customer, Employee, Partner, Preference, PromoCode, Repository, RepositoryError, Role,
};
use tracing::instrument;
use uuid::Uuid;

use crate::repository::{customers, employees, partners, preferences, promo_codes, roles};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Role> for PgStore {
    async fn get_all(&self) -> Result<Vec<Role>, RepositoryError> {
        let rows = roles::list_roles(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Role>, RepositoryError> {
        Ok(roles::get_role(&self.pool, id).await?.map(Into::into))
    }

    async fn add(&self, role: Role) -> Result<Role, RepositoryError> {
        roles::insert_role(&self.pool, &role).await?;
        Ok(role)
    }

    async fn update(&self, role: Role) -> Result<(), RepositoryError> {
        Ok(roles::update_role(&self.pool, &role).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        Ok(roles::delete_role(&self.pool, id).await?)
    }
}

#[async_trait]
impl Repository<Employee> for PgStore {
    async fn get_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = employees::list_employees(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>, RepositoryError> {
        Ok(employees::get_employee(&self.pool, id).await?.map(Into::into))
    }

    async fn add(&self, employee: Employee) -> Result<Employee, RepositoryError> {
        employees::insert_employee(&self.pool, &employee).await?;
        Ok(employee)
    }

    async fn update(&self, employee: Employee) -> Result<(), RepositoryError> {
        Ok(employees::update_employee(&self.pool, &employee).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        Ok(employees::delete_employee(&self.pool, id).await?)
    }
}

#[async_trait]
impl Repository<Preference> for PgStore {
    async fn get_all(&self) -> Result<Vec<Preference>, RepositoryError> {
        let rows = preferences::list_preferences(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Preference>, RepositoryError> {
        Ok(preferences::get_preference(&self.pool, id).await?.map(Into::into))
    }

    async fn add(&self, preference: Preference) -> Result<Preference, RepositoryError> {
        preferences::insert_preference(&self.pool, &preference).await?;
        Ok(preference)
    }

    async fn update(&self, preference: Preference) -> Result<(), RepositoryError> {
        Ok(preferences::update_preference(&self.pool, &preference).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        Ok(preferences::delete_preference(&self.pool, id).await?)
    }
}

#[async_trait]
impl Repository<PromoCode> for PgStore {
    async fn get_all(&self) -> Result<Vec<PromoCode>, RepositoryError> {
        let rows = promo_codes::list_promo_codes(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<PromoCode>, RepositoryError> {
        Ok(promo_codes::get_promo_code(&self.pool, id).await?.map(Into::into))
    }

    async fn add(&self, promo_code: PromoCode) -> Result<PromoCode, RepositoryError> {
        promo_codes::insert_promo_code(&self.pool, &promo_code).await?;
        Ok(promo_code)
    }

    async fn update(&self, promo_code: PromoCode) -> Result<(), RepositoryError> {
        Ok(promo_codes::update_promo_code(&self.pool, &promo_code).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        Ok(promo_codes::delete_promo_code(&self.pool, id).await?)
    }
}

#[async_trait]
impl Repository<Customer> for PgStore {
    async fn get_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        Ok(customers::list_customers(&self.pool).await?)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Customer>, RepositoryError> {
        Ok(customers::get_customer(&self.pool, id).await?)
    }

    async fn add(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        customers::insert_customer(&self.pool, &customer).await?;
        Ok(customer)
    }

    async fn update(&self, customer: Customer) -> Result<(), RepositoryError> {
        Ok(customers::update_customer(&self.pool, &customer).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        Ok(customers::delete_customer(&self.pool, id).await?)
    }
}

#[async_trait]
impl Repository<Partner> for PgStore {
    async fn get_all(&self) -> Result<Vec<Partner>, RepositoryError> {
        Ok(partners::list_partners(&self.pool).await?)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Partner>, RepositoryError> {
        Ok(partners::get_partner(&self.pool, id).await?)
    }

    async fn add(&self, partner: Partner) -> Result<Partner, RepositoryError> {
        partners::insert_partner(&self.pool, &partner).await?;
        Ok(partner)
    }

    #[instrument(skip_all, fields(partner_id = %partner.id, version = partner.version))]
    async fn update(&self, partner: Partner) -> Result<(), RepositoryError> {
        Ok(partners::update_partner(&self.pool, &partner).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        Ok(partners::delete_partner(&self.pool, id).await?)
    }
}
