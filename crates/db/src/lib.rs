//! `db` crate — Postgres persistence layer.
//!
//! Provides a connection pool, typed row structs, repository functions for
//! every table in the promo-code schema, and [`PgStore`], which exposes them
//! through the `domain::Repository` trait.  No business logic lives here.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;
pub mod store;

pub use pool::DbPool;
pub use error::DbError;
pub use store::PgStore;
