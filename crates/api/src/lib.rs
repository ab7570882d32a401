//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET    /api/v1/employees
//!   GET    /api/v1/employees/{id}
//!   GET    /api/v1/roles
//!   GET    /api/v1/preferences
//!   GET    /api/v1/customers
//!   POST   /api/v1/customers
//!   GET    /api/v1/customers/{id}
//!   PUT    /api/v1/customers/{id}
//!   DELETE /api/v1/customers/{id}
//!   GET    /api/v1/promocodes
//!   POST   /api/v1/promocodes
//!   GET    /api/v1/partners
//!   POST   /api/v1/partners/{id}/limits
//!   GET    /api/v1/partners/{id}/limits/{limit_id}
//!   POST   /api/v1/partners/{id}/cancelled-limits

pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use error::ApiError;
pub use handlers::AppState;

use handlers::{customers, employees, partners, preferences, promocodes, roles};

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/employees", get(employees::list))
        .route("/employees/:id", get(employees::get))
        .route("/roles", get(roles::list))
        .route("/preferences", get(preferences::list))
        .route("/customers", get(customers::list).post(customers::create))
        .route(
            "/customers/:id",
            get(customers::get).put(customers::edit).delete(customers::delete),
        )
        .route(
            "/promocodes",
            get(promocodes::list).post(promocodes::give_to_customers_with_preference),
        )
        .route("/partners", get(partners::list))
        .route("/partners/:id/limits", post(partners::set_limit))
        .route("/partners/:id/limits/:limit_id", get(partners::get_limit))
        .route("/partners/:id/cancelled-limits", post(partners::cancel_limit));

    Router::new()
        .nest("/api/v1", v1)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve the API until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
