use axum::{Router, routing::get};

pub mod clients;
pub mod invoices;
pub mod reporting;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/clients", clients::router())
        .nest("/invoices", invoices::router())
        .nest("/reporting", reporting::router())
        .nest("/users", users::router())
}
