//! HTTP API application wiring (axum router + service wiring).
//!
//! The folder is structured like:
//! - `services.rs`: store wiring and the guarded operations behind every route
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use factura_auth::Hs256TokenVerifier;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
///
/// Dependencies are injected, not ambient: the caller owns the service set
/// and the verifier secret, and the same composition serves production and
/// tests.
pub fn build_app(jwt_secret: &str, services: Arc<services::AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        verifier: Arc::new(Hs256TokenVerifier::new(jwt_secret)),
        users: services.users.clone(),
    };

    // Protected routes: the auth middleware is outermost, so 401 is decided
    // before any handler or extension is touched.
    let protected = routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::auth_middleware,
            ))
            .layer(Extension(services)),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
