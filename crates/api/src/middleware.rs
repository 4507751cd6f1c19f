use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, middleware::Next, response::Response};
use chrono::Utc;

use factura_auth::{Caller, TokenVerifier};
use factura_core::Error;
use factura_store::UserStore;

use crate::app::errors;
use crate::context::CallerContext;

#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn TokenVerifier>,
    pub users: Arc<dyn UserStore>,
}

/// Resolve the caller exactly once, before any handler runs.
///
/// The token establishes who is calling; the role comes from the stored
/// account, so a role change applies on the very next request without
/// waiting for tokens to expire. Every identity failure here is 401;
/// forbidden-vs-unauthenticated is decided later, with a caller in hand.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers())?;

    let claims = state
        .verifier
        .verify(token, Utc::now())
        .map_err(|e| errors::error_to_response(&Error::from(e)))?;

    let user = state
        .users
        .get(claims.sub)
        .map_err(|e| errors::error_to_response(&Error::from(e)))?
        .ok_or_else(|| unauthenticated("token subject is not a known user"))?;

    req.extensions_mut()
        .insert(CallerContext::new(Caller::new(user.id, user.role)));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, Response> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| unauthenticated("missing Authorization header"))?;

    let header = header
        .to_str()
        .map_err(|_| unauthenticated("malformed Authorization header"))?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthenticated("expected a bearer token"))?;

    let token = header.trim();
    if token.is_empty() {
        return Err(unauthenticated("empty bearer token"));
    }

    Ok(token)
}

fn unauthenticated(msg: &str) -> Response {
    errors::error_to_response(&Error::unauthenticated(msg))
}
