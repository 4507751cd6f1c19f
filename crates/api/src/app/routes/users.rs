//! User account endpoints.
//!
//! `/profile` is scoped to the caller and never touches the role. The
//! directory listing and `/:id/role` are administrator actions; the service
//! layer enforces that, the handlers only shape the wire traffic.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde_json::json;

use factura_auth::ProfilePatch;
use factura_core::UserId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/profile", get(profile).put(update_profile))
        .route("/:id/role", put(change_role))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
) -> axum::response::Response {
    match services.list_users(ctx.caller()) {
        Ok(users) => {
            let items: Vec<_> = users.iter().map(dto::user_to_json).collect();
            (StatusCode::OK, Json(json!({ "items": items }))).into_response()
        }
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
) -> axum::response::Response {
    match services.profile(ctx.caller()) {
        Ok(user) => (StatusCode::OK, Json(dto::user_to_json(&user))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn update_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Json(patch): Json<ProfilePatch>,
) -> axum::response::Response {
    match services.update_profile(ctx.caller(), &patch) {
        Ok(user) => (StatusCode::OK, Json(dto::user_to_json(&user))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn change_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::ChangeRoleRequest>,
) -> axum::response::Response {
    let id = match errors::parse_path::<UserId>(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.change_role(ctx.caller(), id, &body.role) {
        Ok(user) => (StatusCode::OK, Json(dto::user_to_json(&user))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}
