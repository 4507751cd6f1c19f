use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use factura_clients::{ClientDraft, ClientPatch};
use factura_core::ClientId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_client).get(list_clients))
        .route("/count/status", get(count_by_status))
        .route(
            "/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

pub async fn create_client(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Json(body): Json<ClientDraft>,
) -> axum::response::Response {
    match services.create_client(ctx.caller(), body) {
        Ok(client) => (StatusCode::CREATED, Json(dto::client_to_json(&client))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn list_clients(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
) -> axum::response::Response {
    match services.list_clients(ctx.caller()) {
        Ok(clients) => {
            let items = clients.iter().map(dto::client_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn get_client(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_path::<ClientId>(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.get_client(ctx.caller(), id) {
        Ok(client) => (StatusCode::OK, Json(dto::client_to_json(&client))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn update_client(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<ClientPatch>,
) -> axum::response::Response {
    let id = match errors::parse_path::<ClientId>(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.update_client(ctx.caller(), id, &body) {
        Ok(client) => (StatusCode::OK, Json(dto::client_to_json(&client))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn delete_client(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_path::<ClientId>(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.delete_client(ctx.caller(), id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn count_by_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
) -> axum::response::Response {
    match services.client_status_counts(ctx.caller()) {
        Ok(counts) => (StatusCode::OK, Json(dto::status_counts_to_json(counts))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}
