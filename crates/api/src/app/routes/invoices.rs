use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use factura_core::InvoiceId;
use factura_invoicing::{InvoiceDraft, InvoicePatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_invoice).get(list_invoices))
        .route(
            "/:id",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Json(body): Json<InvoiceDraft>,
) -> axum::response::Response {
    match services.create_invoice(ctx.caller(), body) {
        Ok(invoice) => (StatusCode::CREATED, Json(dto::invoice_to_json(&invoice))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
) -> axum::response::Response {
    match services.list_invoices(ctx.caller()) {
        Ok(invoices) => {
            let items = invoices
                .iter()
                .map(dto::invoice_to_json)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_path::<InvoiceId>(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.get_invoice(ctx.caller(), id) {
        Ok(invoice) => (StatusCode::OK, Json(dto::invoice_to_json(&invoice))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn update_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<InvoicePatch>,
) -> axum::response::Response {
    let id = match errors::parse_path::<InvoiceId>(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.update_invoice(ctx.caller(), id, &body) {
        Ok(invoice) => (StatusCode::OK, Json(dto::invoice_to_json(&invoice))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn delete_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_path::<InvoiceId>(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.delete_invoice(ctx.caller(), id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}
