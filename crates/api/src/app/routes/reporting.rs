//! Financial summary endpoints.
//!
//! Period segments are parsed by hand so a malformed year or month produces
//! the taxonomy's 400 body instead of a bare framework rejection.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use factura_core::Error;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/yearly/:year", get(yearly))
        .route("/monthly/:year/:month", get(monthly))
        .route("/breakdown/:year", get(breakdown))
}

pub async fn yearly(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(year): Path<String>,
) -> axum::response::Response {
    let year = match parse_year(&year) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.reporting.yearly(ctx.caller(), year) {
        Ok(summary) => (StatusCode::OK, Json(dto::yearly_to_json(&summary))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn monthly(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path((year, month)): Path<(String, String)>,
) -> axum::response::Response {
    let year = match parse_year(&year) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let month = match parse_month(&month) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.reporting.monthly(ctx.caller(), year, month) {
        Ok(summary) => (StatusCode::OK, Json(dto::monthly_to_json(&summary))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}

pub async fn breakdown(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(year): Path<String>,
) -> axum::response::Response {
    let year = match parse_year(&year) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.reporting.breakdown(ctx.caller(), year) {
        Ok(summary) => (StatusCode::OK, Json(dto::breakdown_to_json(&summary))).into_response(),
        Err(e) => errors::error_to_response(&e),
    }
}

fn parse_year(raw: &str) -> Result<i32, axum::response::Response> {
    raw.parse::<i32>().map_err(|_| {
        errors::error_to_response(&Error::invalid_argument(format!(
            "year '{raw}' is not a number"
        )))
    })
}

fn parse_month(raw: &str) -> Result<u32, axum::response::Response> {
    raw.parse::<u32>().map_err(|_| {
        errors::error_to_response(&Error::invalid_argument(format!(
            "month '{raw}' is not a number"
        )))
    })
}
