use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use factura_core::Error;

/// Map a domain failure onto its HTTP status and JSON body.
///
/// One variant, one status: handlers never pick codes themselves. Store
/// failures keep their detail in the log; the response body stays generic.
pub fn error_to_response(err: &Error) -> axum::response::Response {
    match err {
        Error::Unauthenticated(msg) => {
            json_error(StatusCode::UNAUTHORIZED, "unauthenticated", msg.clone())
        }
        Error::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, "forbidden", msg.clone()),
        Error::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg.clone()),
        Error::InvalidArgument(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_argument", msg.clone())
        }
        Error::StoreFailure(msg) => {
            tracing::error!(error = %msg, "store failure while serving a request");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_failure",
                "the storage backend failed to serve the request",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Parse a path segment into a typed id, mapping failure onto the taxonomy's
/// 400 response.
pub fn parse_path<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: core::str::FromStr<Err = Error>,
{
    raw.parse().map_err(|e: Error| error_to_response(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_distinct_status() {
        let cases = [
            (Error::unauthenticated("x"), StatusCode::UNAUTHORIZED),
            (Error::forbidden("x"), StatusCode::FORBIDDEN),
            (Error::not_found("x"), StatusCode::NOT_FOUND),
            (Error::invalid_argument("x"), StatusCode::BAD_REQUEST),
            (Error::store("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let response = error_to_response(&err);
            assert_eq!(response.status(), expected, "{err}");
        }
    }

    #[tokio::test]
    async fn store_failure_body_does_not_leak_the_backend_message() {
        let response = error_to_response(&Error::store("connection string postgres://secret"));
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["error"], "store_failure");
        assert!(!parsed["message"].as_str().unwrap().contains("postgres"));
    }
}
