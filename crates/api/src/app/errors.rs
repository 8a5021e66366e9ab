use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use fieldintel_auth::{AuthzError, TokenError};
use fieldintel_core::DomainError;
use fieldintel_infra::StoreError;

/// Single-field JSON error body used by every endpoint.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}

pub fn token_error_to_response(err: TokenError) -> axum::response::Response {
    json_error(StatusCode::UNAUTHORIZED, err.to_string())
}

pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, err.to_string())
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "Invalid user ID"),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "User not found"),
        DomainError::SelfDeleteForbidden => {
            json_error(StatusCode::BAD_REQUEST, "Cannot delete your own account")
        }
    }
}

/// Storage failures surface as an opaque 500; the cause goes to the log.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "store failure");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Store unavailable")
}
