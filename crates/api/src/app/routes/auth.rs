use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

use crate::app::{dto::LoginRequest, errors, services::AppServices};

// ─────────────────────────────────────────────────────────────────────────────
// POST /auth/login
// ─────────────────────────────────────────────────────────────────────────────

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(req): Json<LoginRequest>,
) -> axum::response::Response {
    let email = req.email.filter(|v| !v.is_empty());
    let access_code = req.access_code.filter(|v| !v.is_empty());
    let (Some(email), Some(access_code)) = (email, access_code) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "Email and access code required");
    };

    let user = match services.users.find_by_credentials(&email, &access_code).await {
        Ok(Some(user)) => user,
        Ok(None) => return errors::json_error(StatusCode::UNAUTHORIZED, "Invalid credentials"),
        Err(e) => return errors::store_error_to_response(e),
    };

    let token = match services.tokens.encode(user.id, Utc::now()) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "token encoding failed");
            return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "Token encoding failed");
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "message": "Login successful",
            "token": token,
            "user_id": user.id,
            "role": user.role.code(),
        })),
    )
        .into_response()
}
