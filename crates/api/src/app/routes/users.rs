use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;

use fieldintel_auth::{authorize, NewUser, RoleCode, UpdateUser, User};
use fieldintel_core::{DomainError, UserId};

use crate::app::{dto::UserDto, errors, services::AppServices};
use crate::context::AuthContext;

// Every endpoint here is admin-only.

// ─────────────────────────────────────────────────────────────────────────────
// GET /informations/users
// ─────────────────────────────────────────────────────────────────────────────

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
) -> axum::response::Response {
    if let Err(e) = authorize(&services.resolver, auth.user_id(), &[RoleCode::A]).await {
        return errors::authz_error_to_response(e);
    }

    match services.users.list().await {
        Ok(users) => {
            let data: Vec<UserDto> = users.iter().map(UserDto::from).collect();
            (StatusCode::OK, Json(json!({ "count": data.len(), "data": data }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// POST /informations/users
// ─────────────────────────────────────────────────────────────────────────────

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<NewUser>,
) -> axum::response::Response {
    if let Err(e) = authorize(&services.resolver, auth.user_id(), &[RoleCode::A]).await {
        return errors::authz_error_to_response(e);
    }

    let user = match User::create(payload, Utc::now()) {
        Ok(user) => user,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.users.email_taken(&user.email, None).await {
        Ok(true) => return errors::json_error(StatusCode::BAD_REQUEST, "Email already exists"),
        Ok(false) => {}
        Err(e) => return errors::store_error_to_response(e),
    }
    match services.users.access_code_taken(&user.access_code, None).await {
        Ok(true) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "Access code already exists")
        }
        Ok(false) => {}
        Err(e) => return errors::store_error_to_response(e),
    }

    if let Err(e) = services.users.insert(&user).await {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "data": UserDto::from(&user),
        })),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// PUT /informations/users/:id
// ─────────────────────────────────────────────────────────────────────────────

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUser>,
) -> axum::response::Response {
    if let Err(e) = authorize(&services.resolver, auth.user_id(), &[RoleCode::A]).await {
        return errors::authz_error_to_response(e);
    }

    let Ok(target) = id.parse::<UserId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "Invalid user ID");
    };

    let user = match services.users.find_by_id(target).await {
        Ok(Some(user)) => user,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "User not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    let update = match user.plan_update(payload) {
        Ok(update) => update,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Some(email) = &update.email {
        match services.users.email_taken(email, Some(target)).await {
            Ok(true) => return errors::json_error(StatusCode::BAD_REQUEST, "Email already exists"),
            Ok(false) => {}
            Err(e) => return errors::store_error_to_response(e),
        }
    }
    if let Some(access_code) = &update.access_code {
        match services.users.access_code_taken(access_code, Some(target)).await {
            Ok(true) => {
                return errors::json_error(StatusCode::BAD_REQUEST, "Access code already exists")
            }
            Ok(false) => {}
            Err(e) => return errors::store_error_to_response(e),
        }
    }

    if let Err(e) = services.users.update(target, &update).await {
        return errors::store_error_to_response(e);
    }

    (StatusCode::OK, Json(json!({ "message": "User updated successfully" }))).into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// DELETE /informations/users/:id
// ─────────────────────────────────────────────────────────────────────────────

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authorize(&services.resolver, auth.user_id(), &[RoleCode::A]).await {
        return errors::authz_error_to_response(e);
    }

    let Ok(target) = id.parse::<UserId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "Invalid user ID");
    };

    if target == auth.user_id() {
        return errors::domain_error_to_response(DomainError::SelfDeleteForbidden);
    }

    if let Err(e) = services.users.delete(target).await {
        return errors::store_error_to_response(e);
    }

    (StatusCode::OK, Json(json!({ "message": "User deleted successfully" }))).into_response()
}
