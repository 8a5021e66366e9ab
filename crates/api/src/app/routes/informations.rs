use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;

use fieldintel_auth::{authorize, RoleCode};
use fieldintel_informations::{Information, InformationFilter, ListParams, NewInformation};

use crate::app::{errors, services::AppServices};
use crate::context::AuthContext;

// ─────────────────────────────────────────────────────────────────────────────
// POST /informations/add
// ─────────────────────────────────────────────────────────────────────────────

/// Record a new information. Any authenticated user may write.
pub async fn add_information(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<NewInformation>,
) -> axum::response::Response {
    let info = match Information::create(auth.user_id(), payload, Utc::now()) {
        Ok(info) => info,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.informations.insert(&info).await {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::CREATED,
        Json(json!({ "message": "Information saved", "data": info })),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /informations/my-informations
// ─────────────────────────────────────────────────────────────────────────────

/// List the caller's own records, newest first. Data-entry and admin only.
pub async fn my_informations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
) -> axum::response::Response {
    let authz = match authorize(
        &services.resolver,
        auth.user_id(),
        &[RoleCode::D, RoleCode::A],
    )
    .await
    {
        Ok(ctx) => ctx,
        Err(e) => return errors::authz_error_to_response(e),
    };

    let filter = InformationFilter::owned_by(authz.user_id);
    match services.informations.list(&filter).await {
        Ok(data) => {
            (StatusCode::OK, Json(json!({ "count": data.len(), "data": data }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /informations/all-informations
// ─────────────────────────────────────────────────────────────────────────────

/// Admin-wide listing with optional filters, each row joined with the
/// owner's email.
pub async fn all_informations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListParams>,
) -> axum::response::Response {
    if let Err(e) = authorize(&services.resolver, auth.user_id(), &[RoleCode::A]).await {
        return errors::authz_error_to_response(e);
    }

    let filter = match InformationFilter::for_admin(&params) {
        Ok(filter) => filter,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.informations.list_with_owner(&filter).await {
        Ok(data) => {
            (StatusCode::OK, Json(json!({ "count": data.len(), "data": data }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /informations/my-view
// ─────────────────────────────────────────────────────────────────────────────

/// Listing scoped to the restricted reader's business units.
pub async fn my_view(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListParams>,
) -> axum::response::Response {
    let authz = match authorize(&services.resolver, auth.user_id(), &[RoleCode::R]).await {
        Ok(ctx) => ctx,
        Err(e) => return errors::authz_error_to_response(e),
    };

    // The guard only admits role R, which always carries a scope.
    let Some(scope) = authz.role.scope() else {
        return errors::authz_error_to_response(fieldintel_auth::AuthzError::AccessDenied);
    };

    let filter = match InformationFilter::for_view(scope, &params) {
        Ok(filter) => filter,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.informations.list(&filter).await {
        Ok(data) => {
            (StatusCode::OK, Json(json!({ "count": data.len(), "data": data }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GET /informations/profile
// ─────────────────────────────────────────────────────────────────────────────

/// The caller's own profile. The display name is the email's local part.
pub async fn profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
) -> axum::response::Response {
    let user = match services.users.find_by_id(auth.user_id()).await {
        Ok(Some(user)) => user,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "User not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    let name = user.email.split('@').next().unwrap_or_default();

    (
        StatusCode::OK,
        Json(json!({
            "user_id": user.id,
            "email": user.email,
            "role": user.role.code(),
            "view": user.role.view(),
            "name": name,
        })),
    )
        .into_response()
}
