use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldintel_auth::User;
use fieldintel_core::UserId;

// -------------------------
// Request DTOs
// -------------------------

/// Credentials presented to `POST /auth/login`.
///
/// Both fields are optional at the wire level so a partial body produces
/// the domain's own validation message rather than a deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub access_code: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

/// Account shape returned by the admin user-management endpoints.
///
/// Includes the plain-text access code so admins can hand it out; no other
/// endpoint returns it.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: UserId,
    pub email: String,
    pub access_code: String,
    pub role: String,
    pub view: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            access_code: user.access_code.clone(),
            role: user.role.code().as_str().to_string(),
            view: user.role.view().map(str::to_string),
            created_at: user.created_at,
        }
    }
}
