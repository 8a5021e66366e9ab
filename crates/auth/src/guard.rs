//! Access guard: role-set authorization for protected operations.

use thiserror::Error;

use fieldintel_core::UserId;

use crate::resolver::{ResolvedUser, RoleResolver};
use crate::roles::{Role, RoleCode};

/// Authorization denial. Display strings are the user-facing messages; both
/// variants surface as a 403 at the HTTP boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// The token's user could not be resolved. This also covers store
    /// failures during resolution: both deny, fail-closed.
    #[error("User not found")]
    UserNotFound,

    /// The user's role is not in the operation's allowed set.
    #[error("Access denied")]
    AccessDenied,
}

/// Context handed to a handler once its caller is authorized.
#[derive(Debug, Clone)]
pub struct AuthzContext {
    pub user_id: UserId,
    pub role: Role,
    pub email: String,
}

/// Authorize `user_id` for an operation that permits the `allowed` roles.
///
/// A store failure during resolution denies exactly like an unknown user;
/// the underlying error is logged here, not surfaced to the caller.
pub async fn authorize<R: RoleResolver>(
    resolver: &R,
    user_id: UserId,
    allowed: &[RoleCode],
) -> Result<AuthzContext, AuthzError> {
    let resolved = match resolver.resolve(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(AuthzError::UserNotFound),
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "role resolution failed; denying");
            return Err(AuthzError::UserNotFound);
        }
    };

    if !allowed.contains(&resolved.role.code()) {
        return Err(AuthzError::AccessDenied);
    }

    let ResolvedUser { role, email } = resolved;
    Ok(AuthzContext {
        user_id,
        role,
        email,
    })
}
