//! Role resolution port.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use fieldintel_core::UserId;

use crate::roles::Role;

/// A user's authorization-relevant attributes, as resolved from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser {
    pub role: Role,
    pub email: String,
}

/// Resolution failure. Kept distinct from "no such user" so the guard can
/// log it before collapsing both into a denial.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("role lookup failed: {0}")]
    Store(String),
}

/// Looks up a user's role and email by identifier.
///
/// Implemented by the storage layer; the guard is its only caller.
#[async_trait]
pub trait RoleResolver: Send + Sync {
    /// Resolve `user_id`, or `Ok(None)` when no such user exists.
    async fn resolve(&self, user_id: UserId) -> Result<Option<ResolvedUser>, ResolveError>;
}

#[async_trait]
impl<R: RoleResolver + ?Sized> RoleResolver for Arc<R> {
    async fn resolve(&self, user_id: UserId) -> Result<Option<ResolvedUser>, ResolveError> {
        (**self).resolve(user_id).await
    }
}
