//! Storage ports for users and information records.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use fieldintel_auth::{ResolveError, ResolvedUser, RoleResolver, User, UserUpdate};
use fieldintel_core::UserId;
use fieldintel_informations::{Information, InformationFilter};

/// Storage failure. Opaque to callers: never retried, never recovered.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or rejected the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be mapped back into a domain value.
    #[error("stored row could not be decoded: {0}")]
    Decode(String),
}

/// User account persistence port.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Credential lookup for login: the email/access-code pair must match a
    /// single account.
    async fn find_by_credentials(
        &self,
        email: &str,
        access_code: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Whether an account other than `excluding` already holds `email`.
    async fn email_taken(&self, email: &str, excluding: Option<UserId>)
        -> Result<bool, StoreError>;

    /// Whether an account other than `excluding` already holds `access_code`.
    async fn access_code_taken(
        &self,
        access_code: &str,
        excluding: Option<UserId>,
    ) -> Result<bool, StoreError>;

    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    /// Apply a planned update. A missing target is a no-op (the caller has
    /// already fetched the account to plan the update).
    async fn update(&self, id: UserId, update: &UserUpdate) -> Result<(), StoreError>;

    /// Delete an account. Deleting an absent account is a no-op.
    async fn delete(&self, id: UserId) -> Result<(), StoreError>;

    /// All accounts, newest first.
    async fn list(&self) -> Result<Vec<User>, StoreError>;
}

/// Information record persistence port. Records are insert-only.
#[async_trait]
pub trait InformationStore: Send + Sync {
    async fn insert(&self, info: &Information) -> Result<(), StoreError>;

    /// Matching records, newest first.
    async fn list(&self, filter: &InformationFilter) -> Result<Vec<Information>, StoreError>;

    /// Matching records joined with their owner's email, newest first.
    async fn list_with_owner(
        &self,
        filter: &InformationFilter,
    ) -> Result<Vec<OwnedInformation>, StoreError>;
}

/// An information record together with its owner's email (admin listings).
/// The email is `None` when the owning account has since been deleted.
#[derive(Debug, Clone, Serialize)]
pub struct OwnedInformation {
    #[serde(flatten)]
    pub info: Information,
    pub owner_email: Option<String>,
}

#[async_trait]
impl<S: UserStore + ?Sized> UserStore for Arc<S> {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        access_code: &str,
    ) -> Result<Option<User>, StoreError> {
        (**self).find_by_credentials(email, access_code).await
    }

    async fn email_taken(
        &self,
        email: &str,
        excluding: Option<UserId>,
    ) -> Result<bool, StoreError> {
        (**self).email_taken(email, excluding).await
    }

    async fn access_code_taken(
        &self,
        access_code: &str,
        excluding: Option<UserId>,
    ) -> Result<bool, StoreError> {
        (**self).access_code_taken(access_code, excluding).await
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        (**self).insert(user).await
    }

    async fn update(&self, id: UserId, update: &UserUpdate) -> Result<(), StoreError> {
        (**self).update(id, update).await
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        (**self).list().await
    }
}

#[async_trait]
impl<S: InformationStore + ?Sized> InformationStore for Arc<S> {
    async fn insert(&self, info: &Information) -> Result<(), StoreError> {
        (**self).insert(info).await
    }

    async fn list(&self, filter: &InformationFilter) -> Result<Vec<Information>, StoreError> {
        (**self).list(filter).await
    }

    async fn list_with_owner(
        &self,
        filter: &InformationFilter,
    ) -> Result<Vec<OwnedInformation>, StoreError> {
        (**self).list_with_owner(filter).await
    }
}

/// Adapter exposing any [`UserStore`] as a [`RoleResolver`].
pub struct StoreRoleResolver<S> {
    store: S,
}

impl<S> StoreRoleResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: UserStore> RoleResolver for StoreRoleResolver<S> {
    async fn resolve(&self, user_id: UserId) -> Result<Option<ResolvedUser>, ResolveError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await
            .map_err(|e| ResolveError::Store(e.to_string()))?;

        Ok(user.map(|u| ResolvedUser {
            role: u.role,
            email: u.email,
        }))
    }
}
