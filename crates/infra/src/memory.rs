//! In-memory store. Backs the API in tests and when no database is
//! configured.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use fieldintel_auth::{User, UserUpdate};
use fieldintel_core::UserId;
use fieldintel_informations::{DatePredicate, Information, InformationFilter};

use crate::store::{InformationStore, OwnedInformation, StoreError, UserStore};

/// Process-local store holding both collections behind `RwLock`s.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    informations: RwLock<Vec<Information>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered(&self, filter: &InformationFilter) -> Result<Vec<Information>, StoreError> {
        let informations = self
            .informations
            .read()
            .map_err(|_| poisoned("informations"))?;
        let mut matching: Vec<Information> = informations
            .iter()
            .filter(|i| matches(filter, i))
            .cloned()
            .collect();
        matching.sort_by(newest_first);
        Ok(matching)
    }
}

fn poisoned(collection: &str) -> StoreError {
    StoreError::Unavailable(format!("{collection} lock poisoned"))
}

fn matches(filter: &InformationFilter, info: &Information) -> bool {
    if let Some(owner) = filter.owner {
        if info.user_id != owner {
            return false;
        }
    }
    if let Some(units) = &filter.business_units {
        if !units.iter().any(|u| u == &info.type_bu) {
            return false;
        }
    }
    if let Some(type_info) = &filter.type_info {
        if &info.type_info != type_info {
            return false;
        }
    }
    match filter.date {
        Some(DatePredicate::On(day)) => info.info_date == day,
        Some(DatePredicate::Between { from, to }) => info.info_date >= from && info.info_date <= to,
        None => true,
    }
}

// Newest first; the time-ordered id breaks ties within one timestamp so
// listings stay deterministic.
fn newest_first(a: &Information, b: &Information) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(|_| poisoned("users"))?;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        access_code: &str,
    ) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(|_| poisoned("users"))?;
        Ok(users
            .values()
            .find(|u| u.email == email && u.access_code == access_code)
            .cloned())
    }

    async fn email_taken(
        &self,
        email: &str,
        excluding: Option<UserId>,
    ) -> Result<bool, StoreError> {
        let users = self.users.read().map_err(|_| poisoned("users"))?;
        Ok(users
            .values()
            .any(|u| u.email == email && Some(u.id) != excluding))
    }

    async fn access_code_taken(
        &self,
        access_code: &str,
        excluding: Option<UserId>,
    ) -> Result<bool, StoreError> {
        let users = self.users.read().map_err(|_| poisoned("users"))?;
        Ok(users
            .values()
            .any(|u| u.access_code == access_code && Some(u.id) != excluding))
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(|_| poisoned("users"))?;
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, id: UserId, update: &UserUpdate) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(|_| poisoned("users"))?;
        if let Some(user) = users.get_mut(&id) {
            user.apply_update(update.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(|_| poisoned("users"))?;
        users.remove(&id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().map_err(|_| poisoned("users"))?;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });
        Ok(all)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Informations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl InformationStore for InMemoryStore {
    async fn insert(&self, info: &Information) -> Result<(), StoreError> {
        let mut informations = self
            .informations
            .write()
            .map_err(|_| poisoned("informations"))?;
        informations.push(info.clone());
        Ok(())
    }

    async fn list(&self, filter: &InformationFilter) -> Result<Vec<Information>, StoreError> {
        self.filtered(filter)
    }

    async fn list_with_owner(
        &self,
        filter: &InformationFilter,
    ) -> Result<Vec<OwnedInformation>, StoreError> {
        let matching = self.filtered(filter)?;
        let users = self.users.read().map_err(|_| poisoned("users"))?;
        Ok(matching
            .into_iter()
            .map(|info| {
                let owner_email = users.get(&info.user_id).map(|u| u.email.clone());
                OwnedInformation { info, owner_email }
            })
            .collect())
    }
}
