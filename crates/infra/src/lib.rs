//! Infrastructure layer: storage ports and their backends.
//!
//! The ports ([`UserStore`], [`InformationStore`]) are what the rest of the
//! system sees; this crate ships an in-memory backend for tests/dev and a
//! Postgres backend for production, plus the adapter that turns any user
//! store into a [`fieldintel_auth::RoleResolver`].

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryStore;
pub use postgres::{ensure_schema, PostgresInformationStore, PostgresUserStore};
pub use store::{
    InformationStore, OwnedInformation, StoreError, StoreRoleResolver, UserStore,
};
