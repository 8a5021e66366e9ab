//! `fieldintel-core` — shared domain building blocks.
//!
//! Pure domain primitives only: typed identifiers and the error model. No
//! infrastructure concerns live here.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{InformationId, UserId};
