//! The role model: a closed set of three roles.
//!
//! The view scope travels inside [`Role::Restricted`], so "view is set iff
//! role is R" holds by construction rather than by paired nullable fields.

use serde::{Deserialize, Serialize};

use fieldintel_core::{DomainError, DomainResult};

use crate::view::ViewScope;

/// Wire and store code for a role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleCode {
    /// Admin: manages accounts, reads everything.
    A,
    /// Data-entry: records informations and reads their own.
    D,
    /// Restricted reader: reads the business units in their view.
    R,
}

impl RoleCode {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        match raw {
            "A" => Ok(Self::A),
            "D" => Ok(Self::D),
            "R" => Ok(Self::R),
            _ => Err(DomainError::validation("Invalid role")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::D => "D",
            Self::R => "R",
        }
    }
}

impl core::fmt::Display for RoleCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    DataEntry,
    Restricted(ViewScope),
}

impl Role {
    /// Assemble a role from its stored parts, enforcing the role/view
    /// coupling: restricted readers must carry a view, nobody else may.
    ///
    /// An empty view string counts as absent.
    pub fn from_parts(code: RoleCode, view: Option<&str>) -> DomainResult<Self> {
        match code {
            RoleCode::R => {
                let scope = view
                    .and_then(ViewScope::parse)
                    .ok_or_else(|| DomainError::validation("View is required for role R"))?;
                Ok(Role::Restricted(scope))
            }
            RoleCode::A | RoleCode::D => {
                if view.is_some() {
                    return Err(DomainError::validation("View is only allowed for role R"));
                }
                Ok(match code {
                    RoleCode::A => Role::Admin,
                    _ => Role::DataEntry,
                })
            }
        }
    }

    pub fn code(&self) -> RoleCode {
        match self {
            Role::Admin => RoleCode::A,
            Role::DataEntry => RoleCode::D,
            Role::Restricted(_) => RoleCode::R,
        }
    }

    /// The raw view string, present only for restricted readers.
    pub fn view(&self) -> Option<&str> {
        match self {
            Role::Restricted(scope) => Some(scope.as_str()),
            _ => None,
        }
    }

    /// The view scope, present only for restricted readers.
    pub fn scope(&self) -> Option<&ViewScope> {
        match self {
            Role::Restricted(scope) => Some(scope),
            _ => None,
        }
    }
}
