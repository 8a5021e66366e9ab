//! User accounts and the admin-side account commands.
//!
//! Accounts are mutated by admins only; the commands here validate their
//! input and keep the role/view coupling intact on every path.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use fieldintel_core::{DomainError, DomainResult, UserId};

use crate::roles::{Role, RoleCode};

// ─────────────────────────────────────────────────────────────────────────────
// Account
// ─────────────────────────────────────────────────────────────────────────────

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// Globally unique.
    pub email: String,
    /// Shared-secret credential, globally unique.
    pub access_code: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Admin command: create an account. Fields arrive as the request supplied
/// them; validation happens in [`User::create`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub email: Option<String>,
    pub access_code: Option<String>,
    /// Role code; data-entry when absent.
    pub role: Option<String>,
    pub view: Option<String>,
}

/// Admin command: update an account. Absent fields are left unchanged,
/// except the view, which is re-evaluated against the resulting role.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub access_code: Option<String>,
    pub role: Option<String>,
    pub view: Option<String>,
}

/// The effective changes computed from an [`UpdateUser`] command.
///
/// The role is always present: it is the resulting role, carrying the
/// re-validated view for restricted readers and clearing it for everyone
/// else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub access_code: Option<String>,
    pub role: Role,
}

impl User {
    /// Validate a creation command and assemble the account.
    pub fn create(cmd: NewUser, now: DateTime<Utc>) -> DomainResult<Self> {
        let email = cmd.email.filter(|v| !v.is_empty());
        let access_code = cmd.access_code.filter(|v| !v.is_empty());
        let (Some(email), Some(access_code)) = (email, access_code) else {
            return Err(DomainError::validation("Email and access code are required"));
        };

        let code = match cmd.role.as_deref() {
            Some(raw) => RoleCode::parse(raw)?,
            None => RoleCode::D,
        };
        let role = Role::from_parts(code, cmd.view.as_deref())?;

        Ok(Self {
            id: UserId::new(),
            email,
            access_code,
            role,
            created_at: now,
        })
    }

    /// Validate an update command against the current account state.
    ///
    /// The role/view coupling is enforced on the resulting role, not the
    /// prior one: an account that ends up restricted must carry a view in
    /// the command (it overwrites the stored one), and an account that ends
    /// up unrestricted must not.
    pub fn plan_update(&self, cmd: UpdateUser) -> DomainResult<UserUpdate> {
        if cmd.email.is_none()
            && cmd.access_code.is_none()
            && cmd.role.is_none()
            && cmd.view.is_none()
        {
            return Err(DomainError::validation("No fields to update"));
        }

        let code = match cmd.role.as_deref() {
            Some(raw) => RoleCode::parse(raw)?,
            None => self.role.code(),
        };
        let role = Role::from_parts(code, cmd.view.as_deref())?;

        Ok(UserUpdate {
            email: cmd.email,
            access_code: cmd.access_code,
            role,
        })
    }

    /// Apply a planned update in place (store backends mirror this).
    pub fn apply_update(&mut self, update: UserUpdate) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(access_code) = update.access_code {
            self.access_code = access_code;
        }
        self.role = update.role;
    }
}
