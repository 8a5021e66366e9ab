use fieldintel_core::UserId;

/// Authenticated identity for a request.
///
/// Inserted by the auth middleware after token verification; role checks
/// happen later, per handler, against the current store state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AuthContext {
    user_id: UserId,
}

impl AuthContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
