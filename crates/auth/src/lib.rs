//! `fieldintel-auth` — authentication/authorization boundary.
//!
//! Kept free of HTTP and storage dependencies: the token codec, the role
//! model, and the access guard live here; the HTTP layer maps their errors
//! to responses and the store layer implements [`RoleResolver`].

pub mod guard;
pub mod resolver;
pub mod roles;
pub mod token;
pub mod user;
pub mod view;

pub use guard::{authorize, AuthzContext, AuthzError};
pub use resolver::{ResolveError, ResolvedUser, RoleResolver};
pub use roles::{Role, RoleCode};
pub use token::{Claims, TokenCodec, TokenError, TOKEN_TTL_DAYS};
pub use user::{NewUser, UpdateUser, User, UserUpdate};
pub use view::ViewScope;
