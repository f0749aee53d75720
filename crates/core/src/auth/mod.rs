//! Auth module - identity, session and role resolution.

mod auth_model;
mod auth_service;
mod auth_traits;


pub use auth_model::{AuthGrant, AuthUser, Credentials, Identity, Role, RolePolicy, Session};
pub use auth_service::{is_benign_sign_out_error, AuthService};
pub use auth_traits::{AuthProviderTrait, AuthServiceTrait};
