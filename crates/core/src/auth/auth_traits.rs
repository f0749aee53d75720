use crate::auth::auth_model::{AuthGrant, AuthUser, Credentials, Session};
use crate::errors::Result;
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for the external authentication backend.
#[async_trait]
pub trait AuthProviderTrait: Send + Sync {
    /// Fails with `Error::Configuration` when credentials are absent or placeholders.
    fn check_configuration(&self) -> Result<()>;
    /// Returns `None` when the backend requires email confirmation before issuing tokens.
    async fn sign_up(&self, credentials: &Credentials) -> Result<Option<AuthGrant>>;
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthGrant>;
    async fn sign_out(&self, access_token: &str) -> Result<()>;
    async fn get_user(&self, access_token: &str) -> Result<AuthUser>;
}

/// Trait for session service operations
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn sign_up(&self, credentials: Credentials) -> Result<Option<Session>>;
    async fn sign_in(&self, credentials: Credentials) -> Result<Session>;
    async fn sign_out(&self, session: &Session) -> Result<()>;
    async fn resolve_session(&self, access_token: &str) -> Result<Session>;
    async fn delete_account(&self, session: &Session) -> Result<()>;
    fn current_session(&self) -> Option<Session>;
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}
