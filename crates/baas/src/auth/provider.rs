use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use budgetpal_core::auth::{AuthGrant, AuthProviderTrait, AuthUser, Credentials};
use budgetpal_core::errors::Result;

use super::model::{ApiSession, ApiSignUpResponse, ApiUser, PasswordGrantRequest};
use crate::client::BaasClient;

/// Email/password authentication against the backend's auth endpoints.
pub struct BaasAuthProvider {
    client: Arc<BaasClient>,
}

impl BaasAuthProvider {
    pub fn new(client: Arc<BaasClient>) -> Self {
        BaasAuthProvider { client }
    }
}

#[async_trait]
impl AuthProviderTrait for BaasAuthProvider {
    fn check_configuration(&self) -> Result<()> {
        self.client.ensure_configured()
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Option<AuthGrant>> {
        let response: ApiSignUpResponse = self
            .client
            .auth_post(
                "sign up",
                "signup",
                None,
                &PasswordGrantRequest::from(credentials),
            )
            .await?;
        match response {
            ApiSignUpResponse::Session(session) => Ok(Some(session.into_grant(Utc::now()))),
            ApiSignUpResponse::PendingConfirmation(user) => {
                debug!("Sign up for {} awaits email confirmation", user.id);
                Ok(None)
            }
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthGrant> {
        let session: ApiSession = self
            .client
            .auth_post(
                "sign in",
                "token?grant_type=password",
                None,
                &PasswordGrantRequest::from(credentials),
            )
            .await?;
        Ok(session.into_grant(Utc::now()))
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        self.client
            .auth_post_no_content("sign out", "logout", access_token)
            .await
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser> {
        let user: ApiUser = self
            .client
            .auth_get("load session", "user", access_token)
            .await?;
        Ok(user.into())
    }
}
