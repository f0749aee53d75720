//! Wire models for the auth endpoints.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use budgetpal_core::auth::{AuthGrant, AuthUser, Credentials};

#[derive(Debug, Serialize)]
pub struct PasswordGrantRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for PasswordGrantRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        PasswordGrantRequest {
            email: credentials.email.trim(),
            password: &credentials.password,
        }
    }
}

/// Server-controlled user metadata; users cannot edit it themselves.
#[derive(Debug, Default, Deserialize)]
pub struct ApiAppMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub app_metadata: ApiAppMetadata,
}

impl From<ApiUser> for AuthUser {
    fn from(user: ApiUser) -> Self {
        AuthUser {
            id: user.id,
            email: user.email,
            role_claim: user.app_metadata.role,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: ApiUser,
}

impl ApiSession {
    pub fn into_grant(self, now: DateTime<Utc>) -> AuthGrant {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)));
        AuthGrant {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into(),
        }
    }
}

/// Sign-up answers with a session when the account is usable right away,
/// or with just the user when email confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiSignUpResponse {
    Session(ApiSession),
    PendingConfirmation(ApiUser),
}
