//! Auth domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role attached to an identity when its session is established.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Admin,
}

/// Opaque identity handed out by the auth backend, plus the resolved role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Explicit session context passed to every repository and assembler call.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub identity: Identity,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.identity.id
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("identity", &self.identity)
            .finish()
    }
}

/// Email/password pair submitted on sign up and sign in.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A user record as reported by the auth backend.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    /// Value of the `role` claim in the user's app metadata, if any.
    pub role_claim: Option<String>,
}

/// Tokens issued by the auth backend for a signed-in user.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: AuthUser,
}

/// Decides the role of a user once, when its session is established.
///
/// A user is an admin when the backend marks it with an `admin` role claim,
/// or when its email is in the configured admin list (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct RolePolicy {
    admin_emails: Vec<String>,
}

impl RolePolicy {
    pub fn new<I, S>(admin_emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RolePolicy {
            admin_emails: admin_emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn resolve(&self, user: &AuthUser) -> Role {
        let claimed_admin = user
            .role_claim
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("admin"));
        let listed_admin = user.email.as_deref().is_some_and(|email| {
            let email = email.trim().to_lowercase();
            self.admin_emails.iter().any(|a| *a == email)
        });
        if claimed_admin || listed_admin {
            Role::Admin
        } else {
            Role::Student
        }
    }

    pub fn identity_for(&self, user: &AuthUser) -> Identity {
        Identity {
            id: user.id.clone(),
            email: user.email.clone(),
            role: self.resolve(user),
        }
    }

    pub fn session_for(&self, grant: AuthGrant) -> Session {
        let identity = self.identity_for(&grant.user);
        Session {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at: grant.expires_at,
            identity,
        }
    }
}
