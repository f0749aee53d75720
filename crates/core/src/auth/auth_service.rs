use crate::auth::auth_model::{Credentials, RolePolicy, Session};
use crate::auth::auth_traits::{AuthProviderTrait, AuthServiceTrait};
use crate::constants::{ACCOUNT_DELETION_UNAVAILABLE, MIN_PASSWORD_LENGTH};
use crate::errors::{Error, RemoteError, Result, ValidationError};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::watch;

/// Error fragments the auth backend returns when signing out a session that
/// has already expired or been revoked.
const BENIGN_SIGN_OUT_MARKERS: [&str; 3] = [
    "Auth session missing!",
    "Session from session_id claim in JWT does not exist",
    "session_not_found",
];

/// Whether a sign-out failure only means the session was already gone.
pub fn is_benign_sign_out_error(err: &Error) -> bool {
    match err {
        Error::Forbidden(_) => true,
        Error::Remote(RemoteError::Rejected { status: 403, .. }) => true,
        Error::Configuration(_) => false,
        other => {
            let message = other.to_string();
            BENIGN_SIGN_OUT_MARKERS
                .iter()
                .any(|marker| message.contains(marker))
        }
    }
}

fn validate_credentials(credentials: &Credentials, signing_up: bool) -> Result<()> {
    let email = credentials.email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingField("email".to_string()).into());
    }
    if !email.contains('@') {
        return Err(
            ValidationError::InvalidInput(format!("'{}' is not a valid email", email)).into(),
        );
    }
    if credentials.password.is_empty() {
        return Err(ValidationError::MissingField("password".to_string()).into());
    }
    if signing_up && credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ))
        .into());
    }
    Ok(())
}

/// Session operations against the auth backend.
///
/// `new` builds a stateless service for multi-user hosts (the HTTP server
/// resolves every request from its bearer token). `with_session_tracking`
/// builds one for a single-user front end: sign-in and sign-up publish the
/// session on a `watch` channel and sign-out clears it.
pub struct AuthService {
    provider: Arc<dyn AuthProviderTrait>,
    role_policy: RolePolicy,
    session_tx: watch::Sender<Option<Session>>,
    track_sessions: bool,
}

impl AuthService {
    pub fn new(provider: Arc<dyn AuthProviderTrait>, role_policy: RolePolicy) -> Self {
        let (session_tx, _) = watch::channel(None);
        AuthService {
            provider,
            role_policy,
            session_tx,
            track_sessions: false,
        }
    }

    pub fn with_session_tracking(
        provider: Arc<dyn AuthProviderTrait>,
        role_policy: RolePolicy,
    ) -> Self {
        AuthService {
            track_sessions: true,
            ..Self::new(provider, role_policy)
        }
    }

    fn publish(&self, session: &Session) {
        if self.track_sessions {
            self.session_tx.send_replace(Some(session.clone()));
        }
    }

    /// Clears the tracked session only when it is the one being signed out.
    fn forget(&self, signed_out: &Session) {
        self.session_tx.send_if_modified(|current| {
            let matches = current
                .as_ref()
                .is_some_and(|s| s.access_token == signed_out.access_token);
            if matches {
                *current = None;
            }
            matches
        });
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn sign_up(&self, credentials: Credentials) -> Result<Option<Session>> {
        self.provider.check_configuration()?;
        validate_credentials(&credentials, true)?;

        let grant = self.provider.sign_up(&credentials).await?;
        match grant {
            Some(grant) => {
                let session = self.role_policy.session_for(grant);
                info!("Signed up and signed in user {}", session.user_id());
                self.publish(&session);
                Ok(Some(session))
            }
            None => {
                info!("Signed up {}, awaiting email confirmation", credentials.email.trim());
                Ok(None)
            }
        }
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<Session> {
        self.provider.check_configuration()?;
        validate_credentials(&credentials, false)?;

        let grant = self.provider.sign_in(&credentials).await?;
        let session = self.role_policy.session_for(grant);
        debug!(
            "Signed in user {} with role {:?}",
            session.user_id(),
            session.identity.role
        );
        self.publish(&session);
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        self.provider.check_configuration()?;

        let outcome = self.provider.sign_out(&session.access_token).await;
        // A matching tracked session is dropped whatever the backend says.
        self.forget(session);
        match outcome {
            Ok(()) => Ok(()),
            Err(err) if is_benign_sign_out_error(&err) => {
                debug!("Ignoring sign-out error for expired session: {}", err);
                Ok(())
            }
            Err(err) => {
                warn!("Sign out failed for user {}: {}", session.user_id(), err);
                Err(err)
            }
        }
    }

    async fn resolve_session(&self, access_token: &str) -> Result<Session> {
        self.provider.check_configuration()?;
        let token = access_token.trim();
        if token.is_empty() {
            return Err(Error::Unauthorized("Missing access token".to_string()));
        }

        let user = self.provider.get_user(token).await?;
        Ok(Session {
            access_token: token.to_string(),
            refresh_token: None,
            expires_at: None,
            identity: self.role_policy.identity_for(&user),
        })
    }

    async fn delete_account(&self, session: &Session) -> Result<()> {
        info!("Account deletion requested by {}", session.user_id());
        Err(Error::NotImplemented(ACCOUNT_DELETION_UNAVAILABLE.to_string()))
    }

    fn current_session(&self) -> Option<Session> {
        self.session_tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session_tx.subscribe()
    }
}
