// ── Session lifecycle ──
//
// Owns the auth session and publishes its state over a watch channel so
// consumers (pages, CLI) can gate admin surfaces on it. Storage of the
// token between runs is the caller's concern; the manager only takes an
// optionally-recovered token at startup.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use crate::error::CoreError;
use garagem_api::{AuthClient, AuthUser, RestClient, Session};

/// Observable authentication state.
///
/// `loading` starts `true` and flips to `false` exactly once, after the
/// initial token recovery attempt settles -- success or not. Consumers
/// must not treat `user: None` as "signed out" until then.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub loading: bool,
    pub user: Option<AuthUser>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Manages sign-in/sign-out and keeps the REST client's bearer token in
/// step with the current session.
pub struct SessionManager {
    auth: Arc<AuthClient>,
    rest: Arc<RestClient>,
    state: watch::Sender<AuthState>,
    session: Mutex<Option<Session>>,
}

impl SessionManager {
    pub fn new(auth: Arc<AuthClient>, rest: Arc<RestClient>) -> Self {
        let (state, _) = watch::channel(AuthState {
            loading: true,
            user: None,
        });
        Self {
            auth,
            rest,
            state,
            session: Mutex::new(None),
        }
    }

    /// Attempt to resume a session from a previously-stored access token.
    ///
    /// Fail-soft: an invalid or expired token leaves the manager signed
    /// out rather than erroring. Always flips `loading` to `false`.
    pub async fn init(&self, stored_token: Option<SecretString>) {
        if let Some(token) = stored_token {
            match self.auth.get_user(&token).await {
                Ok(user) => {
                    debug!(user_id = %user.id, "resumed stored session");
                    self.rest.set_bearer(token.clone());
                    *self.session.lock().await = Some(Session {
                        access_token: token.clone(),
                        refresh_token: SecretString::from(String::new()),
                        expires_in: None,
                        user: user.clone(),
                    });
                    self.state.send_replace(AuthState {
                        loading: false,
                        user: Some(user),
                    });
                    return;
                }
                Err(e) => {
                    warn!(error = %e, "stored session token rejected, starting signed out");
                }
            }
        }
        self.state.send_replace(AuthState {
            loading: false,
            user: None,
        });
    }

    /// Sign in with email and password. On success the REST client starts
    /// authenticating as the user and the new session is returned (the
    /// caller may persist its access token).
    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, CoreError> {
        let session = self.auth.sign_in_with_password(email, password).await?;

        self.rest.set_bearer(session.access_token.clone());
        *self.session.lock().await = Some(session.clone());
        self.state.send_replace(AuthState {
            loading: false,
            user: Some(session.user.clone()),
        });
        Ok(session)
    }

    /// Sign out. The local session is always dropped; a provider-side
    /// revocation failure is logged, not surfaced.
    pub async fn sign_out(&self) {
        let session = self.session.lock().await.take();
        if let Some(session) = session {
            if let Err(e) = self.auth.sign_out(&session.access_token).await {
                warn!(error = %e, "server-side sign-out failed, session dropped locally");
            }
        }
        self.rest.clear_bearer();
        self.state.send_replace(AuthState {
            loading: false,
            user: None,
        });
    }

    /// Subscribe to auth state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Snapshot of the current auth state.
    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }
}
