// Auth API client
//
// Password-grant sign-in, sign-out, and session introspection against the
// provider's auth endpoints. Tokens are returned to the caller; the session
// manager in `garagem-core` owns their lifecycle.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// The authenticated user as reported by the auth API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// An established session: tokens plus the user they belong to.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    /// Seconds until the access token expires, if the provider reports it.
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

/// Auth error bodies vary by endpoint: password-grant failures use
/// `error_description`, most others use `msg` or `message`.
#[derive(Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl AuthErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description.or(self.msg).or(self.message)
    }
}

/// HTTP client for the provider's auth API.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
    anon_key: SecretString,
}

impl AuthClient {
    /// Create a new auth client from a transport config.
    pub fn new(
        base_url: Url,
        anon_key: SecretString,
        transport: &crate::transport::TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            anon_key,
        })
    }

    /// Create an auth client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, anon_key: SecretString) -> Self {
        Self {
            http,
            base_url,
            anon_key,
        }
    }

    /// Build an auth endpoint URL: `{base}/auth/v1/{path}`
    fn auth_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/auth/v1/{path}");
        Url::parse(&full).expect("invalid auth URL")
    }

    /// Authenticate with email and password.
    ///
    /// On success the provider returns the session tokens and user record.
    /// On failure the provider's human-readable message is carried in
    /// [`Error::Authentication`] for inline display on the login form.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, Error> {
        let mut url = self.auth_url("token");
        url.query_pairs_mut().append_pair("grant_type", "password");

        debug!("signing in at {}", url);

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let resp = self
            .http
            .post(url)
            .header("apikey", self.anon_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AuthErrorBody>(&body)
                .ok()
                .and_then(AuthErrorBody::into_message)
                .unwrap_or_else(|| format!("sign-in failed (HTTP {status})"));
            return Err(Error::Authentication { message });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let session: Session = serde_json::from_str(&body).map_err(|e| {
            let preview = crate::error::body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        debug!("sign-in successful");
        Ok(session)
    }

    /// Revoke the session behind `access_token`.
    pub async fn sign_out(&self, access_token: &SecretString) -> Result<(), Error> {
        let url = self.auth_url("logout");

        debug!("signing out at {}", url);

        let resp = self
            .http
            .post(url)
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(access_token.expose_secret())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() && status != reqwest::StatusCode::UNAUTHORIZED {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                message: format!(
                    "sign-out failed (HTTP {status}): {}",
                    crate::error::body_preview(&body)
                ),
                code: None,
                status: status.as_u16(),
            });
        }

        debug!("sign-out complete");
        Ok(())
    }

    /// Look up the user behind `access_token` — the initial session check.
    ///
    /// A rejected or expired token surfaces as [`Error::Authentication`].
    pub async fn get_user(&self, access_token: &SecretString) -> Result<AuthUser, Error> {
        let url = self.auth_url("user");

        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(access_token.expose_secret())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: "session expired or invalid token".into(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                message: format!("HTTP {status}: {}", crate::error::body_preview(&body)),
                code: None,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = crate::error::body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}
