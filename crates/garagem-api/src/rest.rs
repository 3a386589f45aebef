// REST table API client
//
// Wraps `reqwest::Client` with provider-specific URL construction, auth
// headers, and error-body decoding. The client is table-agnostic: callers
// pass the table name and serde types; all row mapping lives upstream in
// `garagem-core`.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Sort direction for `select` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// The provider's error body shape: `{"message": "...", "code": "..."}`.
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    code: Option<String>,
}

/// HTTP client for the provider's REST table API.
///
/// Every request carries the project `apikey` header plus a bearer token:
/// the signed-in session's access token when one is installed, otherwise
/// the anonymous key (row-level security decides what each may touch).
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    anon_key: SecretString,
    /// Access token of the current session. Installed by the session
    /// manager after sign-in, cleared on sign-out.
    bearer: RwLock<Option<SecretString>>,
}

impl RestClient {
    /// Create a new REST client from a transport config.
    ///
    /// `base_url` is the project root (e.g. `https://xyz.supabase.co`).
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
            bearer: RwLock::new(None),
        })
    }

    /// Create a REST client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, anon_key: SecretString) -> Self {
        Self {
            http,
            base_url,
            anon_key,
            bearer: RwLock::new(None),
        }
    }

    /// The project base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Session token management ─────────────────────────────────────

    /// Install a session access token. Subsequent requests authenticate
    /// as that user instead of the anonymous role.
    pub fn set_bearer(&self, token: SecretString) {
        *self.bearer.write().expect("bearer lock poisoned") = Some(token);
    }

    /// Drop the session token, reverting to anonymous access.
    pub fn clear_bearer(&self) {
        *self.bearer.write().expect("bearer lock poisoned") = None;
    }

    /// Apply the auth headers to a request builder.
    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.bearer.read().expect("bearer lock poisoned");
        let token = guard
            .as_ref()
            .map_or_else(|| self.anon_key.expose_secret(), ExposeSecret::expose_secret);
        builder
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(token)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a table endpoint URL: `{base}/rest/v1/{table}`
    fn table_url(&self, table: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/rest/v1/{table}");
        Url::parse(&full).expect("invalid table URL")
    }

    // ── Table operations ─────────────────────────────────────────────

    /// Fetch all rows of a table, ordered by one column.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        order_by: &str,
        direction: Direction,
    ) -> Result<Vec<T>, Error> {
        let mut url = self.table_url(table);
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", &format!("{order_by}.{}", direction.as_str()));

        debug!("GET {}", url);
        let resp = self
            .apply_auth(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_body(resp).await
    }

    /// Insert one row and return the created row (server-assigned columns
    /// included). The provider answers with a one-element array under
    /// `Prefer: return=representation`; an empty array is an API error.
    pub async fn insert<T: DeserializeOwned>(
        &self,
        table: &str,
        row: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.table_url(table);

        debug!("POST {}", url);
        let resp = self
            .apply_auth(self.http.post(url))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(Error::Transport)?;

        let mut rows: Vec<T> = self.parse_body(resp).await?;
        if rows.is_empty() {
            return Err(Error::Api {
                message: format!("insert into '{table}' returned no rows"),
                code: None,
                status: 200,
            });
        }
        Ok(rows.swap_remove(0))
    }

    /// Patch one row by id. Only the fields present in `patch` are sent;
    /// omitted columns are left untouched server-side.
    pub async fn update(
        &self,
        table: &str,
        id: &str,
        patch: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        let mut url = self.table_url(table);
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        debug!("PATCH {}", url);
        let resp = self
            .apply_auth(self.http.patch(url))
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.check_status(resp).await
    }

    /// Delete one row by id. Hard delete.
    pub async fn delete(&self, table: &str, id: &str) -> Result<(), Error> {
        let mut url = self.table_url(table);
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        debug!("DELETE {}", url);
        let resp = self
            .apply_auth(self.http.delete(url))
            .send()
            .await
            .map_err(Error::Transport)?;

        self.check_status(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Check the status of a body-less mutation response.
    async fn check_status(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_from_body(status, resp).await)
    }

    /// Parse a JSON body, mapping failures with a body preview attached.
    async fn parse_body<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::error_from_body(status, resp).await);
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

    /// Decode the provider's error body into a structured error.
    async fn error_from_body(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let body = resp.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| "session expired or invalid credentials".into());
            return Error::Authentication { message };
        }

        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => Error::Api {
                message: parsed
                    .message
                    .unwrap_or_else(|| format!("HTTP {status}")),
                code: parsed.code,
                status: status.as_u16(),
            },
            Err(_) => Error::Api {
                message: format!("HTTP {status}: {}", crate::error::body_preview(&body)),
                code: None,
                status: status.as_u16(),
            },
        }
    }
}
