//! Typed endpoints of the vault server.
//!
//! `ApiClient` turns each operation into an `ApiRequest`, hands it to
//! its `Transport`, and maps the response:
//!
//! - 2xx: the JSON body is decoded and returned as-is.
//! - 401: the unauthorized hook (if any) runs, then `Unauthorized`.
//! - anything else: `Api { status, detail }`.
//!
//! Nothing is retried.

use serde::de::DeserializeOwned;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::models::{
    Ack, Health, ItemChanges, LoginToken, NewItem, RevealedPassword, User, VaultItem,
};
use super::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::errors::{PasswordyError, Result};

/// Callback run on every 401 before the call is rejected.
pub type UnauthorizedHook = Box<dyn Fn(&ApiRequest) + Send + Sync>;

/// Client for the `/auth` and `/vault` routes.
pub struct ApiClient<T: Transport> {
    transport: T,
    prefix: String,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl<T: Transport> ApiClient<T> {
    /// Create a client whose routes live under `api_prefix` (e.g. `/api/v1`).
    pub fn new(transport: T, api_prefix: &str) -> Self {
        let prefix = api_prefix.trim_end_matches('/');
        let prefix = if prefix.is_empty() || prefix.starts_with('/') {
            prefix.to_string()
        } else {
            format!("/{prefix}")
        };

        Self {
            transport,
            prefix,
            on_unauthorized: None,
        }
    }

    /// Install a hook that sees every request the server answered with 401.
    pub fn with_unauthorized_hook(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    /// `GET /auth/me` — who the server thinks we are.
    pub fn me(&self) -> Result<User> {
        let response = self.execute(ApiRequest::new(Method::Get, self.route("/auth/me")))?;
        decode(&response)
    }

    /// `POST /auth/login` with form-encoded credentials.
    ///
    /// On success the server sets the session cookie; the returned token
    /// is informational.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginToken> {
        let request = ApiRequest::new(Method::Post, self.route("/auth/login"))
            .form(&[("username", username), ("password", password)]);
        let response = self.execute(request)?;
        decode(&response)
    }

    /// `POST /auth/logout` — asks the server to drop the session cookie.
    pub fn logout(&self) -> Result<()> {
        let response = self.execute(ApiRequest::new(Method::Post, self.route("/auth/logout")))?;
        let _: Ack = decode_or_default(&response)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Vault
    // ------------------------------------------------------------------

    /// `GET /vault/?query=<text>` — items whose account name matches.
    pub fn list_items(&self, query: &str) -> Result<Vec<VaultItem>> {
        let request = ApiRequest::new(Method::Get, self.route("/vault/")).query("query", query);
        let response = self.execute(request)?;
        decode(&response)
    }

    /// `POST /vault/` — store a new item with its password.
    pub fn create_item(&self, item: &NewItem<'_>) -> Result<VaultItem> {
        let request = ApiRequest::new(Method::Post, self.route("/vault/")).json(to_json(item)?);
        let response = self.execute(request)?;
        decode(&response)
    }

    /// `PUT /vault/{id}` — update an item; omitted password is kept.
    pub fn update_item(&self, id: Uuid, changes: &ItemChanges<'_>) -> Result<VaultItem> {
        let request = ApiRequest::new(Method::Put, self.route(&format!("/vault/{id}")))
            .json(to_json(changes)?);
        let response = self.execute(request)?;
        decode(&response)
    }

    /// `DELETE /vault/{id}`.
    pub fn delete_item(&self, id: Uuid) -> Result<()> {
        let request = ApiRequest::new(Method::Delete, self.route(&format!("/vault/{id}")));
        let response = self.execute(request)?;
        let _: Ack = decode_or_default(&response)?;
        Ok(())
    }

    /// `POST /vault/{id}/reveal` — the item's plaintext password.
    pub fn reveal(&self, id: Uuid) -> Result<Zeroizing<String>> {
        let request = ApiRequest::new(Method::Post, self.route(&format!("/vault/{id}/reveal")));
        let response = self.execute(request)?;
        let revealed: RevealedPassword = decode(&response)?;
        Ok(revealed.password)
    }

    /// `GET /health` at the server root (outside the API prefix).
    pub fn health(&self) -> Result<()> {
        let response = self.execute(ApiRequest::new(Method::Get, "/health"))?;
        let health: Health = decode(&response)?;
        if health.status == "ok" {
            Ok(())
        } else {
            Err(PasswordyError::InvalidResponse(format!(
                "server reported status '{}'",
                health.status
            )))
        }
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    fn route(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }

    fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let response = self.transport.send(&request)?;

        if response.is_success() {
            return Ok(response);
        }

        let detail = extract_detail(&response.body);
        if response.status == 401 {
            tracing::debug!(
                method = %request.method,
                path = %request.path,
                "server rejected the session"
            );
            if let Some(hook) = &self.on_unauthorized {
                hook(&request);
            }
            return Err(PasswordyError::Unauthorized { detail });
        }

        Err(PasswordyError::Api {
            status: response.status,
            detail,
        })
    }
}

fn to_json<S: serde::Serialize>(value: &S) -> Result<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| PasswordyError::InvalidResponse(format!("could not encode request: {e}")))
}

fn decode<D: DeserializeOwned>(response: &ApiResponse) -> Result<D> {
    serde_json::from_str(&response.body)
        .map_err(|e| PasswordyError::InvalidResponse(format!("{e}")))
}

/// Like `decode`, but an empty body counts as the default acknowledgement.
fn decode_or_default<D: DeserializeOwned + Default>(response: &ApiResponse) -> Result<D> {
    if response.body.trim().is_empty() {
        return Ok(D::default());
    }
    decode(response)
}

/// Pull a human-readable message out of an error body.
///
/// The server answers errors as `{"detail": "..."}`, or for validation
/// failures `{"detail": [{"msg": "...", ...}, ...]}`. Non-JSON bodies are
/// passed through, shortened.
pub fn extract_detail(body: &str) -> String {
    const MAX_RAW: usize = 200;

    let trimmed = body.trim();
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Array(entries)) => entries
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect::<Vec<_>>()
                .join("; "),
            Some(other) => other.to_string(),
            None => String::new(),
        },
        Err(_) => trimmed.chars().take(MAX_RAW).collect(),
    }
}
