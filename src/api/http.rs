//! Production transport: a ureq agent plus an in-memory cookie jar.
//!
//! The server keeps the session in an `access_token` cookie. Every
//! `Set-Cookie` it sends is stored in the jar and replayed as a plain
//! `name=value` list on later requests, so the session lives exactly as
//! long as this value.

use std::time::Duration;

use ureq::{Agent, RequestBuilder};

use super::cookies::CookieJar;
use super::transport::{ApiRequest, ApiResponse, Body, Method, Transport};
use crate::errors::{PasswordyError, Result};

/// HTTP transport bound to one server.
pub struct HttpTransport {
    agent: Agent,
    server_url: String,
    user_agent: String,
    cookies: CookieJar,
}

impl HttpTransport {
    /// Build a transport for `server_url` (no trailing slash).
    pub fn new(server_url: &str, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            // Status codes are interpreted by `ApiClient`, not the agent.
            .http_status_as_error(false)
            .build();

        Self {
            agent: Agent::new_with_config(config),
            server_url: server_url.trim_end_matches('/').to_string(),
            user_agent: format!("passwordy/{}", env!("CARGO_PKG_VERSION")),
            cookies: CookieJar::new(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// True while the server has a session cookie set.
    pub fn has_session_cookie(&self) -> bool {
        !self.cookies.is_empty()
    }

    fn headers<B>(&self, builder: RequestBuilder<B>) -> RequestBuilder<B> {
        let builder = builder.header("User-Agent", &self.user_agent);
        match self.cookies.header() {
            Some(cookie) => builder.header("Cookie", &cookie),
            None => builder,
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.server_url, request.path);
        tracing::debug!(method = %request.method, %url, "sending request");

        let result = match request.method {
            Method::Get => self
                .headers(self.agent.get(&url))
                .query_pairs(pairs(&request.query))
                .call(),
            Method::Delete => self
                .headers(self.agent.delete(&url))
                .query_pairs(pairs(&request.query))
                .call(),
            Method::Post | Method::Put => {
                let builder = if request.method == Method::Post {
                    self.agent.post(&url)
                } else {
                    self.agent.put(&url)
                };
                let builder = self.headers(builder).query_pairs(pairs(&request.query));

                match &request.body {
                    Body::Empty => builder.send_empty(),
                    Body::Form(fields) => builder.send_form(pairs(fields)),
                    Body::Json(value) => builder.send_json(value),
                }
            }
        };

        let mut response = result.map_err(|e| PasswordyError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        for set_cookie in response.headers().get_all("set-cookie") {
            match set_cookie.to_str() {
                Ok(value) => self.cookies.store(value),
                Err(_) => tracing::debug!("ignoring non-ASCII Set-Cookie header"),
            }
        }
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| PasswordyError::Transport(format!("failed to read response: {e}")))?;

        tracing::debug!(status, %url, "received response");
        Ok(ApiResponse { status, body })
    }
}

fn pairs(items: &[(String, String)]) -> impl Iterator<Item = (&str, &str)> {
    items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
}
