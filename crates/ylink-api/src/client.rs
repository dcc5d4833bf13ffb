// Backend HTTP client
//
// Wraps `reqwest::Client` with base-address URL construction, status
// checking, and JSON decoding. Payloads stay as `serde_json::Value`;
// typed decoding happens at the edges that know the response shape.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::route::{Method, encode_query};
use crate::transport::TransportConfig;

/// HTTP client for the Y backend.
///
/// Every request goes through the same cookie-carrying `reqwest::Client`,
/// so the session cookie set by the OAuth callback is replayed on all
/// later calls.
pub struct ApiClient {
    http: reqwest::Client,
    /// Backend address prefix. `None` when the environment never supplied
    /// one; requests then fail with [`Error::Configuration`].
    base_url: Option<String>,
    cookie_jar: Arc<Jar>,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// The base address is not validated here. A missing or malformed
    /// address surfaces on the first request, not at construction.
    pub fn new(base_url: Option<String>, transport: &TransportConfig) -> Result<Self, Error> {
        let (http, cookie_jar) = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            cookie_jar,
        })
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// The `Cookie` header the client would send to the backend, if any.
    pub fn cookie_header(&self) -> Option<String> {
        let base = Url::parse(self.base_url.as_deref()?).ok()?;
        let cookies = self.cookie_jar.cookies(&base)?;
        cookies.to_str().ok().map(String::from)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}{path}{?query}`. The base is concatenated verbatim.
    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> String {
        let base = self.base_url.as_deref().unwrap_or_default();
        format!("{base}{path}{}", encode_query(query))
    }

    fn parse_url(url: &str) -> Result<Url, Error> {
        Url::parse(url).map_err(|e| Error::Configuration {
            url: url.to_owned(),
            reason: e.to_string(),
        })
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET and decode the JSON response.
    pub async fn get(&self, url: &str) -> Result<Value, Error> {
        debug!("GET {}", url);

        let parsed = Self::parse_url(url)?;
        let resp = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(|source| Error::Transport {
                method: Method::Get,
                url: url.to_owned(),
                source,
            })?;

        Self::parse_json(Method::Get, url, resp).await
    }

    /// Send a request with `method` and an optional JSON body.
    ///
    /// When `body` is `None` the request has no body at all; the JSON
    /// content type is still declared.
    pub async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Value, Error> {
        debug!("{} {}", method, url);

        let parsed = Self::parse_url(url)?;
        let mut builder = self
            .http
            .request(method.into(), parsed)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let resp = builder.send().await.map_err(|source| Error::Transport {
            method,
            url: url.to_owned(),
            source,
        })?;

        Self::parse_json(method, url, resp).await
    }

    /// Reject non-2xx statuses, then decode the body as JSON.
    async fn parse_json(method: Method, url: &str, resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                method,
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|source| Error::Transport {
            method,
            url: url.to_owned(),
            source,
        })?;
        trace!(bytes = body.len(), "response body received");

        serde_json::from_str(&body).map_err(|e| Error::Decode {
            method,
            url: url.to_owned(),
            message: e.to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: Option<&str>) -> ApiClient {
        ApiClient::new(base.map(String::from), &TransportConfig::default()).expect("client builds")
    }

    #[test]
    fn build_url_concatenates_base_path_and_query() {
        let c = client(Some("http://localhost:8000"));
        let q = vec![("code".to_owned(), "c1".to_owned())];
        assert_eq!(
            c.build_url("/auth/google/callback", &q),
            "http://localhost:8000/auth/google/callback?code=c1"
        );
        assert_eq!(
            c.build_url("/auth/google/url", &[]),
            "http://localhost:8000/auth/google/url"
        );
    }

    #[test]
    fn missing_base_yields_relative_url() {
        let c = client(None);
        assert_eq!(c.build_url("/auth/google/url", &[]), "/auth/google/url");
        assert!(c.cookie_header().is_none());
    }

    #[tokio::test]
    async fn missing_base_fails_at_request_time() {
        let c = client(None);
        let url = c.build_url("/auth/google/url", &[]);
        let err = c.get(&url).await.expect_err("relative URL must fail");
        assert!(matches!(err, Error::Configuration { .. }), "got {err:?}");
    }
}
