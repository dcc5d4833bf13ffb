// Route descriptors and query encoding
//
// A route is pure data: a stable cache key, a path, and an HTTP method.
// The typed form `Route<Q, B>` also pins the query and body types a caller
// may pass for it, so mismatches are caught at compile time.

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::Serialize;

/// HTTP methods the backend exposes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn is_get(self) -> bool {
        self == Self::Get
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// Untyped view of a route, used for cache keys and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RouteDescriptor {
    pub key: &'static str,
    pub path: &'static str,
    pub method: Method,
}

/// A typed route descriptor.
///
/// `Q` is the query type the route accepts and `B` the request body type.
/// Both are phantom: the descriptor itself stores only static data.
pub struct Route<Q = NoQuery, B = NoBody> {
    key: &'static str,
    path: &'static str,
    method: Method,
    _types: PhantomData<fn() -> (Q, B)>,
}

impl<Q, B> Route<Q, B> {
    pub const fn new(key: &'static str, path: &'static str, method: Method) -> Self {
        Self {
            key,
            path,
            method,
            _types: PhantomData,
        }
    }

    pub const fn get(key: &'static str, path: &'static str) -> Self {
        Self::new(key, path, Method::Get)
    }

    pub const fn post(key: &'static str, path: &'static str) -> Self {
        Self::new(key, path, Method::Post)
    }

    pub const fn put(key: &'static str, path: &'static str) -> Self {
        Self::new(key, path, Method::Put)
    }

    pub const fn delete(key: &'static str, path: &'static str) -> Self {
        Self::new(key, path, Method::Delete)
    }

    /// Cache partition identifier.
    pub const fn key(&self) -> &'static str {
        self.key
    }

    pub const fn path(&self) -> &'static str {
        self.path
    }

    pub const fn method(&self) -> Method {
        self.method
    }

    pub fn is_get(&self) -> bool {
        self.method.is_get()
    }

    pub const fn descriptor(&self) -> RouteDescriptor {
        RouteDescriptor {
            key: self.key,
            path: self.path,
            method: self.method,
        }
    }
}

// Manual impls: deriving would put bounds on the phantom parameters.
impl<Q, B> Clone for Route<Q, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Q, B> Copy for Route<Q, B> {}

impl<Q, B> fmt::Debug for Route<Q, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("key", &self.key)
            .field("path", &self.path)
            .field("method", &self.method)
            .finish()
    }
}

// ── Query / body marker types ────────────────────────────────────────

/// Query type for routes that take no query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoQuery;

/// Body type for routes that never send a body. Uninhabited.
#[derive(Debug, Clone, Serialize)]
pub enum NoBody {}

/// Anything that can be rendered as ordered `key=value` query pairs.
///
/// Pairs are emitted in the order the implementor returns them; the
/// resolver never re-sorts, so insertion order is the wire order.
pub trait QueryParams {
    fn to_pairs(&self) -> Vec<(String, String)>;
}

impl QueryParams for NoQuery {
    fn to_pairs(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

impl QueryParams for IndexMap<String, String> {
    fn to_pairs(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl QueryParams for Vec<(String, String)> {
    fn to_pairs(&self) -> Vec<(String, String)> {
        self.clone()
    }
}

/// Query for the OAuth callback route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCallbackQuery {
    pub code: String,
    pub state: String,
}

impl QueryParams for OAuthCallbackQuery {
    fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("code".to_owned(), self.code.clone()),
            ("state".to_owned(), self.state.clone()),
        ]
    }
}

/// Encode query pairs as `application/x-www-form-urlencoded`.
///
/// Returns an empty string for no pairs and `?a=1&b=2` otherwise.
pub fn encode_query(pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("?{encoded}")
}

// ── Registry ─────────────────────────────────────────────────────────

/// Every backend route the client knows about.
///
/// Each `method` must match what the backend actually serves for `path`;
/// nothing checks that at runtime.
pub mod routes {
    use super::{NoBody, NoQuery, OAuthCallbackQuery, Route, RouteDescriptor};

    /// Fetch the Google authorization URL to start sign-in.
    pub const GET_OAUTH_URL: Route<NoQuery, NoBody> = Route::get("oauth-url", "/auth/google/url");

    /// Complete the OAuth exchange. The backend sets the session cookie.
    pub const GOOGLE_OAUTH_CALLBACK: Route<OAuthCallbackQuery, NoBody> =
        Route::get("oauth-callback", "/auth/google/callback");

    /// All registered routes, in declaration order.
    pub fn all() -> [RouteDescriptor; 2] {
        [GET_OAUTH_URL.descriptor(), GOOGLE_OAUTH_CALLBACK.descriptor()]
    }
}
