// ── Process-wide read cache ──
//
// Settled GET results keyed by (route key, method, query). Owned by the
// application root and shared through `Arc`; never a global.

mod store;

pub use store::QueryCache;

use chrono::{DateTime, Utc};
use ylink_api::{Method, RouteDescriptor};

use crate::state::RequestState;

/// Composite identity of a cached read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    route_key: String,
    method: Method,
    query: Vec<(String, String)>,
}

impl QueryKey {
    pub fn new(route: RouteDescriptor, query: Vec<(String, String)>) -> Self {
        Self {
            route_key: route.key.to_owned(),
            method: route.method,
            query,
        }
    }

    /// The invalidation partition this key belongs to.
    pub fn route_key(&self) -> &str {
        &self.route_key
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

/// Last settled state of a read, plus staleness.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub state: RequestState,
    /// Set by invalidation; the next access refetches.
    pub stale: bool,
    pub updated_at: DateTime<Utc>,
}
