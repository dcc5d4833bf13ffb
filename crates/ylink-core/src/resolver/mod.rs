//! Route resolution: descriptor + options -> live read state and a write trigger.
//!
//! [`Resolver::resolve`] always builds both a [`QueryHandle`] and a
//! [`MutationHandle`], so the shape of what a caller holds never depends on
//! the route's method. Only one of them is live:
//!
//! - **GET** routes get an active query handle (unless `enabled` is false)
//!   that fetches on its own and serves fresh cache hits without a request.
//! - **POST/PUT/DELETE** routes only do anything when
//!   [`mutate`](Resolution::mutate) is called. A successful write marks every
//!   cached read with the same route key stale.

mod mutation;
mod query;

pub use mutation::MutationHandle;
pub use query::QueryHandle;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use ylink_api::{ApiClient, QueryParams, Route};

use crate::cache::{QueryCache, QueryKey};
use crate::config::ClientConfig;
use crate::error::CoreError;

/// Per-call options for [`Resolver::resolve`].
pub struct ResolveOptions<Q, B> {
    pub query: Option<Q>,
    /// Default body for the write path; `mutate(None)` falls back to it.
    pub body: Option<B>,
    /// Gates automatic reads. Writes ignore it.
    pub enabled: bool,
}

impl<Q, B> Default for ResolveOptions<Q, B> {
    fn default() -> Self {
        Self {
            query: None,
            body: None,
            enabled: true,
        }
    }
}

impl<Q, B> ResolveOptions<Q, B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: Q) -> Self {
        self.query = Some(query);
        self
    }

    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Both halves of a resolved route.
pub struct Resolution<B> {
    /// `true` when the route's method is GET; tells which half is live.
    pub is_get: bool,
    pub query: QueryHandle,
    pub mutation: MutationHandle<B>,
}

impl<B: Serialize> Resolution<B> {
    /// Trigger the write path. See [`MutationHandle::mutate`].
    pub async fn mutate(&self, body: Option<B>) -> Result<Arc<Value>, Arc<ylink_api::Error>> {
        self.mutation.mutate(body).await
    }
}

/// Maps route descriptors to cached reads and explicit writes.
///
/// Cheap to clone; every clone shares one client (and cookie jar) and one cache.
#[derive(Clone)]
pub struct Resolver {
    client: Arc<ApiClient>,
    cache: Arc<QueryCache>,
}

impl Resolver {
    pub fn new(client: Arc<ApiClient>, cache: Arc<QueryCache>) -> Self {
        Self { client, cache }
    }

    /// Build the HTTP client from config and attach it to `cache`.
    pub fn from_config(config: &ClientConfig, cache: Arc<QueryCache>) -> Result<Self, CoreError> {
        let client = ApiClient::new(config.backend_url.clone(), &config.transport())?;
        Ok(Self::new(Arc::new(client), cache))
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Resolve `route` with `options`.
    ///
    /// For an active GET this spawns a background read, so it must run
    /// inside a Tokio runtime.
    pub fn resolve<Q, B>(&self, route: &Route<Q, B>, options: ResolveOptions<Q, B>) -> Resolution<B>
    where
        Q: QueryParams,
        B: Serialize,
    {
        let descriptor = route.descriptor();
        let is_get = route.is_get();
        let pairs = options
            .query
            .as_ref()
            .map(QueryParams::to_pairs)
            .unwrap_or_default();
        let url = self.client.build_url(descriptor.path, &pairs);
        let key = QueryKey::new(descriptor, pairs);

        let query = if is_get && options.enabled {
            QueryHandle::spawn(
                key,
                url.clone(),
                Arc::clone(&self.client),
                Arc::clone(&self.cache),
            )
        } else {
            QueryHandle::inactive(key, is_get)
        };

        let mutation = MutationHandle::new(
            descriptor,
            url,
            options.body,
            Arc::clone(&self.client),
            Arc::clone(&self.cache),
        );

        Resolution {
            is_get,
            query,
            mutation,
        }
    }
}
