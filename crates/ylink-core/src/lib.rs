//! Request resolution and sign-in logic between `ylink-api` and UI consumers.
//!
//! - **[`Resolver`]**: maps a typed [`Route`](ylink_api::Route) plus
//!   [`ResolveOptions`] to a [`Resolution`]: a [`QueryHandle`] for GET routes
//!   and a [`MutationHandle`] for writes. Both are always built.
//!
//! - **[`QueryCache`]**: process-wide store of settled reads keyed by
//!   [`QueryKey`] (route key, method, query). Owned by the application root
//!   and injected into the resolver. Successful writes invalidate by route key.
//!
//! - **[`CallbackReconciler`]**: consumes the OAuth callback URL, runs the
//!   exchange through the resolver, and redirects via a [`Navigator`].

pub mod cache;
pub mod callback;
pub mod config;
pub mod error;
pub mod resolver;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{CacheEntry, QueryCache, QueryKey};
pub use callback::{
    CallbackFlow, CallbackParams, CallbackReconciler, CallbackState, HOME_PATH, Navigator,
};
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use resolver::{MutationHandle, QueryHandle, Resolution, ResolveOptions, Resolver};
pub use state::{RequestState, Status};
