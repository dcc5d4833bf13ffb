// ylink-api: typed routes and HTTP transport for the Y backend

pub mod client;
pub mod error;
pub mod models;
pub mod route;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{AuthCallbackResponse, OauthUrlResponse};
pub use route::{
    Method, NoBody, NoQuery, OAuthCallbackQuery, QueryParams, Route, RouteDescriptor,
    encode_query, routes,
};
pub use transport::{TlsMode, TransportConfig};
