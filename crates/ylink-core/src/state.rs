//! Per-invocation request state shared by reads and writes.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Lifecycle of a single read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Idle,
    Pending,
    Success,
    Error,
}

/// Snapshot of a request's progress.
///
/// `data` is opaque to this layer; use [`decode`](Self::decode) at the
/// edge that knows the response shape. While a refetch is pending the
/// previous `data` is kept.
#[derive(Debug, Clone)]
pub struct RequestState {
    pub status: Status,
    pub data: Option<Arc<Value>>,
    pub error: Option<Arc<ylink_api::Error>>,
    /// Derived from the route's method.
    pub is_get: bool,
}

impl RequestState {
    pub fn idle(is_get: bool) -> Self {
        Self {
            status: Status::Idle,
            data: None,
            error: None,
            is_get,
        }
    }

    pub fn success(data: Arc<Value>, is_get: bool) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            error: None,
            is_get,
        }
    }

    pub fn failure(error: Arc<ylink_api::Error>, is_get: bool) -> Self {
        Self {
            status: Status::Error,
            data: None,
            error: Some(error),
            is_get,
        }
    }

    pub(crate) fn from_result(result: Result<Value, ylink_api::Error>, is_get: bool) -> Self {
        match result {
            Ok(data) => Self::success(Arc::new(data), is_get),
            Err(e) => Self::failure(Arc::new(e), is_get),
        }
    }

    /// Move to `Pending`, keeping whatever data was already there.
    pub(crate) fn begin(&mut self) {
        self.status = Status::Pending;
        self.error = None;
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.status, Status::Success | Status::Error)
    }

    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Decode `data` into `T`. `None` when there is no data yet.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.data.as_deref().map(T::deserialize)
    }
}
