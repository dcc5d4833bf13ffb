// Backend response shapes
//
// All fields the client does not strictly need are optional so that
// partial or evolving payloads still decode.

use serde::{Deserialize, Serialize};

/// Response of `GET /auth/google/url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OauthUrlResponse {
    pub url: String,
}

/// Response of `GET /auth/google/callback`.
///
/// `ok` is tri-state on purpose: only a literal `false` means failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthCallbackResponse {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn callback_response_tolerates_empty_object() {
        let resp: AuthCallbackResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(resp, AuthCallbackResponse::default());
    }

    #[test]
    fn callback_response_reads_full_payload() {
        let resp: AuthCallbackResponse = serde_json::from_value(json!({
            "ok": true,
            "user_id": 42,
            "email": "maya@example.com",
            "name": "Maya",
            "avatar": null
        }))
        .unwrap();
        assert_eq!(resp.ok, Some(true));
        assert_eq!(resp.user_id, Some(42));
        assert_eq!(resp.avatar, None);
    }
}
