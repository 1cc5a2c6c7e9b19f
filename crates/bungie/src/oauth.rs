//! OAuth token endpoint payloads.
//!
//! The token endpoint is not wrapped in a platform envelope.

use serde::Deserialize;

/// Raw body of `/Platform/App/OAuth/Token/`. Every field is optional so a
/// partial response can be reported instead of failing to decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    /// Access token lifetime in seconds.
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    /// Refresh token lifetime in seconds.
    pub refresh_expires_in: Option<i64>,
    /// Bungie.net membership id of the account that granted access.
    pub membership_id: Option<String>,
}

/// A complete token grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub refresh_expires_in: Option<i64>,
    pub membership_id: Option<String>,
}

impl TokenResponse {
    /// Convert into a grant, or `None` when a required field is missing.
    pub fn into_grant(self) -> Option<TokenGrant> {
        Some(TokenGrant {
            access_token: self.access_token.filter(|t| !t.is_empty())?,
            token_type: self.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_in: self.expires_in?,
            refresh_token: self.refresh_token.filter(|t| !t.is_empty())?,
            refresh_expires_in: self.refresh_expires_in,
            membership_id: self.membership_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_response_becomes_grant() {
        let raw: TokenResponse = serde_json::from_str(
            r#"{"access_token": "a", "token_type": "Bearer", "expires_in": 3600,
                "refresh_token": "r", "refresh_expires_in": 7776000, "membership_id": "123"}"#,
        )
        .unwrap();
        let grant = raw.into_grant().unwrap();
        assert_eq!(grant.access_token, "a");
        assert_eq!(grant.expires_in, 3600);
        assert_eq!(grant.membership_id.as_deref(), Some("123"));
    }

    #[test]
    fn missing_refresh_token_is_rejected() {
        let raw: TokenResponse =
            serde_json::from_str(r#"{"access_token": "a", "expires_in": 3600}"#).unwrap();
        assert!(raw.into_grant().is_none());
    }
}
