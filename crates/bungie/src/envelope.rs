//! The `{Response, ErrorCode, ErrorStatus, Message}` wrapper around every
//! platform response.

use serde::Deserialize;

use crate::error::BungieError;

/// Platform `ErrorCode` meaning success.
pub const PLATFORM_SUCCESS: i32 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope<T> {
    pub response: Option<T>,
    pub error_code: i32,
    #[serde(default)]
    pub error_status: String,
    #[serde(default)]
    pub message: String,
}

impl<T> Envelope<T> {
    /// Check the platform error code and unwrap the payload.
    pub fn into_result(self) -> Result<T, BungieError> {
        if self.error_code != PLATFORM_SUCCESS {
            return Err(BungieError::Platform {
                code: self.error_code,
                status: self.error_status,
                message: self.message,
            });
        }
        self.response
            .ok_or_else(|| BungieError::Malformed("envelope has no Response".into()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn success_unwraps_payload() {
        let env: Envelope<u32> = serde_json::from_str(
            r#"{"Response": 7, "ErrorCode": 1, "ErrorStatus": "Success", "Message": "Ok"}"#,
        )
        .unwrap();
        assert_eq!(env.into_result().unwrap(), 7);
    }

    #[test]
    fn platform_error_is_reported() {
        let env: Envelope<u32> = serde_json::from_str(
            r#"{"ErrorCode": 1601, "ErrorStatus": "DestinyAccountNotFound", "Message": "nope"}"#,
        )
        .unwrap();
        assert_matches!(
            env.into_result(),
            Err(BungieError::Platform { code: 1601, .. })
        );
    }

    #[test]
    fn missing_response_is_malformed() {
        let env: Envelope<u32> = serde_json::from_str(r#"{"ErrorCode": 1}"#).unwrap();
        assert_matches!(env.into_result(), Err(BungieError::Malformed(_)));
    }
}
