/// Errors from the Bungie.net client.
#[derive(Debug, thiserror::Error)]
pub enum BungieError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Bungie returned a non-2xx status code.
    #[error("Bungie API error ({status}): {body}")]
    Api {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The platform envelope carried a non-success `ErrorCode`.
    #[error("Bungie platform error {code} ({status}): {message}")]
    Platform {
        code: i32,
        status: String,
        message: String,
    },

    /// The response decoded but lacks data this client requires.
    #[error("Malformed Bungie response: {0}")]
    Malformed(String),
}
