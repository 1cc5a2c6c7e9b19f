/// Bungie application credentials and HTTP settings.
#[derive(Debug, Clone)]
pub struct BungieConfig {
    /// Value of the `X-API-Key` header.
    pub api_key: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Scheme and host, without a trailing slash (default: `https://www.bungie.net`).
    pub base_url: String,
    /// Per-request timeout in seconds (default: `30`).
    pub timeout_secs: u64,
}

impl BungieConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `BUNGIE_API_KEY`       | (required)               |
    /// | `BUNGIE_CLIENT_ID`     | (required)               |
    /// | `BUNGIE_CLIENT_SECRET` | (required)               |
    /// | `BUNGIE_BASE_URL`      | `https://www.bungie.net` |
    /// | `BUNGIE_TIMEOUT_SECS`  | `30`                     |
    pub fn from_env() -> Self {
        let api_key = std::env::var("BUNGIE_API_KEY").expect("BUNGIE_API_KEY must be set");
        let client_id = std::env::var("BUNGIE_CLIENT_ID").expect("BUNGIE_CLIENT_ID must be set");
        let client_secret =
            std::env::var("BUNGIE_CLIENT_SECRET").expect("BUNGIE_CLIENT_SECRET must be set");

        let base_url = std::env::var("BUNGIE_BASE_URL")
            .unwrap_or_else(|_| "https://www.bungie.net".into())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = std::env::var("BUNGIE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("BUNGIE_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            client_id,
            client_secret,
            base_url,
            timeout_secs,
        }
    }
}
