/// Text generation API settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    /// Model identifier (default: `claude-3-opus-20240229`).
    pub model: String,
    /// Scheme and host, without a trailing slash (default: `https://api.anthropic.com`).
    pub base_url: String,
    /// Upper bound on generated tokens per reply (default: `2000`).
    pub max_tokens: u32,
    /// Per-request timeout in seconds (default: `120`).
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                  | Default                     |
    /// |--------------------------|-----------------------------|
    /// | `ANTHROPIC_API_KEY`      | (required)                  |
    /// | `ANTHROPIC_MODEL`        | `claude-3-opus-20240229`    |
    /// | `ANTHROPIC_BASE_URL`     | `https://api.anthropic.com` |
    /// | `ANTHROPIC_MAX_TOKENS`   | `2000`                      |
    /// | `ANTHROPIC_TIMEOUT_SECS` | `120`                       |
    pub fn from_env() -> Self {
        let api_key = std::env::var("ANTHROPIC_API_KEY").expect("ANTHROPIC_API_KEY must be set");

        let model =
            std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| "claude-3-opus-20240229".into());

        let base_url = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com".into())
            .trim_end_matches('/')
            .to_string();

        let max_tokens: u32 = std::env::var("ANTHROPIC_MAX_TOKENS")
            .unwrap_or_else(|_| "2000".into())
            .parse()
            .expect("ANTHROPIC_MAX_TOKENS must be a valid u32");

        let timeout_secs: u64 = std::env::var("ANTHROPIC_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("ANTHROPIC_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            model,
            base_url,
            max_tokens,
            timeout_secs,
        }
    }
}
