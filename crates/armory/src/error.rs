use guardian_bungie::BungieError;
use guardian_core::reply::ReplyError;
use guardian_llm::GenerationError;

/// Failure of an armor sync.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// No usable Bungie credential (missing token row, refresh rejected,
    /// unlinked membership).
    #[error("Bungie authorization failed: {0}")]
    Auth(String),

    /// Bungie answered with an error or an incomplete profile.
    #[error("Bungie request failed: {0}")]
    Upstream(#[source] BungieError),

    /// The requested character is not on the profile.
    #[error("Character {character_id} not found on profile")]
    CharacterNotFound { character_id: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Failure of an optimization or chat-style optimize request.
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    /// The request is missing a field the chosen branch needs.
    #[error("Invalid optimize request: {0}")]
    Invalid(String),

    #[error("Armor sync failed: {0}")]
    Sync(#[from] SyncError),

    #[error("Text generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// The reply could not be turned into a suggestion. `raw` holds the
    /// reply text for logging.
    #[error("Could not parse optimizer reply: {source}")]
    Parse {
        #[source]
        source: ReplyError,
        raw: String,
    },

    #[error("Could not encode optimizer data: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Text generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Bungie request failed: {0}")]
    Bungie(#[from] BungieError),

    /// The manifest does not list a table this job needs.
    #[error("Manifest has no {language} path for {table}")]
    MissingTable { table: String, language: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
