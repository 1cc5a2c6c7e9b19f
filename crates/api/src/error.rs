use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guardian_armory::{ChatError, ManifestError, OptimizeError, SyncError};
use guardian_bungie::BungieError;
use guardian_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, the service errors of the armory
/// and Bungie crates, and a few HTTP-specific variants. Implements
/// [`IntoResponse`] to produce `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Credential or sync failure outside of an optimize call.
    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Optimize(#[from] OptimizeError),

    /// A direct Bungie call made by a handler failed.
    #[error(transparent)]
    Bungie(#[from] BungieError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type Classified = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Sync(err) => classify_sync_error(err),
            AppError::Optimize(err) => classify_optimize_error(err),
            AppError::Bungie(err) => upstream(err),
            AppError::Chat(err) => match err {
                ChatError::Generation(e) => {
                    tracing::error!(error = %e, "Chat generation failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "GENERATION_ERROR",
                        "Error processing chat request".to_string(),
                    )
                }
                ChatError::Database(e) => classify_sqlx_error(e),
            },
            AppError::Manifest(err) => match err {
                ManifestError::Bungie(e) => upstream(e),
                ManifestError::MissingTable { .. } => {
                    tracing::error!(error = %err, "Manifest is incomplete");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        "Failed to fetch manifest data".to_string(),
                    )
                }
                ManifestError::Database(e) => classify_sqlx_error(e),
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(core: &CoreError) -> Classified {
    match core {
        CoreError::NotFound { entity, key } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} {key} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Bungie failures never leak upstream detail to the client.
fn upstream(err: &BungieError) -> Classified {
    tracing::warn!(error = %err, "Bungie request failed");
    (
        StatusCode::BAD_GATEWAY,
        "UPSTREAM_ERROR",
        "Bungie request failed".to_string(),
    )
}

fn classify_sync_error(err: &SyncError) -> Classified {
    match err {
        SyncError::Auth(reason) => {
            tracing::info!(reason = %reason, "Bungie authorization failed");
            (
                StatusCode::BAD_REQUEST,
                "AUTH_ERROR",
                "Failed to authorize with Bungie".to_string(),
            )
        }
        SyncError::Upstream(e) => upstream(e),
        SyncError::CharacterNotFound { character_id } => {
            tracing::warn!(character_id = %character_id, "Character missing from Bungie profile");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Bungie request failed".to_string(),
            )
        }
        SyncError::Database(e) => classify_sqlx_error(e),
    }
}

fn classify_optimize_error(err: &OptimizeError) -> Classified {
    match err {
        OptimizeError::Invalid(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        OptimizeError::Sync(e) => {
            tracing::error!(error = %e, "Armor sync failed during optimize");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SYNC_ERROR",
                "Error syncing armor data".to_string(),
            )
        }
        OptimizeError::Generation(e) => {
            tracing::error!(error = %e, "Optimizer generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GENERATION_ERROR",
                "Error generating optimization suggestion".to_string(),
            )
        }
        // The raw reply was already logged where it was parsed.
        OptimizeError::Parse { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "PARSE_ERROR",
            "Failed to parse the optimization suggestion".to_string(),
        ),
        OptimizeError::Encode(e) => {
            tracing::error!(error = %e, "Optimizer data could not be encoded");
            internal()
        }
        OptimizeError::Database(e) => classify_sqlx_error(e),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique_violation
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
