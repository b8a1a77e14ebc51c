use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cifan_core::error::CoreError;
use cifan_core::i18n::{Locale, MessageKey};
use cifan_core::lifecycle::{message_for, Action};
use cifan_core::types::RecordId;
use cifan_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for backend
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cifan_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Another mutating action is already running against the same record.
    #[error("Action '{action}' is already in progress for application {id}")]
    ActionInProgress { id: RecordId, action: &'static str },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// HTTP status, stable error code and (English) message for this error.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::ConfirmationRequired { .. } => (
                    StatusCode::PRECONDITION_REQUIRED,
                    "CONFIRMATION_REQUIRED",
                    core.to_string(),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::ActionInProgress { .. } => (
                StatusCode::CONFLICT,
                "ACTION_IN_PROGRESS",
                self.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        }
    }

    /// The user-facing message for this error. `action` is the mutation that
    /// failed, or `None` for reads.
    pub fn message_key(&self, action: Option<Action>) -> MessageKey {
        match self {
            AppError::Core(core) => message_for(core, action),
            AppError::Store(StoreError::Database(sqlx::Error::RowNotFound)) => {
                MessageKey::NotFound
            }
            AppError::ActionInProgress { .. } => MessageKey::ActionInProgress,
            AppError::BadRequest(_) => MessageKey::InvalidInput,
            AppError::Store(_) | AppError::InternalError(_) => {
                action.map_or(MessageKey::LoadFailed, Action::failure_message)
            }
        }
    }

    /// Render this error with its message in `locale`.
    pub fn localized(self, locale: Locale, action: Option<Action>) -> LocalizedError {
        let key = self.message_key(action);
        let (status, code, detail) = self.classify();
        LocalizedError {
            status,
            code,
            message: locale.content().message(key),
            detail,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// An [`AppError`] whose `error` text comes from the locale dictionary.
///
/// The English diagnostic is kept under `detail`; for internal errors it is
/// the generic message, never the underlying cause.
#[derive(Debug)]
pub struct LocalizedError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: &'static str,
    pub detail: String,
}

impl IntoResponse for LocalizedError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.message,
            "code": self.code,
            "detail": self.detail,
        });

        (self.status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - An unreachable backend maps to 503.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Database(sqlx::Error::RowNotFound) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        StoreError::Unavailable(msg) => {
            tracing::error!(error = %msg, "Record store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                "The record store is unavailable".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Record store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
