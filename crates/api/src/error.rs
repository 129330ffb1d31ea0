use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::QueryRejection;
use serde_json::{json, Value};
use setlist_core::error::CoreError;

/// Message returned for every 5xx. Details are only ever logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the
/// `{ "error": { "code", "message", "details"? } }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `setlist_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx without further context.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database error annotated with the query that produced it.
    #[error("Database error during {operation}: {source}")]
    Query {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The request body was not valid JSON for the expected shape.
    #[error("Invalid request body: {0}")]
    JsonBody(#[from] JsonRejection),

    /// The query string did not fit the expected parameters, e.g. a
    /// single-valued key given twice.
    #[error("Invalid query string: {0}")]
    QueryString(#[from] QueryRejection),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Attach the name of the failed operation to a sqlx result.
pub trait QueryContext<T> {
    fn context(self, operation: &'static str) -> AppResult<T>;
}

impl<T> QueryContext<T> for Result<T, sqlx::Error> {
    fn context(self, operation: &'static str) -> AppResult<T> {
        self.map_err(|source| AppError::Query { operation, source })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(None, &err),
            AppError::Query { operation, source } => classify_sqlx_error(Some(operation), &source),

            // --- Request body ---
            AppError::JsonBody(rejection) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Invalid request body".to_string(),
                Some(json!({ "error": rejection.body_text() })),
            ),
            AppError::QueryString(rejection) => (
                StatusCode::BAD_REQUEST,
                "INVALID_PARAMETER",
                "Invalid query string".to_string(),
                Some(json!({ "error": rejection.body_text() })),
            ),
        };

        error_response(status, code, message, details)
    }
}

/// Build the standard error envelope.
pub fn error_response(
    status: StatusCode,
    code: &str,
    message: String,
    details: Option<Value>,
) -> Response {
    let mut error = json!({
        "code": code,
        "message": message,
    });
    if let Some(details) = details {
        error["details"] = details;
    }

    (status, axum::Json(json!({ "error": error }))).into_response()
}

fn classify_core_error(err: CoreError) -> (StatusCode, &'static str, String, Option<Value>) {
    match err {
        CoreError::MissingParameter(param) => (
            StatusCode::BAD_REQUEST,
            "MISSING_PARAMETER",
            format!("Required parameter missing: {param}"),
            Some(json!({ "parameter": param })),
        ),
        CoreError::InvalidParameter { param, message } => (
            StatusCode::BAD_REQUEST,
            "INVALID_PARAMETER",
            message,
            Some(json!({ "parameter": param })),
        ),
        CoreError::Validation { message, details } => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, details)
        }
        CoreError::NotFound { entity } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} not found"),
            None,
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else is logged and maps to 500 with a sanitized message.
fn classify_sqlx_error(
    operation: Option<&'static str>,
    err: &sqlx::Error,
) -> (StatusCode, &'static str, String, Option<Value>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            None,
        ),
        other => {
            tracing::error!(
                operation = operation.unwrap_or("unknown"),
                error = %other,
                "Database error"
            );
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String, Option<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_ERROR_MESSAGE.to_string(),
        None,
    )
}
