use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::mailer::MailError;
use crate::store::StoreError;
use crate::summarization::SummarizationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Request payload failed a flow's input schema.
    #[error("Schema validation error: {0}")]
    SchemaValidation(String),

    /// The model answered, but not in the shape the flow requires.
    #[error("Model output schema validation error: {0}")]
    OutputSchemaValidation(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<SummarizationError> for AppError {
    fn from(err: SummarizationError) -> Self {
        match err {
            SummarizationError::InvalidInput { .. } => AppError::SchemaValidation(err.to_string()),
            SummarizationError::InvalidOutput { .. } => {
                AppError::OutputSchemaValidation(err.to_string())
            }
            SummarizationError::GenerationFailed { .. } => {
                AppError::GenerationFailed(err.to_string())
            }
        }
    }
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::Address(e) => AppError::Validation(format!("Invalid email address: {e}")),
            other => AppError::ExportFailed(other.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SummaryNotFound(id) => AppError::NotFound(format!("Summary {id} not found")),
            other => AppError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::SchemaValidation(msg) => (
                StatusCode::BAD_REQUEST,
                "SCHEMA_VALIDATION_ERROR",
                msg.clone(),
            ),
            AppError::OutputSchemaValidation(msg) => {
                tracing::error!("Model output rejected: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCHEMA_VALIDATION_ERROR",
                    "The AI service returned an unexpected response. Please try again.".to_string(),
                )
            }
            AppError::GenerationFailed(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    "Could not generate summary. Please try again.".to_string(),
                )
            }
            AppError::ExportFailed(msg) => {
                tracing::error!("Export error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_FAILED",
                    msg.clone(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
