use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::export::mailer::{MailAttachment, OutgoingMail};
use crate::export::pdf::render_summary_pdf;
use crate::layout::PageGeometry;
use crate::state::AppState;

pub const EMAIL_SUBJECT: &str = "Your Meeting Summary";
pub const EMAIL_BODY: &str = "Please find attached the meeting summary in PDF format.";
pub const EMAIL_ATTACHMENT_NAME: &str = "Meeting Summary.pdf";
const DOWNLOAD_FILENAME: &str = "summary.pdf";

#[derive(Debug, Deserialize)]
pub struct GeneratePdfRequest {
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
}

fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("'{field}' is required")))
}

/// Lays out and renders the summary on the blocking pool.
pub async fn render_pdf(summary: String, geometry: PageGeometry) -> Result<Vec<u8>, AppError> {
    tokio::task::spawn_blocking(move || render_summary_pdf(&summary, &geometry))
        .await
        .map_err(|e| AppError::ExportFailed(format!("PDF rendering task failed: {e}")))
}

/// Wraps rendered bytes as a file download.
pub fn pdf_download(bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// POST /api/generate-pdf
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    body: Result<Json<GeneratePdfRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = body?;
    let summary = required("summary", req.summary)?;

    let bytes = render_pdf(summary, state.page_geometry.clone()).await?;
    info!("Generated summary PDF ({} bytes)", bytes.len());
    Ok(pdf_download(bytes))
}

/// POST /api/send-email
pub async fn handle_send_email(
    State(state): State<AppState>,
    body: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, AppError> {
    let Json(req) = body?;
    let summary = required("summary", req.summary)?;
    let email = required("email", req.email)?;

    let bytes = render_pdf(summary, state.page_geometry.clone()).await?;
    state
        .mailer
        .send_mail(OutgoingMail {
            to: email.trim().to_string(),
            subject: EMAIL_SUBJECT.to_string(),
            body: EMAIL_BODY.to_string(),
            attachment: MailAttachment {
                filename: EMAIL_ATTACHMENT_NAME.to_string(),
                content_type: "application/pdf".to_string(),
                bytes,
            },
        })
        .await?;

    Ok(Json(SendEmailResponse { success: true }))
}
