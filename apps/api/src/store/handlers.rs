use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::handlers::{pdf_download, render_pdf};
use crate::models::summary::SummaryRecord;
use crate::state::AppState;
use crate::store::reducer::{Action, SessionState};
use crate::summarization::schema::{CustomizeInput, RefineInput, SummarizeInput};
use crate::summarization::{customize, refine, summarize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSummaryRequest {
    pub transcript: String,
    /// Usually the uploaded transcript's file name.
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineSummaryRequest {
    pub edited_summary: String,
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizeSummaryRequest {
    pub custom_prompt: String,
}

/// GET /api/v1/sessions/:session/summaries
pub async fn handle_list_summaries(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Json<SessionState> {
    Json(state.store.snapshot(&session).await)
}

/// POST /api/v1/sessions/:session/summaries
pub async fn handle_create_summary(
    State(state): State<AppState>,
    Path(session): Path<String>,
    body: Result<Json<CreateSummaryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SummaryRecord>), AppError> {
    let Json(req) = body?;
    let output = summarize(
        state.summarizer.as_ref(),
        &state.llm_config,
        SummarizeInput {
            transcript: req.transcript.clone(),
            custom_prompt: None,
        },
    )
    .await?;

    let record = SummaryRecord::new(req.transcript, output.summary, req.title);
    state
        .store
        .dispatch(&session, Action::Created(record.clone()))
        .await?;
    info!("Created summary {} in session {session}", record.id);

    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/v1/sessions/:session/summaries/:id/refine
///
/// Edits identical to the stored summary return the record as is.
pub async fn handle_refine_summary(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, Uuid)>,
    body: Result<Json<RefineSummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryRecord>, AppError> {
    let Json(req) = body?;
    let record = state.store.find(&session, id).await?;
    if req.edited_summary == record.summary {
        return Ok(Json(record));
    }

    let output = refine(
        state.summarizer.as_ref(),
        &state.llm_config,
        RefineInput {
            initial_summary: record.summary,
            user_edits: req.edited_summary,
        },
    )
    .await?;

    revise(&state, &session, id, output.refined_summary, req.custom_prompt).await
}

/// POST /api/v1/sessions/:session/summaries/:id/customize
pub async fn handle_customize_summary(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, Uuid)>,
    body: Result<Json<CustomizeSummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryRecord>, AppError> {
    let Json(req) = body?;
    let record = state.store.find(&session, id).await?;

    let output = customize(
        state.summarizer.as_ref(),
        &state.llm_config,
        CustomizeInput {
            transcript: record.transcript,
            original_summary: record.summary,
            custom_prompt: req.custom_prompt.clone(),
        },
    )
    .await?;

    revise(&state, &session, id, output.refined_summary, Some(req.custom_prompt)).await
}

async fn revise(
    state: &AppState,
    session: &str,
    id: Uuid,
    summary: String,
    custom_prompt: Option<String>,
) -> Result<Json<SummaryRecord>, AppError> {
    let next = state
        .store
        .dispatch(
            session,
            Action::Revised {
                id,
                summary,
                custom_prompt,
            },
        )
        .await?;
    let record = next
        .find(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Summary {id} not found")))?;
    Ok(Json(record))
}

/// POST /api/v1/sessions/:session/summaries/:id/select
pub async fn handle_select_summary(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, Uuid)>,
) -> Result<Json<SessionState>, AppError> {
    let next = state.store.dispatch(&session, Action::Selected(id)).await?;
    Ok(Json(next))
}

/// DELETE /api/v1/sessions/:session/selection
pub async fn handle_clear_selection(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<SessionState>, AppError> {
    let next = state
        .store
        .dispatch(&session, Action::ClearedSelection)
        .await?;
    Ok(Json(next))
}

/// DELETE /api/v1/sessions/:session/summaries/:id
pub async fn handle_delete_summary(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, Uuid)>,
) -> Result<Json<SessionState>, AppError> {
    let next = state.store.dispatch(&session, Action::Deleted(id)).await?;
    info!("Deleted summary {id} from session {session}");
    Ok(Json(next))
}

/// POST /api/v1/sessions/:session/summaries/:id/pdf
pub async fn handle_summary_pdf(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, Uuid)>,
) -> Result<Response, AppError> {
    let record = state.store.find(&session, id).await?;
    let bytes = render_pdf(record.summary, state.page_geometry.clone()).await?;
    Ok(pdf_download(bytes))
}
