use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::state::AppState;
use crate::summarization::schema::{
    CustomizeInput, CustomizeOutput, RefineInput, RefineOutput, SummarizeInput, SummarizeOutput,
};
use crate::summarization::{customize, refine, summarize};

/// POST /api/flows/summarize
pub async fn handle_summarize(
    State(state): State<AppState>,
    body: Result<Json<SummarizeInput>, JsonRejection>,
) -> Result<Json<SummarizeOutput>, AppError> {
    let Json(input) = body?;
    let output = summarize(state.summarizer.as_ref(), &state.llm_config, input).await?;
    Ok(Json(output))
}

/// POST /api/flows/refine
pub async fn handle_refine(
    State(state): State<AppState>,
    body: Result<Json<RefineInput>, JsonRejection>,
) -> Result<Json<RefineOutput>, AppError> {
    let Json(input) = body?;
    let output = refine(state.summarizer.as_ref(), &state.llm_config, input).await?;
    Ok(Json(output))
}

/// POST /api/flows/customize
pub async fn handle_customize(
    State(state): State<AppState>,
    body: Result<Json<CustomizeInput>, JsonRejection>,
) -> Result<Json<CustomizeOutput>, AppError> {
    let Json(input) = body?;
    let output = customize(state.summarizer.as_ref(), &state.llm_config, input).await?;
    Ok(Json(output))
}
