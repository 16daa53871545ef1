//! Summarization flows: summarize, refine and customize a meeting summary.
//!
//! Each flow is one model round trip with a fixed prompt template and a typed,
//! schema-validated input and output:
//! - input is validated before any model call (`SummarizationError::InvalidInput`)
//! - output is parsed into its typed shape and validated (`InvalidOutput`)
//! - transport/API failures surface as `GenerationFailed`, never retried
//!
//! `AppState` holds an `Arc<dyn Summarizer>`; handlers call the free functions below,
//! which wrap the backend with the boundary validation.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_CHATTER_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmConfig, LlmError};

pub mod handlers;
pub mod prompts;
pub mod schema;

use prompts::{CUSTOMIZE_PROMPT_TEMPLATE, REFINE_PROMPT_TEMPLATE, SUMMARIZE_PROMPT_TEMPLATE};
use schema::{
    CustomizeInput, CustomizeOutput, RefineInput, RefineOutput, StructuredOutput,
    SummarizeInput, SummarizeOutput, Validate,
};

#[derive(Debug, Error)]
pub enum SummarizationError {
    #[error("invalid {flow} input: {message}")]
    InvalidInput { flow: &'static str, message: String },

    #[error("{flow} output did not match its schema: {message}")]
    InvalidOutput { flow: &'static str, message: String },

    #[error("{flow} generation failed: {source}")]
    GenerationFailed {
        flow: &'static str,
        #[source]
        source: LlmError,
    },
}

/// The summarization backend. Implement this to swap the model provider without
/// touching the handlers. The config is passed per call, never stored.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        config: &LlmConfig,
        input: &SummarizeInput,
    ) -> Result<SummarizeOutput, SummarizationError>;

    async fn refine(
        &self,
        config: &LlmConfig,
        input: &RefineInput,
    ) -> Result<RefineOutput, SummarizationError>;

    async fn customize(
        &self,
        config: &LlmConfig,
        input: &CustomizeInput,
    ) -> Result<CustomizeOutput, SummarizationError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Boundary-validated entry points
// ────────────────────────────────────────────────────────────────────────────

fn check_input<I: Validate>(flow: &'static str, input: &I) -> Result<(), SummarizationError> {
    input
        .validate()
        .map_err(|message| SummarizationError::InvalidInput { flow, message })
}

fn check_output<O: Validate>(flow: &'static str, output: O) -> Result<O, SummarizationError> {
    output
        .validate()
        .map_err(|message| SummarizationError::InvalidOutput { flow, message })?;
    Ok(output)
}

pub async fn summarize(
    summarizer: &dyn Summarizer,
    config: &LlmConfig,
    input: SummarizeInput,
) -> Result<SummarizeOutput, SummarizationError> {
    check_input("summarize", &input)?;
    let output = summarizer.summarize(config, &input).await?;
    check_output("summarize", output)
}

pub async fn refine(
    summarizer: &dyn Summarizer,
    config: &LlmConfig,
    input: RefineInput,
) -> Result<RefineOutput, SummarizationError> {
    check_input("refine", &input)?;
    let output = summarizer.refine(config, &input).await?;
    check_output("refine", output)
}

pub async fn customize(
    summarizer: &dyn Summarizer,
    config: &LlmConfig,
    input: CustomizeInput,
) -> Result<CustomizeOutput, SummarizationError> {
    check_input("customize", &input)?;
    let output = summarizer.customize(config, &input).await?;
    check_output("customize", output)
}

// ────────────────────────────────────────────────────────────────────────────
// LlmSummarizer (default backend)
// ────────────────────────────────────────────────────────────────────────────

/// Model-backed summarizer. All calls go through the shared `LlmClient`.
pub struct LlmSummarizer {
    llm: LlmClient,
}

impl LlmSummarizer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    async fn run<O: StructuredOutput>(
        &self,
        flow: &'static str,
        config: &LlmConfig,
        prompt: &str,
    ) -> Result<O, SummarizationError> {
        info!("Running {flow} flow (model: {})", config.model);
        let text = self
            .llm
            .call_json_text(config, prompt, JSON_ONLY_SYSTEM, &O::response_schema())
            .await
            .map_err(|source| SummarizationError::GenerationFailed { flow, source })?;
        parse_output(flow, &text)
    }
}

/// Parses the model's JSON text into the flow's typed output.
pub fn parse_output<O: StructuredOutput>(
    flow: &'static str,
    text: &str,
) -> Result<O, SummarizationError> {
    serde_json::from_str(text).map_err(|e| SummarizationError::InvalidOutput {
        flow,
        message: e.to_string(),
    })
}

pub fn build_summarize_prompt(input: &SummarizeInput) -> String {
    let custom_instructions = match input.custom_prompt.as_deref().map(str::trim) {
        Some(custom) if !custom.is_empty() => format!("Additional instructions: {custom}\n"),
        _ => String::new(),
    };
    SUMMARIZE_PROMPT_TEMPLATE
        .replace("{custom_instructions}", &custom_instructions)
        .replace("{transcript}", &input.transcript)
}

pub fn build_refine_prompt(input: &RefineInput) -> String {
    let prompt = REFINE_PROMPT_TEMPLATE
        .replace("{initial_summary}", &input.initial_summary)
        .replace("{user_edits}", &input.user_edits);
    format!("{prompt}{NO_CHATTER_INSTRUCTION}\n")
}

pub fn build_customize_prompt(input: &CustomizeInput) -> String {
    CUSTOMIZE_PROMPT_TEMPLATE
        .replace("{original_summary}", &input.original_summary)
        .replace("{custom_prompt}", &input.custom_prompt)
        .replace("{transcript}", &input.transcript)
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(
        &self,
        config: &LlmConfig,
        input: &SummarizeInput,
    ) -> Result<SummarizeOutput, SummarizationError> {
        self.run("summarize", config, &build_summarize_prompt(input))
            .await
    }

    async fn refine(
        &self,
        config: &LlmConfig,
        input: &RefineInput,
    ) -> Result<RefineOutput, SummarizationError> {
        self.run("refine", config, &build_refine_prompt(input)).await
    }

    async fn customize(
        &self,
        config: &LlmConfig,
        input: &CustomizeInput,
    ) -> Result<CustomizeOutput, SummarizationError> {
        self.run("customize", config, &build_customize_prompt(input))
            .await
    }
}
