use std::sync::Arc;

use crate::export::mailer::Mailer;
use crate::layout::PageGeometry;
use crate::llm_client::LlmConfig;
use crate::store::SummaryStore;
use crate::summarization::Summarizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model settings passed into each flow call.
    pub llm_config: LlmConfig,
    /// Pluggable summarization backend. Default: LlmSummarizer.
    pub summarizer: Arc<dyn Summarizer>,
    /// Pluggable mail relay. Default: SmtpMailer.
    pub mailer: Arc<dyn Mailer>,
    pub store: Arc<SummaryStore>,
    /// Page and font settings for exported summaries.
    pub page_geometry: PageGeometry,
}
