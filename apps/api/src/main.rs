mod config;
mod errors;
mod export;
mod layout;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;
mod summarization;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::export::mailer::SmtpMailer;
use crate::layout::{default_page_geometry, PageGeometry};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::SummaryStore;
use crate::summarization::LlmSummarizer;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting NoteAI API v{}", env!("CARGO_PKG_VERSION"));

    // Model settings are passed into each flow call
    let llm_config = config.llm_config();
    let summarizer = Arc::new(LlmSummarizer::new(LlmClient::new()));
    info!("Summarizer initialized (model: {})", llm_config.model);

    let mailer = Arc::new(SmtpMailer::new(
        &config.smtp_host,
        &config.email_user,
        &config.email_pass,
    )?);
    info!("SMTP relay initialized ({})", config.smtp_host);

    let store = match &config.store_path {
        Some(path) => SummaryStore::open(path).await?,
        None => {
            info!("STORE_PATH not set; session history is kept in memory");
            SummaryStore::in_memory()
        }
    };

    let page_geometry = PageGeometry {
        font: config.pdf_font,
        ..default_page_geometry()
    };
    page_geometry.validate()?;
    info!(
        "Page geometry: {:?} {}pt on {}x{}",
        page_geometry.font,
        page_geometry.body_font_size,
        page_geometry.page_width,
        page_geometry.page_height
    );

    // Build app state
    let state = AppState {
        llm_config,
        summarizer,
        mailer,
        store: Arc::new(store),
        page_geometry,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
