pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::export::handlers as export;
use crate::state::AppState;
use crate::store::handlers as sessions;
use crate::summarization::handlers as flows;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Export
        .route("/api/generate-pdf", post(export::handle_generate_pdf))
        .route("/api/send-email", post(export::handle_send_email))
        // Summarization flows
        .route("/api/flows/summarize", post(flows::handle_summarize))
        .route("/api/flows/refine", post(flows::handle_refine))
        .route("/api/flows/customize", post(flows::handle_customize))
        // Session history
        .route(
            "/api/v1/sessions/:session/summaries",
            get(sessions::handle_list_summaries).post(sessions::handle_create_summary),
        )
        .route(
            "/api/v1/sessions/:session/selection",
            delete(sessions::handle_clear_selection),
        )
        .route(
            "/api/v1/sessions/:session/summaries/:id",
            delete(sessions::handle_delete_summary),
        )
        .route(
            "/api/v1/sessions/:session/summaries/:id/refine",
            post(sessions::handle_refine_summary),
        )
        .route(
            "/api/v1/sessions/:session/summaries/:id/customize",
            post(sessions::handle_customize_summary),
        )
        .route(
            "/api/v1/sessions/:session/summaries/:id/select",
            post(sessions::handle_select_summary),
        )
        .route(
            "/api/v1/sessions/:session/summaries/:id/pdf",
            post(sessions::handle_summary_pdf),
        )
        .with_state(state)
}
