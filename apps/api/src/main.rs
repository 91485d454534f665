mod ats;
mod config;
mod cover_letter;
mod errors;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod summary;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::summary::{DisabledSummaryGenerator, LlmSummaryGenerator, SummaryGenerator};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Summary backend: the API key is handed to the client here and nowhere else.
    let summaries: Arc<dyn SummaryGenerator> = match config.summary.clone() {
        Some(llm_config) => {
            let llm = LlmClient::new(llm_config)?;
            info!("Summary generator initialized (model: {})", llm.model());
            Arc::new(LlmSummaryGenerator(llm))
        }
        None => {
            warn!("SUMMARY_API_KEY not set; summaries will use fallback text");
            Arc::new(DisabledSummaryGenerator)
        }
    };

    info!("Idle sessions expire after {}s", config.session_ttl.as_secs());
    let state = AppState {
        sessions: SessionStore::new(config.session_ttl),
        summaries,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
