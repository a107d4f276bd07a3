use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interview_api::config::{Config, NerBackend};
use interview_api::interview::follow_up::LlmFollowUpGenerator;
use interview_api::interview::session_log::SessionLog;
use interview_api::llm_client::{self, LlmClient};
use interview_api::ner::{EntityRecognizer, HttpEntityRecognizer, LlmEntityRecognizer};
use interview_api::routes::build_router;
use interview_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("interview_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let recognizer: Arc<dyn EntityRecognizer> = match &config.ner_backend {
        NerBackend::Http { url } => {
            info!("Entity recognizer: tagger service at {url}");
            Arc::new(HttpEntityRecognizer::new(url.clone())?)
        }
        NerBackend::Llm => {
            info!("Entity recognizer: completion model");
            Arc::new(LlmEntityRecognizer(llm.clone()))
        }
    };

    let session_log = SessionLog::new(config.log_path.clone());
    match session_log.count().await {
        Ok(n) => info!(
            "Session log at {} holds {n} records",
            session_log.path().display()
        ),
        Err(e) => warn!(
            "Session log at {} is unreadable ({e}); appends will continue",
            session_log.path().display()
        ),
    }

    let state = AppState {
        recognizer,
        follow_up: Arc::new(LlmFollowUpGenerator(llm)),
        session_log: Arc::new(session_log),
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
