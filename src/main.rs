// LLMChat backend
// HTTP service behind the chat front-end: relays prompts to a local Ollama instance

use axum::Router;
use std::fmt::Write as FmtWrite;
use std::fs::OpenOptions;
use std::io::LineWriter;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Custom time formatter: [HH:mm:ss] [llmchat]
#[derive(Clone)]
struct RelayTimer;

impl FormatTime for RelayTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        write!(w, "[{}] [llmchat]", now.format("%H:%M:%S"))
    }
}

mod config;
mod error;
mod llm;
mod models;
mod routes;
mod services;

use config::Config;
use llm::OllamaClient;
use routes::{health_routes, messages_routes, models_routes};
use services::HistoryService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ollama: Arc<OllamaClient>,
    pub history: Arc<HistoryService>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load config before tracing so the log file path is known
    let config = Config::from_env();

    // Open log file; LineWriter flushes after each line so logs appear immediately
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .expect("Failed to open log file");
    let line_writer = LineWriter::new(log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(line_writer);

    // Initialize tracing with both stdout and file output
    // Format: [HH:mm:ss] [llmchat] message
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "llmchat_backend=info,tower_http=info".into()),
        )
        // Stdout layer
        .with(
            fmt::layer()
                .with_timer(RelayTimer)
                .with_target(false)
                .with_level(false)
                .with_ansi(true),
        )
        // File layer (same format, no ANSI colors)
        .with(
            fmt::layer()
                .with_timer(RelayTimer)
                .with_target(false)
                .with_level(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    if let Err(e) = config.validate() {
        tracing::error!("Configuration error: {}", e);
    }

    // Initialize the Ollama client
    let ollama = Arc::new(OllamaClient::new(
        config.ollama_base_url.clone(),
        config.generation_timeout,
    ));

    // Probe the backend once so a missing Ollama shows up in the logs right away
    if ollama.check_connection().await {
        tracing::info!("Connected to Ollama at {}", config.ollama_base_url);
    } else {
        tracing::warn!(
            "Ollama is not reachable at {} - generation requests will fail until it is started",
            config.ollama_base_url
        );
    }

    // Create app state
    let state = AppState {
        ollama,
        history: Arc::new(HistoryService::new()),
        config: Arc::new(config.clone()),
    };

    // Build CORS layer; the front-end is served separately
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(health_routes())
        .merge(models_routes())
        .merge(messages_routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting LLMChat backend on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
