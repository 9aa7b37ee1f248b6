mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use lia_agent::OpenAiBackend;
use lia_core::{
    agent::ChatBackend, config::Config, pipeline::ResponsePipeline, topics::TopicCache,
};
use lia_data::DataService;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

use routes::*;

// ── AppState ──────────────────────────────────────────────────────────────

pub struct AppState {
    pub config: Arc<Config>,
    pub data: Arc<DataService>,
    pub topics: Arc<TopicCache>,
    pub pipeline: ResponsePipeline,
    pub backend: Arc<dyn ChatBackend>,
}

// ── main ──────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "lia_server=info,lia_core=info,lia_data=info,lia_agent=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = Arc::new(Config::from_env()?);
    log_config_status(&config);

    let data = Arc::new(DataService::new(&config)?);
    let topics = Arc::new(TopicCache::new(data.clone()));
    let backend: Arc<dyn ChatBackend> = Arc::new(
        OpenAiBackend::new(&config.openai_api_key, &config.openai_base_url)
            .with_timeout(config.http_timeout_s),
    );

    let state = Arc::new(AppState {
        config: Arc::clone(&config),
        data,
        pipeline: ResponsePipeline::new(Arc::clone(&topics)),
        topics,
        backend,
    });

    let app = build_router(state, &config.public_dir);

    let addr = format!("{}:{}", config.web_bind, config.web_port);
    info!("Listening on {addr}, serving files from {}", config.public_dir);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn log_config_status(config: &Config) {
    let status = config.status();
    info!(
        openai = status.openai.configured,
        google_sheets = status.google.configured,
        hubspot = status.hubspot.configured,
        model = %status.openai.model,
        "configuration status"
    );
    for error in &status.validation.errors {
        warn!("configuration issue: {error}");
    }
}

pub fn build_router(state: Arc<AppState>, public_dir: &str) -> Router {
    let serve_dir = ServeDir::new(public_dir)
        .fallback(ServeFile::new(format!("{public_dir}/index.html")));

    Router::new()
        // Health
        .route("/health", get(health))
        // Chat
        .route("/api/chat", post(chat))
        .route("/api/test", get(test_connection))
        .route("/api/render", post(render))
        // Data
        .route("/api/articles", get(list_articles))
        .route("/api/articles/:slug", get(get_article))
        .route("/api/law-firms", get(list_law_firms))
        .route("/api/settlements", get(list_settlements))
        .route("/api/search/:condition", get(search_condition))
        .route("/api/cache/clear", post(clear_cache))
        // Config
        .route("/api/config/status", get(config_status))
        // Active cases
        .route("/api/lia/active-cases", get(active_cases))
        .route("/api/lia/check-case", post(check_case))
        .route("/api/lia/refresh", post(refresh_cases))
        // Static site
        .route_service(
            "/article/:slug",
            ServeFile::new(format!("{public_dir}/article.html")),
        )
        .fallback_service(serve_dir)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
