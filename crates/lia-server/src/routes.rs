use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use lia_agent::openai::connection_test_request;
use lia_core::{
    agent::{build_chat_request, ChatMessage, ChatOptions},
    prompts::SystemPromptKind,
    referral::has_legal_intent,
    types::Origin,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::AppState;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

// ── Error helpers ─────────────────────────────────────────────────────────

pub(crate) fn internal(e: impl std::fmt::Display) -> (StatusCode, Json<Value>) {
    tracing::error!("internal error: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
}

fn bad_request(msg: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": msg })))
}

fn blank(v: Option<&str>) -> bool {
    v.map_or(true, |s| s.trim().is_empty())
}

// ── Request body types ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(crate) struct ArticleContext {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChatBody {
    pub message: Option<String>,
    pub system_message: Option<String>,
    pub article: Option<ArticleContext>,
    #[serde(default)]
    pub options: ChatOptions,
}

#[derive(Deserialize)]
pub(crate) struct LawFirmQuery {
    pub specialty: Option<String>,
    pub location: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct SettlementQuery {
    pub condition: Option<String>,
    pub state: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct CheckCaseBody {
    pub query: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct RenderBody {
    pub text: Option<String>,
}

// ── Handlers ──────────────────────────────────────────────────────────────

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now().to_rfc3339() }))
}

// Chat

/// Caller's system message wins; otherwise article context, then legal or general.
fn system_prompt(body: &ChatBody, message: &str) -> String {
    if let Some(custom) = body.system_message.as_deref().filter(|s| !s.trim().is_empty()) {
        return custom.to_string();
    }
    let kind = match &body.article {
        Some(a) => SystemPromptKind::Article {
            title: a.title.clone(),
            content: a.content.clone(),
        },
        None if has_legal_intent(message) => SystemPromptKind::LegalReferral,
        None => SystemPromptKind::General,
    };
    kind.render()
}

pub(crate) async fn chat(State(state): State<Arc<AppState>>, Json(body): Json<ChatBody>) -> ApiResult {
    if blank(body.message.as_deref()) {
        return Err(bad_request("Message is required"));
    }
    let message = body.message.as_deref().unwrap_or_default();
    info!(message_len = message.len(), "chat request");

    let messages = vec![
        ChatMessage::system(system_prompt(&body, message)),
        ChatMessage::user(message),
    ];
    let request = build_chat_request(&state.config, messages, &body.options);

    match state.backend.complete(request).await {
        Ok(completion) => {
            let processed = state.pipeline.process(&completion.content).await;
            Ok(Json(json!({
                "response": completion.content,
                "html": processed.html,
                "banned": processed.banned,
                "activeCase": processed.active_case,
                "referralAdded": processed.referral_added,
                "usage": completion.usage,
            })))
        },
        Err(e) => {
            warn!("chat backend error: {e}");
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Err((status, Json(json!({ "error": e.user_message() }))))
        },
    }
}

pub(crate) async fn test_connection(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let request = connection_test_request(&state.config.openai_model);
    match state.backend.complete(request).await {
        Ok(completion) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "OpenAI API connection successful",
                "response": completion.content,
            })),
        ),
        Err(e) => {
            warn!("connection test failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": e.to_string(),
                    "details": "Check your API key in .env.local",
                })),
            )
        },
    }
}

pub(crate) async fn render(State(state): State<Arc<AppState>>, Json(body): Json<RenderBody>) -> ApiResult {
    let Some(text) = body.text else {
        return Err(bad_request("Text is required"));
    };
    let processed = state.pipeline.process(&text).await;
    serde_json::to_value(processed).map(Json).map_err(internal)
}

// Data

pub(crate) async fn list_articles(State(state): State<Arc<AppState>>) -> ApiResult {
    let articles = state.data.all_articles().await;
    info!(count = articles.len(), "returning articles");
    serde_json::to_value(articles).map(Json).map_err(internal)
}

pub(crate) async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult {
    match state.data.article(&slug).await {
        Some(article) => serde_json::to_value(article).map(Json).map_err(internal),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Article not found" })),
        )),
    }
}

pub(crate) async fn list_law_firms(
    State(state): State<Arc<AppState>>,
    Query(q): Query<LawFirmQuery>,
) -> ApiResult {
    let firms = state
        .data
        .law_firms(q.specialty.as_deref(), q.location.as_deref())
        .await;
    serde_json::to_value(firms).map(Json).map_err(internal)
}

pub(crate) async fn list_settlements(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SettlementQuery>,
) -> ApiResult {
    let settlements = state
        .data
        .settlement_data(q.condition.as_deref(), q.state.as_deref())
        .await;
    serde_json::to_value(settlements).map(Json).map_err(internal)
}

pub(crate) async fn search_condition(
    State(state): State<Arc<AppState>>,
    Path(condition): Path<String>,
) -> ApiResult {
    let topics = state.topics.snapshot().await;
    let result = state.data.search_condition(&condition, &topics).await;
    serde_json::to_value(result).map(Json).map_err(internal)
}

pub(crate) async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.data.clear_cache();
    Json(json!({ "message": "Cache cleared successfully" }))
}

// Config

pub(crate) async fn config_status(State(state): State<Arc<AppState>>) -> ApiResult {
    serde_json::to_value(state.config.status()).map(Json).map_err(internal)
}

// Active cases

fn source_message(source: Origin) -> &'static str {
    match source {
        Origin::Fallback => "Using fallback data - Google Sheets not available",
        Origin::Remote => "Data loaded from Google Sheets",
    }
}

pub(crate) async fn active_cases(State(state): State<Arc<AppState>>) -> ApiResult {
    let set = state.topics.snapshot().await;
    let mut body = serde_json::to_value(&*set).map_err(internal)?;
    body["message"] = json!(source_message(set.source));
    Ok(Json(body))
}

pub(crate) async fn refresh_cases(State(state): State<Arc<AppState>>) -> ApiResult {
    let set = state.topics.refresh().await;
    let mut body = serde_json::to_value(&*set).map_err(internal)?;
    body["message"] = json!(source_message(set.source));
    Ok(Json(body))
}

pub(crate) async fn check_case(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CheckCaseBody>,
) -> ApiResult {
    if blank(body.query.as_deref()) {
        return Err(bad_request("Query is required"));
    }
    let query = body.query.unwrap_or_default();
    let result = state.topics.classify(&query).await;
    info!(is_active = result.is_active, "checked query against active cases");

    let mut out = serde_json::to_value(result).map_err(internal)?;
    out["query"] = json!(query);
    out["timestamp"] = json!(Utc::now().to_rfc3339());
    Ok(Json(out))
}
