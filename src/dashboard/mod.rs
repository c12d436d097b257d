//! Web dashboard: a static page plus JSON endpoints over the shared market
//! snapshot, the chat assistant and the Prometheus metrics.

use crate::analysis::{strength_board, CurrencyImpact, MarketAnalysis, Opportunity, StrengthBoard, Suggestion};
use crate::assistant::{Assistant, ChatReply};
use crate::news::{NewsItem, SharedSnapshot};
use crate::sessions::session_status;
use crate::utils::error::{Error, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::TcpListener;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardState {
    pub snapshot: SharedSnapshot,
    pub assistant: Arc<Assistant>,
}

impl DashboardState {
    pub fn new(snapshot: SharedSnapshot, assistant: Arc<Assistant>) -> Self {
        Self { snapshot, assistant }
    }
}

// --- Handlers ---
async fn root_handler() -> Html<&'static str> {
    Html(include_str!("static/index.html"))
}

// Typed views: going through `json!` would sort the impact map's keys.
#[derive(Serialize)]
struct NewsView<'a> {
    news: &'a [NewsItem],
    updated_at: Option<DateTime<Utc>>,
    last_error: Option<&'a str>,
}

#[derive(Serialize)]
struct StrengthView<'a> {
    impact: &'a CurrencyImpact,
    board: StrengthBoard,
}

#[derive(Serialize)]
struct OpportunitiesView {
    opportunities: Vec<Opportunity>,
    text: String,
    suggestion: Suggestion,
}

async fn news_handler(State(state): State<DashboardState>) -> Response {
    let snap = state.snapshot.read().await;
    Json(NewsView {
        news: &snap.news,
        updated_at: snap.updated_at,
        last_error: snap.last_error.as_deref(),
    })
    .into_response()
}

async fn strength_handler(State(state): State<DashboardState>) -> Response {
    let snap = state.snapshot.read().await;
    Json(StrengthView { impact: &snap.impact, board: strength_board(&snap.impact) }).into_response()
}

async fn opportunities_handler(State(state): State<DashboardState>) -> Response {
    let impact = state.snapshot.read().await.impact.clone();
    let analysis = MarketAnalysis::from_impact(impact);
    Json(OpportunitiesView {
        opportunities: analysis.opportunities,
        text: analysis.suggestion.to_string(),
        suggestion: analysis.suggestion,
    })
    .into_response()
}

async fn sessions_handler() -> Response {
    Json(session_status(Utc::now())).into_response()
}

#[derive(Debug, Deserialize)]
struct ChatBody {
    message: String,
}

#[derive(Serialize)]
struct ChatView<'a> {
    reply: &'a ChatReply,
    text: String,
}

async fn chat_handler(State(state): State<DashboardState>, Json(body): Json<ChatBody>) -> Response {
    if body.message.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "message must not be empty");
    }
    let news = state.snapshot.read().await.news.clone();
    match state.assistant.respond(&body.message, &news).await {
        | Ok(reply) => Json(ChatView { reply: &reply, text: reply.to_string() }).into_response(),
        | Err(e @ Error::ConfigError(_)) => error_response(StatusCode::SERVICE_UNAVAILABLE, &e.to_string()),
        | Err(e) => error_response(StatusCode::BAD_GATEWAY, &e.to_string()),
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn metrics_handler() -> impl IntoResponse {
    crate::metrics::render()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub fn router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/news", get(news_handler))
        .route("/api/strength", get(strength_handler))
        .route("/api/opportunities", get(opportunities_handler))
        .route("/api/sessions", get(sessions_handler))
        .route("/api/chat", post(chat_handler))
        .route("/healthz", get(health))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Bind `bind_addr`, falling back to a random local port when it is taken.
pub fn bind(bind_addr: &str) -> Result<TcpListener> {
    let listener = match TcpListener::bind(bind_addr) {
        | Ok(l) => l,
        | Err(e) => {
            log::warn!("{} unavailable: {} - binding to random port", bind_addr, e);
            TcpListener::bind("127.0.0.1:0")?
        }
    };
    listener.set_nonblocking(true)?;
    Ok(listener)
}

/// Serve the dashboard on an already bound listener until the server stops.
pub async fn serve(listener: TcpListener, state: DashboardState) -> Result<()> {
    let local_addr = listener.local_addr()?;
    log::info!("Dashboard running at http://{}", local_addr);

    axum::Server::from_tcp(listener)
        .map_err(|e| Error::ConnectionError(format!("failed to create server from listener: {}", e)))?
        .serve(router(state).into_make_service())
        .await
        .map_err(|e| Error::ConnectionError(format!("dashboard server error: {}", e)))
}

/// Bind and serve the dashboard.
pub async fn run(bind_addr: &str, state: DashboardState) -> Result<()> {
    let listener = bind(bind_addr)?;
    serve(listener, state).await
}
