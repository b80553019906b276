//! dinebot HTTP server.
//!
//! **Chat:**
//! - `POST /chat`: `{message}` → `{response}`
//! - `POST /api/query`: `{message}` → `{answer, actions}`
//! - `POST /classify`: `{message}` → intent, scores and deciding rule
//!
//! **Admin:**
//! - `POST /reload`: re-read the data directory and swap the snapshot
//!
//! **Health:**
//! - `GET  /`: liveness message
//! - `GET  /health`: server status and snapshot counts
//!
//! Build and run: `cargo run --features server --bin dinebot-server`

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use dinebot::assistant::Assistant;
use dinebot::config::NluConfig;
use dinebot::data::RestaurantData;
use dinebot::nlu::Classification;

// ── Server state ──────────────────────────────────────────────────────────

struct ServerState {
    data_dir: PathBuf,
    /// Replaced wholesale on reload; handlers clone the `Arc` and drop the lock.
    assistant: RwLock<Arc<Assistant>>,
}

impl ServerState {
    async fn assistant(&self) -> Arc<Assistant> {
        Arc::clone(&*self.assistant.read().await)
    }
}

// ── Request / response types ──────────────────────────────────────────────

#[derive(Deserialize)]
struct MessageRequest {
    message: String,
}

#[derive(Serialize)]
struct RootResponse {
    message: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    restaurant: String,
    menu_items: usize,
    faqs: usize,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
}

#[derive(Serialize)]
struct QueryResponse {
    answer: String,
    actions: Vec<String>,
}

#[derive(Serialize)]
struct ReloadResponse {
    reloaded: bool,
    menu_items: usize,
    faqs: usize,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "dinebot server is running!".to_string(),
    })
}

async fn health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    let assistant = state.assistant().await;
    let data = assistant.data();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        restaurant: data.restaurant_name.clone(),
        menu_items: data.catalog.item_count(),
        faqs: data.faqs.len(),
    })
}

async fn chat(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<MessageRequest>,
) -> Json<ChatResponse> {
    let reply = state.assistant().await.reply(&req.message);
    Json(ChatResponse {
        response: reply.answer,
    })
}

async fn api_query(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<MessageRequest>,
) -> Json<QueryResponse> {
    let reply = state.assistant().await.reply(&req.message);
    Json(QueryResponse {
        answer: reply.answer,
        actions: reply.actions,
    })
}

async fn classify(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<MessageRequest>,
) -> Json<Classification> {
    Json(state.assistant().await.classify(&req.message))
}

async fn reload(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    let data = RestaurantData::load(&state.data_dir).map_err(|e| {
        tracing::warn!(dir = %state.data_dir.display(), "reload failed: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to reload restaurant data: {e}"),
        )
    })?;
    let response = ReloadResponse {
        reloaded: true,
        menu_items: data.catalog.item_count(),
        faqs: data.faqs.len(),
    };

    let mut current = state.assistant.write().await;
    *current = Arc::new(current.with_data(Arc::new(data)));
    tracing::info!(
        menu_items = response.menu_items,
        faqs = response.faqs,
        "restaurant data reloaded"
    );
    Ok(Json(response))
}

// ── Main ──────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let bind = std::env::var("DINEBOT_SERVER_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("DINEBOT_SERVER_PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("{bind}:{port}");

    let config = NluConfig::bundled().unwrap_or_else(|e| {
        tracing::error!("bundled NLU config is invalid: {e}");
        std::process::exit(1);
    });
    let data_dir = RestaurantData::discover(None).unwrap_or_else(|e| {
        tracing::error!("{e}");
        std::process::exit(1);
    });
    let data = RestaurantData::load(&data_dir).unwrap_or_else(|e| {
        tracing::error!("failed to load restaurant data: {e}");
        std::process::exit(1);
    });

    let state = Arc::new(ServerState {
        data_dir,
        assistant: RwLock::new(Arc::new(Assistant::from_config(&config, Arc::new(data)))),
    });

    let app = Router::new()
        // Health.
        .route("/", get(root))
        .route("/health", get(health))
        // Chat.
        .route("/chat", post(chat))
        .route("/api/query", post(api_query))
        .route("/classify", post(classify))
        // Admin.
        .route("/reload", post(reload))
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("dinebot server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
