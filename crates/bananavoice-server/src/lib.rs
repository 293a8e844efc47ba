//! BananaVoice server library logic.

pub mod api;
pub mod api_cost;
pub mod api_sessions;
pub mod api_voice;
pub mod config;
pub mod sessions;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use bananavoice_cost::{CostError, PricingTable};
use bananavoice_voice::{SttService, TtsService, MAX_STT_INPUT_BYTES};
use serde_json::{json, Value};
use sessions::SessionRegistry;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Per-minute rates of the billed voice services.
    pub pricing: Arc<PricingTable>,
    /// Speech-to-text rate that savings are reported against.
    pub baseline_stt_rate: f64,
    /// Cost trackers for live voice sessions.
    pub sessions: SessionRegistry,
    /// TTS service.
    pub tts_service: Arc<TtsService>,
    /// STT service.
    pub stt_service: Arc<SttService>,
}

impl AppState {
    /// Builds state with an empty session registry and default voice services.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::InvalidArgument`] if `baseline_stt_rate` is not a
    /// valid rate.
    pub fn new(pricing: PricingTable, baseline_stt_rate: f64) -> Result<Self, CostError> {
        let pricing = Arc::new(pricing);
        let sessions = SessionRegistry::new(pricing.clone(), baseline_stt_rate)?;
        Ok(Self {
            pricing,
            baseline_stt_rate,
            sessions,
            tts_service: Arc::new(TtsService::default()),
            stt_service: Arc::new(SttService::new()),
        })
    }
}

/// Maximum request body size (2 MiB). Protects against OOM from oversized payloads.
const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Body limit for audio uploads: the STT input cap plus room for multipart framing.
const MAX_UPLOAD_BODY_BYTES: usize = MAX_STT_INPUT_BYTES + 64 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let upload_routes = Router::new()
        .route("/api/voice/stt", post(api_voice::stt_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES));

    Router::new()
        .route("/health", get(health))
        .route("/api/voice/health", get(api_voice::voice_health_handler))
        .route("/api/voice/tts", post(api_voice::tts_handler))
        .route("/api/cost/pricing", get(api_cost::get_pricing_handler))
        .route("/api/cost/projection", post(api_cost::projection_handler))
        .route("/api/sessions", post(api_sessions::create_session_handler))
        .route(
            "/api/sessions/{sessionId}",
            get(api_sessions::get_session_handler).delete(api_sessions::delete_session_handler),
        )
        .route(
            "/api/sessions/{sessionId}/start",
            post(api_sessions::restart_session_handler),
        )
        .route(
            "/api/sessions/{sessionId}/stop",
            post(api_sessions::stop_session_handler),
        )
        .merge(upload_routes)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
