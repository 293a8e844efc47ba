//! Live session cost API handlers.
//!
//! The voice-room orchestration layer opens a session when a call begins,
//! polls it for live display, and stops it when the call ends.

use crate::{api::ApiError, AppState};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use bananavoice_cost::{CostSnapshot, DEFAULT_PARTICIPANTS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn default_participants() -> u32 {
    DEFAULT_PARTICIPANTS
}

/// Request body for opening or restarting a session.
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    #[serde(default = "default_participants")]
    pub participants: u32,
}

/// Response body carrying a live cost reading.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub snapshot: CostSnapshot,
}

/// Response body for `POST /api/sessions/:sessionId/stop`.
#[derive(Debug, Serialize)]
pub struct StopSessionResponse {
    pub session_id: String,
    /// Final reading, absent if the session was already stopped.
    pub final_cost: Option<CostSnapshot>,
}

/// Handler for `POST /api/sessions`.
pub async fn create_session_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let (session_id, snapshot) = state.sessions.open(payload.participants)?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            snapshot,
        }),
    ))
}

/// Handler for `GET /api/sessions/:sessionId`.
pub async fn get_session_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let snapshot = state.sessions.snapshot(&session_id)?;
    Ok(Json(SessionResponse {
        session_id,
        snapshot,
    }))
}

/// Handler for `POST /api/sessions/:sessionId/start`.
pub async fn restart_session_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let snapshot = state.sessions.restart(&session_id, payload.participants)?;
    Ok(Json(SessionResponse {
        session_id,
        snapshot,
    }))
}

/// Handler for `POST /api/sessions/:sessionId/stop`.
pub async fn stop_session_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<StopSessionResponse>, ApiError> {
    let final_cost = state.sessions.stop(&session_id)?;
    Ok(Json(StopSessionResponse {
        session_id,
        final_cost,
    }))
}

/// Handler for `DELETE /api/sessions/:sessionId`.
pub async fn delete_session_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.sessions.remove(&session_id)?;
    Ok(StatusCode::NO_CONTENT)
}
