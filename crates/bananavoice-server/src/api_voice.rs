//! Voice API handlers for TTS and STT.

use crate::{api::ApiError, AppState};
use axum::{
    extract::{Extension, Multipart},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

fn default_voice() -> String {
    "default".to_string()
}

/// Request body for `POST /api/voice/tts`.
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(default = "default_voice")]
    pub voice: String,
}

/// Response body for `POST /api/voice/stt`.
#[derive(Debug, Serialize)]
pub struct SttResponse {
    pub text: String,
    pub confidence: f32,
}

/// Handler for `GET /api/voice/health`.
pub async fn voice_health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "voice"
    }))
}

/// Handler for `POST /api/voice/tts`.
///
/// Returns the rendered speech as a WAV attachment.
pub async fn tts_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<TtsRequest>,
) -> Result<Response, ApiError> {
    tracing::debug!(voice = %payload.voice, chars = payload.text.chars().count(), "tts request");

    let tts = state.tts_service.clone();
    let audio = tokio::task::spawn_blocking(move || tts.synthesize(&payload.text))
        .await
        .map_err(|e| ApiError::InternalServerError(format!("task join error: {}", e)))?
        .map_err(|e| ApiError::InternalServerError(format!("TTS processing failed: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/wav"),
            (header::CONTENT_DISPOSITION, "attachment; filename=speech.wav"),
        ],
        audio,
    )
        .into_response())
}

/// Handler for `POST /api/voice/stt`.
///
/// Expects a multipart form with an `audio` file field.
pub async fn stt_handler(
    Extension(state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SttResponse>, ApiError> {
    let mut audio = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {}", e)))?
    {
        if field.name() != Some("audio") {
            continue;
        }

        let is_audio = field
            .content_type()
            .is_some_and(|ct| ct.starts_with("audio/"));
        if !is_audio {
            return Err(ApiError::BadRequest("Invalid audio file format".to_string()));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read audio upload: {}", e)))?;
        audio = Some(bytes);
        break;
    }

    let audio = audio.ok_or_else(|| ApiError::BadRequest("missing audio field".to_string()))?;
    let transcription = state
        .stt_service
        .transcribe(&audio)
        .map_err(|e| ApiError::InternalServerError(format!("STT processing failed: {}", e)))?;

    Ok(Json(SttResponse {
        text: transcription.text,
        confidence: transcription.confidence,
    }))
}
