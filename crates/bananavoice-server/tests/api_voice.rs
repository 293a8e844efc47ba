mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{empty_request, json_request, send, send_json, test_app};
use serde_json::json;
use std::io::Cursor;

const BOUNDARY: &str = "bananavoice-test-boundary";

fn multipart_request(field: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"clip.wav\"\r\n",
            field
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/voice/stt")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_voice_health_endpoint() {
    let app = test_app();
    let (status, json) = send_json(&app, empty_request("GET", "/api/voice/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "voice");
}

#[tokio::test]
async fn test_tts_endpoint_returns_wav_attachment() {
    let app = test_app();
    let response = tower::ServiceExt::oneshot(
        app,
        json_request(
            "POST",
            "/api/voice/tts",
            json!({ "text": "Hello World", "voice": "default" }),
        ),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "audio/wav");
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=speech.wav"
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.starts_with(b"RIFF"));
    let reader = hound::WavReader::new(Cursor::new(body.to_vec())).unwrap();
    assert_eq!(reader.spec().sample_rate, 16_000);
}

#[tokio::test]
async fn test_tts_voice_is_optional() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request("POST", "/api/voice/tts", json!({ "text": "Hi" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.is_empty());
}

#[tokio::test]
async fn test_tts_oversized_text_fails() {
    let app = test_app();
    let (status, json) = send_json(
        &app,
        json_request(
            "POST",
            "/api/voice/tts",
            json!({ "text": "a".repeat(5000) }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("TTS processing failed"));
}

#[tokio::test]
async fn test_stt_endpoint_transcribes_upload() {
    let app = test_app();
    let audio = b"dummy_audio_data".repeat(100);
    let (status, json) = send_json(&app, multipart_request("audio", "audio/wav", &audio)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["text"]
        .as_str()
        .unwrap()
        .contains("Hello from BananaVoice"));
    assert!((json["confidence"].as_f64().unwrap() - 0.95).abs() < 1e-6);
}

#[tokio::test]
async fn test_stt_rejects_non_audio_upload() {
    let app = test_app();
    let (status, json) =
        send_json(&app, multipart_request("audio", "text/plain", b"not audio")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid audio file format");
}

#[tokio::test]
async fn test_stt_requires_audio_field() {
    let app = test_app();
    let (status, json) =
        send_json(&app, multipart_request("file", "audio/wav", &[0u8; 2048])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "missing audio field");
}
