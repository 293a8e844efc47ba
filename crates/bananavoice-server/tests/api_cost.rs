mod common;

use axum::http::StatusCode;
use common::{empty_request, json_request, send_json, test_app};
use serde_json::json;

#[tokio::test]
async fn health_check_returns_ok() {
    let app = test_app();
    let (status, json) = send_json(&app, empty_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn pricing_lists_rates_and_totals() {
    let app = test_app();
    let (status, json) = send_json(&app, empty_request("GET", "/api/cost/pricing")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["rates"]["transport"], 0.00099);
    assert_eq!(json["rates"]["speech_to_text"], 0.003);
    assert_eq!(json["rates"]["language_model"], 0.0005);
    assert_eq!(json["rates"]["speech_synthesis"], 0.012);
    assert_eq!(json["baseline_stt_rate"], 0.006);

    let per_minute = json["total_per_minute"].as_f64().unwrap();
    let per_hour = json["total_per_hour"].as_f64().unwrap();
    assert!((per_minute - 0.01649).abs() < 1e-12);
    assert!((per_hour - per_minute * 60.0).abs() < 1e-12);

    let description = json["description"].as_str().unwrap();
    assert!(description.contains("$0.01649/min"));
    assert!(description.contains("/hour"));
}

#[tokio::test]
async fn projection_matches_reference_figures() {
    let app = test_app();
    let (status, json) = send_json(
        &app,
        json_request(
            "POST",
            "/api/cost/projection",
            json!({ "daily_minutes": 60, "participants": 10 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!((json["daily_cost"].as_f64().unwrap() - 9.894).abs() < 1e-9);
    assert!((json["monthly_cost"].as_f64().unwrap() - 296.82).abs() < 1e-8);
    assert!((json["baseline_monthly_cost"].as_f64().unwrap() - 350.82).abs() < 1e-8);
    assert!((json["monthly_savings"].as_f64().unwrap() - 54.0).abs() < 1e-8);
    assert!((json["savings_percentage"].as_f64().unwrap() - 15.39).abs() < 0.01);
    assert_eq!(json["participants"], 10);
}

#[tokio::test]
async fn projection_defaults_to_one_participant() {
    let app = test_app();
    let (status, json) = send_json(
        &app,
        json_request("POST", "/api/cost/projection", json!({ "daily_minutes": 30 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["participants"], 1);
}

#[tokio::test]
async fn projection_with_zero_minutes_is_rejected() {
    let app = test_app();
    let (status, json) = send_json(
        &app,
        json_request("POST", "/api/cost/projection", json!({ "daily_minutes": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("division by zero"));
}

#[tokio::test]
async fn projection_with_invalid_inputs_is_rejected() {
    let app = test_app();

    let (status, json) = send_json(
        &app,
        json_request("POST", "/api/cost/projection", json!({ "daily_minutes": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("invalid argument"));

    let (status, _) = send_json(
        &app,
        json_request(
            "POST",
            "/api/cost/projection",
            json!({ "daily_minutes": 10, "participants": 0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
