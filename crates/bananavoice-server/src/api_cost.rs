//! Pricing and projection API handlers.

use crate::{api::ApiError, AppState};
use axum::{extract::Extension, Json};
use bananavoice_cost::{project_monthly, PricingTable, ProjectionResult, DEFAULT_PARTICIPANTS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn default_participants() -> u32 {
    DEFAULT_PARTICIPANTS
}

/// Response body for `GET /api/cost/pricing`.
#[derive(Debug, Serialize)]
pub struct PricingResponse {
    pub rates: PricingTable,
    pub total_per_minute: f64,
    pub total_per_hour: f64,
    pub baseline_stt_rate: f64,
    /// Human-readable breakdown.
    pub description: String,
}

/// Request body for `POST /api/cost/projection`.
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    pub daily_minutes: f64,
    #[serde(default = "default_participants")]
    pub participants: u32,
}

/// Handler for `GET /api/cost/pricing`.
pub async fn get_pricing_handler(Extension(state): Extension<Arc<AppState>>) -> Json<PricingResponse> {
    let pricing = *state.pricing;
    Json(PricingResponse {
        rates: pricing,
        total_per_minute: pricing.total_per_minute(),
        total_per_hour: pricing.total_per_hour(),
        baseline_stt_rate: state.baseline_stt_rate,
        description: pricing.describe(),
    })
}

/// Handler for `POST /api/cost/projection`.
///
/// Projects monthly cost for the given daily usage against the configured
/// baseline speech-to-text rate.
pub async fn projection_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<ProjectionRequest>,
) -> Result<Json<ProjectionResult>, ApiError> {
    let result = project_monthly(
        payload.daily_minutes,
        payload.participants,
        &state.pricing,
        state.baseline_stt_rate,
    )?;
    Ok(Json(result))
}
