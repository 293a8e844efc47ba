//! Cost accounting for BananaVoice voice sessions.
//!
//! Every minute of a voice session is billed by four external services: the
//! WebRTC room provider (audio transport), speech-to-text, the language
//! model, and speech synthesis. This crate turns their per-minute unit prices
//! into live and projected costs.
//!
//! # Core types
//!
//! - [`PricingTable`]: immutable per-minute rates and their derived totals
//! - [`SessionCostTracker`]: accumulates cost for one running session
//! - [`project_monthly`]: monthly projection with savings against a baseline
//!   speech-to-text rate
//!
//! All computation is synchronous. Errors are reported through [`CostError`].

pub mod clock;
pub mod error;
pub mod pricing;
pub mod projection;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::CostError;
pub use pricing::{
    validate_rate, BilledResource, PricingTable, DEFAULT_BASELINE_STT_RATE, DEFAULT_LLM_RATE,
    DEFAULT_STT_RATE, DEFAULT_TRANSPORT_RATE, DEFAULT_TTS_RATE,
};
pub use projection::{project_monthly, ProjectionResult, DAYS_PER_MONTH};
pub use tracker::{CostSnapshot, SessionCostTracker, SessionState, DEFAULT_PARTICIPANTS};
