//! Stopwatch-style cost accumulation for a single live voice session.

use crate::clock::{Clock, SystemClock};
use crate::error::CostError;
use crate::pricing::{validate_rate, PricingTable};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Participant count used when the caller does not specify one.
pub const DEFAULT_PARTICIPANTS: u32 = 1;

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Whether a tracker is currently timing a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    Idle,
    Active {
        /// Monotonic reading taken at `start`.
        started: Instant,
        /// Wall-clock time of `start`, for display.
        started_at: DateTime<Utc>,
        participants: u32,
    },
}

/// Cost of an active session up to the moment it was read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSnapshot {
    pub started_at: DateTime<Utc>,
    pub elapsed_minutes: f64,
    pub participants: u32,
    pub cost_per_minute: f64,
    pub total_cost: f64,
    /// What the same session would have saved against the baseline
    /// speech-to-text rate.
    pub savings_vs_baseline: f64,
}

/// Accumulates cost for one voice session.
///
/// A tracker belongs to exactly one session and has no internal locking;
/// callers that reach it from several tasks must serialize access themselves.
#[derive(Debug)]
pub struct SessionCostTracker<C: Clock = SystemClock> {
    pricing: Arc<PricingTable>,
    baseline_stt_rate: f64,
    clock: C,
    state: SessionState,
}

impl SessionCostTracker<SystemClock> {
    /// Creates an idle tracker that reads the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::InvalidArgument`] if `baseline_stt_rate` is
    /// negative or not finite.
    pub fn new(pricing: Arc<PricingTable>, baseline_stt_rate: f64) -> Result<Self, CostError> {
        Self::with_clock(pricing, baseline_stt_rate, SystemClock)
    }
}

impl<C: Clock> SessionCostTracker<C> {
    /// Creates an idle tracker reading time from `clock`.
    pub fn with_clock(
        pricing: Arc<PricingTable>,
        baseline_stt_rate: f64,
        clock: C,
    ) -> Result<Self, CostError> {
        validate_rate("baseline speech-to-text", baseline_stt_rate)?;
        Ok(Self {
            pricing,
            baseline_stt_rate,
            clock,
            state: SessionState::Idle,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    /// Starts timing a session for `participants` participants.
    ///
    /// Starting an already active tracker resets its clock.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::InvalidArgument`] if `participants` is zero.
    pub fn start(&mut self, participants: u32) -> Result<(), CostError> {
        if participants == 0 {
            return Err(CostError::InvalidArgument(
                "participants must be at least 1".to_string(),
            ));
        }

        if self.is_active() {
            tracing::debug!(participants, "restarting active cost session");
        }

        self.state = SessionState::Active {
            started: self.clock.now(),
            started_at: Utc::now(),
            participants,
        };
        tracing::debug!(participants, "cost session started");
        Ok(())
    }

    /// Reads the cost accumulated so far without changing any state.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::NoActiveSession`] if the tracker was never started
    /// or has been stopped.
    pub fn current(&self) -> Result<CostSnapshot, CostError> {
        let SessionState::Active {
            started,
            started_at,
            participants,
        } = self.state
        else {
            return Err(CostError::NoActiveSession);
        };

        let elapsed_minutes =
            self.clock.now().saturating_duration_since(started).as_secs_f64() / SECONDS_PER_MINUTE;
        let billed_minutes = elapsed_minutes * f64::from(participants);
        let cost_per_minute = self.pricing.total_per_minute();

        Ok(CostSnapshot {
            started_at,
            elapsed_minutes,
            participants,
            cost_per_minute,
            total_cost: cost_per_minute * billed_minutes,
            savings_vs_baseline: (self.baseline_stt_rate - self.pricing.speech_to_text())
                * billed_minutes,
        })
    }

    /// Ends the session and returns its final cost.
    ///
    /// Returns `None` when no session is active.
    pub fn stop(&mut self) -> Option<CostSnapshot> {
        let snapshot = self.current().ok()?;
        self.state = SessionState::Idle;

        tracing::info!(
            elapsed_minutes = snapshot.elapsed_minutes,
            participants = snapshot.participants,
            total_cost = snapshot.total_cost,
            "cost session stopped"
        );
        Some(snapshot)
    }
}
