//! Registry of live voice-session cost trackers.
//!
//! Each voice session gets its own [`SessionCostTracker`], keyed by a
//! generated session ID. The registry is owned by [`crate::AppState`] and
//! passed to handlers explicitly.

use bananavoice_cost::{
    validate_rate, Clock, CostError, CostSnapshot, PricingTable, SessionCostTracker, SystemClock,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use uuid::Uuid;

/// Upper bound on registered sessions, active or idle.
pub const MAX_SESSIONS: usize = 10_000;

/// Errors returned by [`SessionRegistry`] operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    UnknownSession(String),

    #[error(transparent)]
    Cost(#[from] CostError),

    #[error("session registry is full ({0} sessions)")]
    RegistryFull(usize),

    #[error("session registry lock poisoned")]
    LockPoisoned,
}

type TrackerMap<C> = HashMap<String, SessionCostTracker<C>>;

/// Maps session IDs to their cost trackers.
///
/// Uses `std::sync::Mutex` intentionally: every lock acquisition is a brief
/// map operation plus a tracker call, none of which span an `.await` point.
/// Holding the lock for the whole tracker call also keeps each tracker
/// confined to one caller at a time.
#[derive(Debug, Clone)]
pub struct SessionRegistry<C: Clock + Clone = SystemClock> {
    pricing: Arc<PricingTable>,
    baseline_stt_rate: f64,
    clock: C,
    max_sessions: usize,
    sessions: Arc<Mutex<TrackerMap<C>>>,
}

impl SessionRegistry<SystemClock> {
    /// Creates an empty registry backed by the system clock.
    pub fn new(pricing: Arc<PricingTable>, baseline_stt_rate: f64) -> Result<Self, CostError> {
        Self::with_clock(pricing, baseline_stt_rate, SystemClock)
    }
}

impl<C: Clock + Clone> SessionRegistry<C> {
    /// Creates an empty registry whose trackers all read `clock`.
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
            max_sessions: MAX_SESSIONS,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Caps the number of registered sessions at `max_sessions`.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, TrackerMap<C>>, SessionError> {
        self.sessions.lock().map_err(|_| SessionError::LockPoisoned)
    }

    /// Starts a new session and returns its ID with the initial reading.
    ///
    /// When the registry is at capacity, stopped sessions are dropped to
    /// make room. If every registered session is still running the call
    /// fails with [`SessionError::RegistryFull`].
    pub fn open(&self, participants: u32) -> Result<(String, CostSnapshot), SessionError> {
        let mut tracker = SessionCostTracker::with_clock(
            self.pricing.clone(),
            self.baseline_stt_rate,
            self.clock.clone(),
        )?;
        tracker.start(participants)?;
        let snapshot = tracker.current()?;

        let session_id = Uuid::new_v4().to_string();
        {
            let mut sessions = self.lock()?;
            if sessions.len() >= self.max_sessions {
                let before = sessions.len();
                sessions.retain(|_, t| t.is_active());
                tracing::warn!(
                    evicted = before - sessions.len(),
                    max_sessions = self.max_sessions,
                    "session registry at capacity, dropped stopped sessions"
                );
                if sessions.len() >= self.max_sessions {
                    return Err(SessionError::RegistryFull(self.max_sessions));
                }
            }
            sessions.insert(session_id.clone(), tracker);
        }

        tracing::info!(session_id = %session_id, participants, "opened cost session");
        Ok((session_id, snapshot))
    }

    /// Starts an existing session again, resetting its clock.
    pub fn restart(&self, session_id: &str, participants: u32) -> Result<CostSnapshot, SessionError> {
        let mut sessions = self.lock()?;
        let tracker = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;
        tracker.start(participants)?;
        Ok(tracker.current()?)
    }

    /// Reads the cost accumulated so far by a session.
    pub fn snapshot(&self, session_id: &str) -> Result<CostSnapshot, SessionError> {
        let sessions = self.lock()?;
        let tracker = sessions
            .get(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;
        Ok(tracker.current()?)
    }

    /// Stops a session, keeping its idle tracker registered.
    ///
    /// Returns the final reading, or `None` if the session was already idle.
    pub fn stop(&self, session_id: &str) -> Result<Option<CostSnapshot>, SessionError> {
        let mut sessions = self.lock()?;
        let tracker = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;
        Ok(tracker.stop())
    }

    /// Removes a session, stopping it first if it is still running.
    pub fn remove(&self, session_id: &str) -> Result<Option<CostSnapshot>, SessionError> {
        let mut tracker = self
            .lock()?
            .remove(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;

        tracing::info!(session_id = %session_id, "removed cost session");
        Ok(tracker.stop())
    }

    /// Number of registered sessions, active or idle.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of sessions currently being timed.
    pub fn active_count(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|t| t.is_active())
            .count()
    }
}
