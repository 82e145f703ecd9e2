//! Crash/Failure Monitor.
//!
//! Tracks per-surface recovery state and decides, for every renderer crash or
//! severe load failure, whether to schedule a delayed reload or give up and
//! mark the surface terminal. Owns the pending retry timer handle of each
//! surface so teardown can cancel it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::services::scheduler::TimerId;
use crate::types::surface::{LoadFailure, RenderExitReason, SurfaceId};

/// Automatic reloads allowed before a surface is marked terminal.
pub const MAX_RECOVERY_ATTEMPTS: u32 = 2;
/// Delay between a failure and its reload, to avoid tight crash loops.
pub const RECOVERY_DELAY: Duration = Duration::from_secs(3);
/// Load failures count only when their code is below this value.
/// Codes in `-1..=-100` are cancellations and other benign conditions.
pub const FAILURE_CODE_THRESHOLD: i32 = -100;

/// Tunables for the recovery policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryPolicy {
    pub ceiling: u32,
    pub retry_delay: Duration,
    pub failure_code_threshold: i32,
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self {
            ceiling: MAX_RECOVERY_ATTEMPTS,
            retry_delay: RECOVERY_DELAY,
            failure_code_threshold: FAILURE_CODE_THRESHOLD,
        }
    }
}

/// Recovery bookkeeping for one surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryState {
    pub attempts: u32,
    pub last_failure: Option<Instant>,
    pub terminal: bool,
    pending: Option<TimerId>,
}

impl RecoveryState {
    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }
}

/// Outcome of reporting a failure to the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryDecision {
    /// The surface is not tracked (destroyed or never registered).
    Untracked,
    /// A retry for this navigation attempt is already scheduled.
    AlreadyPending,
    /// Schedule a reload after `delay`.
    Retry { attempt: u32, delay: Duration },
    /// The ceiling was reached by this failure; the surface is now terminal.
    Exhausted { attempts: u32 },
    /// The surface was already terminal.
    Terminal,
}

/// Trait defining the crash/failure monitor interface.
pub trait CrashRecoveryTrait {
    fn track(&mut self, id: SurfaceId);
    fn forget(&mut self, id: SurfaceId) -> Option<TimerId>;
    fn is_recoverable_exit(&self, reason: RenderExitReason) -> bool;
    fn is_recoverable_failure(&self, failure: &LoadFailure) -> bool;
    fn record_failure(&mut self, id: SurfaceId, now: Instant) -> RecoveryDecision;
    fn arm(&mut self, id: SurfaceId, timer: TimerId);
    fn take_pending(&mut self, id: SurfaceId, timer: TimerId) -> bool;
    fn record_success(&mut self, id: SurfaceId) -> Option<TimerId>;
    fn reset(&mut self, id: SurfaceId) -> Option<TimerId>;
    fn state(&self, id: SurfaceId) -> Option<&RecoveryState>;
}

/// In-memory crash/failure monitor.
pub struct CrashRecovery {
    policy: RecoveryPolicy,
    states: HashMap<SurfaceId, RecoveryState>,
}

impl CrashRecovery {
    pub fn new(policy: RecoveryPolicy) -> Self {
        Self {
            policy,
            states: HashMap::new(),
        }
    }

    pub fn policy(&self) -> &RecoveryPolicy {
        &self.policy
    }

    pub fn is_terminal(&self, id: SurfaceId) -> bool {
        self.states.get(&id).map(|s| s.terminal).unwrap_or(false)
    }

    pub fn has_pending(&self, id: SurfaceId) -> bool {
        self.states
            .get(&id)
            .map(|s| s.pending.is_some())
            .unwrap_or(false)
    }

}

impl Default for CrashRecovery {
    fn default() -> Self {
        Self::new(RecoveryPolicy::default())
    }
}

impl CrashRecoveryTrait for CrashRecovery {
    fn track(&mut self, id: SurfaceId) {
        self.states.entry(id).or_default();
    }

    fn forget(&mut self, id: SurfaceId) -> Option<TimerId> {
        self.states.remove(&id).and_then(|s| s.pending)
    }

    fn is_recoverable_exit(&self, reason: RenderExitReason) -> bool {
        reason.is_abnormal()
    }

    fn is_recoverable_failure(&self, failure: &LoadFailure) -> bool {
        failure.main_frame && failure.code < self.policy.failure_code_threshold
    }

    fn record_failure(&mut self, id: SurfaceId, now: Instant) -> RecoveryDecision {
        let ceiling = self.policy.ceiling;
        let delay = self.policy.retry_delay;
        let Some(state) = self.states.get_mut(&id) else {
            return RecoveryDecision::Untracked;
        };
        if state.terminal {
            return RecoveryDecision::Terminal;
        }
        if state.pending.is_some() {
            debug!(surface = %id, "failure while a retry is pending, not rescheduling");
            return RecoveryDecision::AlreadyPending;
        }
        state.last_failure = Some(now);
        if state.attempts >= ceiling {
            state.terminal = true;
            return RecoveryDecision::Exhausted {
                attempts: state.attempts,
            };
        }
        state.attempts += 1;
        RecoveryDecision::Retry {
            attempt: state.attempts,
            delay,
        }
    }

    fn arm(&mut self, id: SurfaceId, timer: TimerId) {
        if let Some(state) = self.states.get_mut(&id) {
            state.pending = Some(timer);
        }
    }

    /// Consumes the pending retry if `timer` is the one armed for `id`.
    fn take_pending(&mut self, id: SurfaceId, timer: TimerId) -> bool {
        match self.states.get_mut(&id) {
            Some(state) if state.pending == Some(timer) => {
                state.pending = None;
                true
            }
            _ => false,
        }
    }

    /// The surface loaded. Any retry still pending is obsolete and is
    /// returned for the caller to cancel.
    fn record_success(&mut self, id: SurfaceId) -> Option<TimerId> {
        let state = self.states.get_mut(&id)?;
        state.attempts = 0;
        state.terminal = false;
        state.pending.take()
    }

    /// Clears attempts and the terminal flag after a user-initiated reload.
    /// Returns the pending retry, which the caller must cancel.
    fn reset(&mut self, id: SurfaceId) -> Option<TimerId> {
        let state = self.states.get_mut(&id)?;
        state.attempts = 0;
        state.terminal = false;
        state.pending.take()
    }

    fn state(&self, id: SurfaceId) -> Option<&RecoveryState> {
        self.states.get(&id)
    }
}
