//! Warm-up fault schedule.
//!
//! A monotonically increasing call counter mapped onto three phases. The
//! counter belongs to the schedule instance, so every test can start from a
//! fresh schedule.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Calls that are delayed before failing
pub const DEFAULT_SLOW_FAILURES: u64 = 2;

/// Calls that fail in total (slow ones included)
pub const DEFAULT_FAILURES: u64 = 4;

/// Delay applied to slow failures
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Invalid warm-up policy
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ChaosConfigError {
    #[error("slow failures ({slow}) exceed total failures ({total})")]
    SlowExceedsTotal { slow: u64, total: u64 },
}

/// Where a call falls in the warm-up sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarmupPhase {
    /// Delay, then fail
    Warming,
    /// Fail without delay
    FailingFast,
    /// Serve normally; terminal
    Stable,
}

impl WarmupPhase {
    /// Whether calls in this phase are delayed
    pub const fn delays(self) -> bool {
        matches!(self, Self::Warming)
    }

    /// Whether calls in this phase fail
    pub const fn fails(self) -> bool {
        !matches!(self, Self::Stable)
    }
}

/// A single call's position in the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// 1-based call number
    pub call: u64,
    /// Phase assigned to this call
    pub phase: WarmupPhase,
}

/// Thresholds for the warm-up sequence
///
/// Both bounds are inclusive: with the defaults, call 2 is still slow and
/// call 4 still fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmupPolicy {
    slow_failures: u64,
    failures: u64,
    delay: Duration,
}

impl Default for WarmupPolicy {
    fn default() -> Self {
        Self {
            slow_failures: DEFAULT_SLOW_FAILURES,
            failures: DEFAULT_FAILURES,
            delay: DEFAULT_DELAY,
        }
    }
}

impl WarmupPolicy {
    /// Create a policy
    ///
    /// # Errors
    ///
    /// Returns `ChaosConfigError::SlowExceedsTotal` if `slow_failures` is
    /// greater than `failures`.
    pub const fn new(
        slow_failures: u64,
        failures: u64,
        delay: Duration,
    ) -> Result<Self, ChaosConfigError> {
        if slow_failures > failures {
            return Err(ChaosConfigError::SlowExceedsTotal {
                slow: slow_failures,
                total: failures,
            });
        }
        Ok(Self {
            slow_failures,
            failures,
            delay,
        })
    }

    /// Phase for a 1-based call number
    pub const fn phase_for(&self, call: u64) -> WarmupPhase {
        if call <= self.slow_failures {
            WarmupPhase::Warming
        } else if call <= self.failures {
            WarmupPhase::FailingFast
        } else {
            WarmupPhase::Stable
        }
    }

    pub const fn slow_failures(&self) -> u64 {
        self.slow_failures
    }

    pub const fn failures(&self) -> u64 {
        self.failures
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

/// Counter-driven warm-up state machine
#[derive(Debug)]
pub struct WarmupSchedule {
    policy: WarmupPolicy,
    calls: AtomicU64,
}

impl Default for WarmupSchedule {
    fn default() -> Self {
        Self::new(WarmupPolicy::default())
    }
}

impl WarmupSchedule {
    /// Create a schedule whose counter starts at zero
    pub const fn new(policy: WarmupPolicy) -> Self {
        Self {
            policy,
            calls: AtomicU64::new(0),
        }
    }

    /// Count one call and classify it
    ///
    /// Concurrent callers always receive distinct call numbers.
    pub fn observe(&self) -> Observation {
        let call = self.calls.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        Observation {
            call,
            phase: self.policy.phase_for(call),
        }
    }

    /// Number of calls observed so far
    pub fn calls_observed(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Phase the next call will be assigned
    pub fn next_phase(&self) -> WarmupPhase {
        self.policy.phase_for(self.calls_observed().saturating_add(1))
    }

    pub const fn policy(&self) -> &WarmupPolicy {
        &self.policy
    }
}
