//! Counters describing what the fault injector has done so far.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::WarmupPhase;

/// Point-in-time view of fault injection statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaosStats {
    /// Total number of gated calls processed
    pub total_calls: u64,
    /// Number of faults injected
    pub faults_injected: u64,
    /// Number of calls that were delayed before failing
    pub latency_injected: u64,
    /// Total latency added (milliseconds)
    pub total_latency_added_ms: u64,
    /// Phase the next call will fall into, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_phase: Option<String>,
}

impl ChaosStats {
    /// Fraction of calls that ended in an injected fault
    #[allow(clippy::cast_precision_loss)]
    pub fn actual_fault_rate(&self) -> f64 {
        if self.total_calls == 0 {
            0.0
        } else {
            self.faults_injected as f64 / self.total_calls as f64
        }
    }
}

/// Shared counters updated by the fault injector
///
/// Every counter is a plain atomic so the context can be shared behind an
/// `Arc` between the decorator and the stats endpoint.
#[derive(Debug, Default)]
pub struct ChaosContext {
    total_calls: AtomicU64,
    faults_injected: AtomicU64,
    latency_injected: AtomicU64,
    total_latency_added_ms: AtomicU64,
}

impl ChaosContext {
    pub const fn new() -> Self {
        Self {
            total_calls: AtomicU64::new(0),
            faults_injected: AtomicU64::new(0),
            latency_injected: AtomicU64::new(0),
            total_latency_added_ms: AtomicU64::new(0),
        }
    }

    /// Record a gated call being processed
    pub fn record_call(&self) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fault being returned to the caller
    pub fn record_fault(&self) {
        self.faults_injected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a delay applied before a fault
    pub fn record_latency(&self, latency_ms: u64) {
        self.latency_injected.fetch_add(1, Ordering::Relaxed);
        self.total_latency_added_ms
            .fetch_add(latency_ms, Ordering::Relaxed);
    }

    /// Copy the current counters
    pub fn snapshot(&self) -> ChaosStats {
        ChaosStats {
            total_calls: self.total_calls.load(Ordering::Relaxed),
            faults_injected: self.faults_injected.load(Ordering::Relaxed),
            latency_injected: self.latency_injected.load(Ordering::Relaxed),
            total_latency_added_ms: self.total_latency_added_ms.load(Ordering::Relaxed),
            next_phase: None,
        }
    }

    /// Copy the current counters along with the upcoming phase
    pub fn snapshot_with_phase(&self, next: WarmupPhase) -> ChaosStats {
        let label = match next {
            WarmupPhase::Warming => "warming",
            WarmupPhase::FailingFast => "failing_fast",
            WarmupPhase::Stable => "stable",
        };
        ChaosStats {
            next_phase: Some(label.to_string()),
            ..self.snapshot()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_is_empty() {
        let ctx = ChaosContext::new();
        assert_eq!(ctx.snapshot(), ChaosStats::default());
    }

    #[test]
    fn fault_rate_with_zero_calls_is_zero() {
        assert!(ChaosStats::default().actual_fault_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn fault_rate_is_faults_over_calls() {
        let stats = ChaosStats {
            total_calls: 5,
            faults_injected: 4,
            ..Default::default()
        };
        assert!((stats.actual_fault_rate() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn records_calls_faults_and_latency() {
        let ctx = ChaosContext::new();
        ctx.record_call();
        ctx.record_call();
        ctx.record_fault();
        ctx.record_latency(2000);
        ctx.record_latency(2000);

        let stats = ctx.snapshot();
        assert_eq!(stats.total_calls, 2);
        assert_eq!(stats.faults_injected, 1);
        assert_eq!(stats.latency_injected, 2);
        assert_eq!(stats.total_latency_added_ms, 4000);
    }

    #[test]
    fn snapshot_with_phase_labels_phase() {
        let ctx = ChaosContext::new();
        let stats = ctx.snapshot_with_phase(WarmupPhase::FailingFast);
        assert_eq!(stats.next_phase.as_deref(), Some("failing_fast"));
    }

    #[test]
    fn serializes_without_absent_phase() {
        let json = serde_json::to_value(ChaosStats::default()).unwrap();
        assert!(json.get("next_phase").is_none());
        assert_eq!(json["total_calls"], 0);
    }
}
