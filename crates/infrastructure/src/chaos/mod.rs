//! Chaos engineering support for resilience testing.
//!
//! Simulates an unstable backend during the first calls after startup so
//! that client retry and backoff can be exercised against a predictable
//! pattern.
//!
//! # Overview
//!
//! - `WarmupSchedule`: owns the call counter and classifies each call into a
//!   `WarmupPhase`
//! - `FaultInjectingItemRepository`: wraps an item repository and applies the
//!   schedule to `get_all`
//! - `ChaosContext`: counts calls, faults and injected latency
//!
//! With the default policy the first five list calls behave as:
//!
//! | call | phase | behavior |
//! |------|-------|----------|
//! | 1, 2 | `Warming` | wait 2s, then fail |
//! | 3, 4 | `FailingFast` | fail immediately |
//! | 5+ | `Stable` | delegate to the store |
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use infrastructure::chaos::{FaultInjectingItemRepository, WarmupPolicy, WarmupSchedule};
//!
//! let schedule = Arc::new(WarmupSchedule::new(WarmupPolicy::default()));
//! let repository = FaultInjectingItemRepository::new(store, schedule);
//! ```

mod chaos_context;
mod fault_injector;
mod warmup_schedule;

pub use chaos_context::{ChaosContext, ChaosStats};
pub use fault_injector::FaultInjectingItemRepository;
pub use warmup_schedule::{
    ChaosConfigError, DEFAULT_DELAY, DEFAULT_FAILURES, DEFAULT_SLOW_FAILURES, Observation,
    WarmupPhase, WarmupPolicy, WarmupSchedule,
};
