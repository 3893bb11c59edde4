//! Application state shared across handlers

use std::sync::Arc;

use application::CatalogService;
use infrastructure::{ChaosContext, ChaosStats, WarmupSchedule};

/// Read-only view of an active fault injector
#[derive(Debug, Clone)]
pub struct ChaosHandle {
    pub context: Arc<ChaosContext>,
    pub schedule: Arc<WarmupSchedule>,
}

impl ChaosHandle {
    pub fn stats(&self) -> ChaosStats {
        self.context.snapshot_with_phase(self.schedule.next_phase())
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Catalog use cases
    pub catalog: Arc<CatalogService>,
    /// Present only when fault injection is enabled
    pub chaos: Option<ChaosHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("chaos", &self.chaos)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self {
            catalog,
            chaos: None,
        }
    }

    #[must_use]
    pub fn with_chaos(mut self, chaos: ChaosHandle) -> Self {
        self.chaos = Some(chaos);
        self
    }
}
