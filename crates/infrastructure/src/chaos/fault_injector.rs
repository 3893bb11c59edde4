//! Fault-injecting decorator for the item repository.
//!
//! Only `get_all` is gated by the warm-up schedule. Every other operation is
//! passed straight through to the wrapped repository.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::ItemRepositoryPort;
use async_trait::async_trait;
use domain::{Item, ItemId};
use tracing::{debug, instrument, warn};

use super::{ChaosContext, WarmupPhase, WarmupSchedule};

/// Item repository wrapper that fails the first list calls
pub struct FaultInjectingItemRepository {
    inner: Arc<dyn ItemRepositoryPort>,
    schedule: Arc<WarmupSchedule>,
    context: Arc<ChaosContext>,
}

impl std::fmt::Debug for FaultInjectingItemRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaultInjectingItemRepository")
            .field("schedule", &self.schedule)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl FaultInjectingItemRepository {
    /// Wrap `inner` so that its list calls follow `schedule`
    pub fn new(inner: Arc<dyn ItemRepositoryPort>, schedule: Arc<WarmupSchedule>) -> Self {
        Self {
            inner,
            schedule,
            context: Arc::new(ChaosContext::new()),
        }
    }

    /// Statistics shared with anyone who wants to report them
    pub fn context(&self) -> Arc<ChaosContext> {
        Arc::clone(&self.context)
    }

    pub fn schedule(&self) -> Arc<WarmupSchedule> {
        Arc::clone(&self.schedule)
    }
}

#[async_trait]
impl ItemRepositoryPort for FaultInjectingItemRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Item>, ApplicationError> {
        let observation = self.schedule.observe();
        self.context.record_call();

        match observation.phase {
            WarmupPhase::Warming => {
                let delay = self.schedule.policy().delay();
                debug!(
                    call = observation.call,
                    delay_ms = delay.as_millis(),
                    "Delaying request before injected fault"
                );
                tokio::time::sleep(delay).await;
                self.context
                    .record_latency(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX));
                self.context.record_fault();
                warn!(call = observation.call, "Injected slow fault");
                Err(ApplicationError::InjectedFault)
            },
            WarmupPhase::FailingFast => {
                self.context.record_fault();
                warn!(call = observation.call, "Injected fast fault");
                Err(ApplicationError::InjectedFault)
            },
            WarmupPhase::Stable => self.inner.get_all().await,
        }
    }

    async fn get(&self, id: &ItemId) -> Result<Option<Item>, ApplicationError> {
        self.inner.get(id).await
    }

    async fn create(&self, item: &Item) -> Result<(), ApplicationError> {
        self.inner.create(item).await
    }

    async fn update(&self, item: &Item) -> Result<(), ApplicationError> {
        self.inner.update(item).await
    }

    async fn remove(&self, id: &ItemId) -> Result<(), ApplicationError> {
        self.inner.remove(id).await
    }
}
