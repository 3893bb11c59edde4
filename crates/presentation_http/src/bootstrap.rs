//! Composition root
//!
//! Builds the store, the optional fault injector and event publisher, and
//! the catalog service from configuration.

use std::sync::Arc;

use application::{CatalogService, ports::ItemRepositoryPort};
use infrastructure::{
    AppConfig, BroadcastEventPublisher, ChaosConfigError, FaultInjectingItemRepository,
    InMemoryItemStore, WarmupSchedule,
};
use tokio::task::JoinHandle;
use tracing::info;

use crate::{
    state::{AppState, ChaosHandle},
    tasks::spawn_event_log_task,
};

/// Everything the server needs to start handling requests
#[derive(Debug)]
pub struct Bootstrapped {
    pub state: AppState,
    /// Event log task, present when events are enabled
    pub event_log: Option<JoinHandle<u64>>,
}

/// Wire the application around `store`
///
/// Must be called inside a tokio runtime when events are enabled.
pub fn bootstrap_with_store(
    config: &AppConfig,
    store: Arc<dyn ItemRepositoryPort>,
) -> Result<Bootstrapped, ChaosConfigError> {
    let (repository, chaos): (Arc<dyn ItemRepositoryPort>, Option<ChaosHandle>) =
        if config.chaos.enabled {
            let policy = config.chaos.to_policy()?;
            info!(
                slow_failures = policy.slow_failures(),
                failures = policy.failures(),
                delay_ms = config.chaos.delay_ms,
                "Fault injection enabled for item listing"
            );
            let schedule = Arc::new(WarmupSchedule::new(policy));
            let injector = FaultInjectingItemRepository::new(store, Arc::clone(&schedule));
            let handle = ChaosHandle {
                context: injector.context(),
                schedule,
            };
            (Arc::new(injector) as Arc<dyn ItemRepositoryPort>, Some(handle))
        } else {
            (store, None)
        };

    let (catalog, event_log) = if config.events.enabled {
        let publisher = Arc::new(BroadcastEventPublisher::new(config.events.channel_capacity));
        let event_log = spawn_event_log_task(publisher.subscribe());
        (
            CatalogService::with_publisher(repository, publisher),
            Some(event_log),
        )
    } else {
        (CatalogService::new(repository), None)
    };

    let mut state = AppState::new(Arc::new(catalog));
    if let Some(chaos) = chaos {
        state = state.with_chaos(chaos);
    }

    Ok(Bootstrapped { state, event_log })
}

/// Wire the application around a fresh in-memory store
pub fn bootstrap(config: &AppConfig) -> Result<Bootstrapped, ChaosConfigError> {
    bootstrap_with_store(config, Arc::new(InMemoryItemStore::new()))
}
