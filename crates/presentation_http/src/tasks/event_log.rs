//! Catalog event log task
//!
//! Subscribes to the broadcast publisher and writes every catalog event to
//! the log until the channel closes.

use domain::CatalogEvent;
use tokio::sync::broadcast::{Receiver, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Spawn a task that logs catalog events
///
/// The handle resolves to the number of events logged once every sender is
/// dropped. Events missed because the task fell behind are reported and
/// skipped.
///
/// # Example
///
/// ```ignore
/// let publisher = Arc::new(BroadcastEventPublisher::new(256));
/// let log_handle = spawn_event_log_task(publisher.subscribe());
/// ```
pub fn spawn_event_log_task(mut events: Receiver<CatalogEvent>) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut logged = 0u64;
        loop {
            match events.recv().await {
                Ok(event) => {
                    logged += 1;
                    log_event(&event);
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event log fell behind; events were dropped");
                },
                Err(RecvError::Closed) => {
                    debug!(logged, "Event channel closed, stopping event log");
                    break;
                },
            }
        }
        logged
    })
}

fn log_event(event: &CatalogEvent) {
    let payload = serde_json::to_string(event).unwrap_or_default();
    info!(
        event_type = event.name(),
        item_id = %event.item_id(),
        payload = %payload,
        "Catalog event"
    );
}
