//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: item storage, event
//! publishing and the warm-up fault injector. Also hosts configuration,
//! logging setup and the HTTP client used to talk to a running catalog.

pub mod chaos;
pub mod config;
pub mod events;
pub mod http;
pub mod persistence;
pub mod retry;
pub mod telemetry;

pub use chaos::{
    ChaosConfigError, ChaosContext, ChaosStats, FaultInjectingItemRepository, WarmupPhase,
    WarmupPolicy, WarmupSchedule,
};
pub use config::{AppConfig, ChaosAppConfig, Environment, EventsAppConfig, ServerConfig};
pub use events::BroadcastEventPublisher;
pub use http::{CatalogClient, CatalogClientConfig, CatalogClientError, HealthStatus, X_REQUEST_ID};
pub use persistence::InMemoryItemStore;
pub use retry::{RetryConfig, RetryOutcome, Retryable, retry, with_retry, with_retry_notify};
pub use telemetry::{LogFormat, TelemetryError, init_logging};
