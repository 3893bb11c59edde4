//! Catalog event publishing configuration.

use serde::{Deserialize, Serialize};

use super::default_true;
use crate::events::DEFAULT_CHANNEL_CAPACITY;

/// In-process event publishing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsAppConfig {
    /// Publish catalog events on item mutations
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Events buffered per subscriber before it starts lagging
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

const fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

impl Default for EventsAppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            channel_capacity: default_channel_capacity(),
        }
    }
}
