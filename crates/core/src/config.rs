//! Configuration types

use std::time::Duration;

/// Price stream configuration.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Interval between aggregation cycles while the stream is active.
    pub tick_interval: Duration,
    /// Upper bound on any single source call, so one slow source cannot
    /// extend the fan-out join indefinitely.
    pub source_timeout: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(5),
            source_timeout: Duration::from_secs(2),
        }
    }
}
