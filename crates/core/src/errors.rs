//! Error types

use thiserror::Error;

/// Price feed errors.
///
/// Per-source and rate-table failures are contained by the aggregator;
/// only `NoSourcesAvailable` propagates past it, and even that is fatal
/// for a single cycle only.
#[derive(Debug, Error)]
pub enum FeedError {
    // Field deliberately not named `source`: thiserror would treat that as
    // the error's cause and require it to implement `std::error::Error`.
    #[error("source {name} unavailable: {reason}")]
    SourceUnavailable { name: String, reason: String },

    #[error("currency rate table unavailable")]
    RateTableUnavailable,

    #[error("no price sources available this cycle")]
    NoSourcesAvailable,
}

impl FeedError {
    pub fn source_unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        FeedError::SourceUnavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type FeedResult<T> = Result<T, FeedError>;
