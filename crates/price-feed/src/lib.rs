//! Gold price aggregation and live updates
//!
//! Features:
//! - Weighted multi-source price aggregation with per-source failure isolation
//! - Currency conversion with graceful degradation to the base currency
//! - Timer-driven subscriber notifications with dynamic currency switching
//! - Injected clock and RNG for deterministic tests

pub mod aggregator;
pub mod rates;
pub mod sources;
pub mod stream;

#[cfg(test)]
pub(crate) mod testutil;

pub use aggregator::{weighted_average, PriceAggregator};
pub use rates::{RateSource, SimulatedRateSource};
pub use sources::{default_sources, QuoteSource, SimulatedSource};
pub use stream::{PriceCallback, PriceStream, SubscriptionId};
