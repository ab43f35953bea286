//! Price aggregator - combines source quotes into one reference price
//!
//! Fan-out to every quote source plus the rate source concurrently, keep
//! whatever succeeded, weighted-average the survivors in the base currency,
//! then convert to the requested display currency.

use futures::future;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use goldfeed_core::{
    AggregatedPrice, FeedError, FeedResult, Quote, RateTable, SharedClock, StreamConfig,
    SystemClock,
};

use crate::rates::{RateSource, SimulatedRateSource};
use crate::sources::{default_sources, QuoteSource};

/// Weighted average over the given quotes: `Σ(price·weight) / Σ(weight)`.
///
/// Weights of absent quotes are excluded from both sums, so the surviving
/// weights are implicitly renormalized. Quotes must be non-empty.
pub fn weighted_average(quotes: &[Quote]) -> f64 {
    let total_weight: f64 = quotes.iter().map(|q| q.weight).sum();
    let weighted_sum: f64 = quotes.iter().map(|q| q.price * q.weight).sum();
    weighted_sum / total_weight
}

/// Combines quotes from all sources into one [`AggregatedPrice`].
pub struct PriceAggregator {
    sources: Vec<Arc<dyn QuoteSource>>,
    rates: Arc<dyn RateSource>,
    clock: SharedClock,
    source_timeout: Duration,
    /// Drives the synthetic previous-price perturbation for change metrics.
    rng: Mutex<StdRng>,
}

impl PriceAggregator {
    pub fn new(
        sources: Vec<Arc<dyn QuoteSource>>,
        rates: Arc<dyn RateSource>,
        clock: SharedClock,
        source_timeout: Duration,
    ) -> Self {
        Self {
            sources,
            rates,
            clock,
            source_timeout,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Aggregator over the four simulated sources and simulated rates.
    pub fn simulated() -> Self {
        let clock: SharedClock = Arc::new(SystemClock);
        let config = StreamConfig::default();
        Self::new(
            default_sources(Arc::clone(&clock)),
            Arc::new(SimulatedRateSource),
            clock,
            config.source_timeout,
        )
    }

    /// Same aggregator with a fixed RNG seed, for reproducible change metrics.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Run one aggregation cycle for the requested display currency.
    ///
    /// Fails only with [`FeedError::NoSourcesAvailable`]; every other
    /// failure is contained here. One slow or failing source never delays
    /// the others beyond its own completion (bounded by the per-source
    /// timeout).
    pub async fn aggregate(&self, currency: &str) -> FeedResult<AggregatedPrice> {
        let quote_futures = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            let deadline = self.source_timeout;
            async move {
                match timeout(deadline, source.fetch_quote()).await {
                    Ok(result) => result,
                    Err(_) => Err(FeedError::source_unavailable(source.name(), "timed out")),
                }
            }
        });

        let (quote_results, rate_result) = tokio::join!(
            future::join_all(quote_futures),
            timeout(self.source_timeout, self.rates.fetch_rates()),
        );

        // Survivors keep source-declaration order.
        let mut sources = Vec::with_capacity(quote_results.len());
        for result in quote_results {
            match result {
                Ok(quote) => sources.push(quote),
                Err(e) => warn!("quote source failed: {e}"),
            }
        }

        if sources.is_empty() {
            return Err(FeedError::NoSourcesAvailable);
        }

        let rate_table = match rate_result {
            Ok(Ok(table)) => table,
            Ok(Err(e)) => {
                warn!("rate source failed, degrading to base currency: {e}");
                RateTable::base_only()
            }
            Err(_) => {
                warn!("rate source timed out, degrading to base currency");
                RateTable::base_only()
            }
        };

        let base_price = weighted_average(&sources);
        let price = base_price * rate_table.rate(currency);

        // Synthetic movement: perturb a previous price within ±1% of the
        // current one. A real previous-cycle store could substitute true
        // deltas without changing the field contract.
        let previous_price = {
            let mut rng = self.rng.lock();
            price * (1.0 + rng.gen_range(-0.01..=0.01))
        };
        let change = price - previous_price;
        let change_percent = change / previous_price * 100.0;

        debug!(
            sources = sources.len(),
            base_price, price, currency, "aggregation cycle complete"
        );

        Ok(AggregatedPrice {
            price,
            change,
            change_percent,
            currency: currency.to_string(),
            sources,
            last_updated: self.clock.now(),
        })
    }
}
