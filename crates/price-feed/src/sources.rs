//! Quote source implementations
//!
//! Each source produces a timestamped USD quote with a fixed combination
//! weight. The simulated sources here stand in for real market-data clients;
//! anything satisfying [`QuoteSource`] (an HTTP poller, a WebSocket feed)
//! drops in without touching the aggregator or the stream.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use goldfeed_core::{Currency, FeedResult, Quote, SharedClock};

/// A single market-data source.
///
/// Calls are independent and side-effect-free beyond producing a quote;
/// one source failing or stalling must never block the others.
#[async_trait::async_trait]
pub trait QuoteSource: Send + Sync {
    fn name(&self) -> &str;

    /// Weight in (0, 1] used by the weighted average.
    fn weight(&self) -> f64;

    async fn fetch_quote(&self) -> FeedResult<Quote>;
}

/// Simulated source: a base price plus bounded uniform jitter.
pub struct SimulatedSource {
    name: &'static str,
    weight: f64,
    base_price: f64,
    /// Full jitter span; quotes land in base ± spread/2.
    spread: f64,
    rng: Mutex<StdRng>,
    clock: SharedClock,
}

impl SimulatedSource {
    pub fn new(
        name: &'static str,
        weight: f64,
        base_price: f64,
        spread: f64,
        clock: SharedClock,
    ) -> Self {
        Self {
            name,
            weight,
            base_price,
            spread,
            rng: Mutex::new(StdRng::from_entropy()),
            clock,
        }
    }

    /// Same source with a fixed RNG seed, for reproducible quotes.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// LBMA benchmark fix. Highest weight: it is the reference market.
    pub fn lbma(clock: SharedClock) -> Self {
        Self::new("LBMA", 0.40, 2650.0, 50.0, clock)
    }

    /// COMEX front-month futures.
    pub fn comex(clock: SharedClock) -> Self {
        Self::new("COMEX", 0.25, 2655.0, 40.0, clock)
    }

    /// Spot XAU/USD from the forex market.
    pub fn forex(clock: SharedClock) -> Self {
        Self::new("Forex (XAU/USD)", 0.20, 2648.0, 45.0, clock)
    }

    /// Aggregate of bullion dealer ask prices.
    pub fn bullion_dealers(clock: SharedClock) -> Self {
        Self::new("Bullion Dealers", 0.15, 2652.0, 35.0, clock)
    }
}

#[async_trait::async_trait]
impl QuoteSource for SimulatedSource {
    fn name(&self) -> &str {
        self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    async fn fetch_quote(&self) -> FeedResult<Quote> {
        let jitter = {
            let mut rng = self.rng.lock();
            rng.gen_range(-0.5..=0.5) * self.spread
        };

        Ok(Quote {
            source: self.name.to_string(),
            price: self.base_price + jitter,
            currency: Currency::BASE.code().to_string(),
            observed_at: self.clock.now(),
            weight: self.weight,
        })
    }
}

/// The four sources in declaration order. Weights sum to 1.00.
pub fn default_sources(clock: SharedClock) -> Vec<Arc<dyn QuoteSource>> {
    vec![
        Arc::new(SimulatedSource::lbma(Arc::clone(&clock))),
        Arc::new(SimulatedSource::comex(Arc::clone(&clock))),
        Arc::new(SimulatedSource::forex(Arc::clone(&clock))),
        Arc::new(SimulatedSource::bullion_dealers(clock)),
    ]
}
