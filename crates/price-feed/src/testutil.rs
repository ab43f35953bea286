//! Test doubles shared by the aggregator and stream tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use goldfeed_core::{FeedError, FeedResult, FixedClock, Quote, SharedClock};

use crate::sources::QuoteSource;

pub fn fixed_clock() -> SharedClock {
    Arc::new(FixedClock::at_timestamp(1_700_000_000))
}

#[derive(Clone, Copy)]
enum Behavior {
    Fixed(f64),
    Failing,
    /// Never resolves within any sane per-source timeout.
    Stalled,
    /// Fails the first `failures` calls, then returns the fixed price.
    Flaky { failures: usize, price: f64 },
}

pub struct MockSource {
    name: &'static str,
    weight: f64,
    behavior: Behavior,
    clock: SharedClock,
    calls: AtomicUsize,
}

impl MockSource {
    fn new(name: &'static str, weight: f64, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name,
            weight,
            behavior,
            clock: fixed_clock(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn fixed(name: &'static str, weight: f64, price: f64) -> Arc<Self> {
        Self::new(name, weight, Behavior::Fixed(price))
    }

    pub fn failing(name: &'static str, weight: f64) -> Arc<Self> {
        Self::new(name, weight, Behavior::Failing)
    }

    pub fn stalled(name: &'static str, weight: f64) -> Arc<Self> {
        Self::new(name, weight, Behavior::Stalled)
    }

    pub fn flaky(name: &'static str, weight: f64, failures: usize, price: f64) -> Arc<Self> {
        Self::new(name, weight, Behavior::Flaky { failures, price })
    }

    /// Number of fetch calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn quote(&self, price: f64) -> Quote {
        Quote {
            source: self.name.to_string(),
            price,
            currency: "USD".to_string(),
            observed_at: self.clock.now(),
            weight: self.weight,
        }
    }
}

#[async_trait::async_trait]
impl QuoteSource for MockSource {
    fn name(&self) -> &str {
        self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    async fn fetch_quote(&self) -> FeedResult<Quote> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            Behavior::Fixed(price) => Ok(self.quote(price)),
            Behavior::Failing => Err(FeedError::source_unavailable(self.name, "simulated outage")),
            Behavior::Stalled => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(FeedError::source_unavailable(self.name, "stalled"))
            }
            Behavior::Flaky { failures, price } => {
                if call < failures {
                    Err(FeedError::source_unavailable(self.name, "simulated outage"))
                } else {
                    Ok(self.quote(price))
                }
            }
        }
    }
}

pub fn fixed_source(name: &'static str, weight: f64, price: f64) -> Arc<dyn QuoteSource> {
    MockSource::fixed(name, weight, price)
}

pub fn failing_source(name: &'static str, weight: f64) -> Arc<dyn QuoteSource> {
    MockSource::failing(name, weight)
}

pub fn stalled_source(name: &'static str, weight: f64) -> Arc<dyn QuoteSource> {
    MockSource::stalled(name, weight)
}
