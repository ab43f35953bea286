//! Currency rate source

use std::collections::HashMap;

use goldfeed_core::{Currency, FeedResult, RateTable};

/// Supplies conversion factors relative to the base currency.
///
/// An `Err` from this trait is contained by the aggregator, which degrades
/// to [`RateTable::base_only`] rather than failing the cycle.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self) -> FeedResult<RateTable>;
}

/// Fixed simulated rates for the supported display currencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedRateSource;

impl SimulatedRateSource {
    fn rate_for(currency: Currency) -> f64 {
        match currency {
            Currency::Usd => 1.0,
            Currency::Eur => 0.85,
            Currency::Gbp => 0.73,
            Currency::Jpy => 110.0,
            Currency::Cad => 1.25,
            Currency::Aud => 1.35,
            Currency::Chf => 0.92,
            Currency::Cny => 6.45,
        }
    }
}

#[async_trait::async_trait]
impl RateSource for SimulatedRateSource {
    async fn fetch_rates(&self) -> FeedResult<RateTable> {
        let mut rates = HashMap::new();
        for currency in Currency::all() {
            rates.insert(currency.code().to_string(), Self::rate_for(currency));
        }
        Ok(RateTable::new(rates))
    }
}
