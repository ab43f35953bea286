//! Core type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Currencies supported for display. Codes outside this set are still
/// accepted by the aggregator and resolve to a 1.0 conversion factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
    Chf,
    Cny,
}

impl Currency {
    /// Base currency all rates are expressed against.
    pub const BASE: Currency = Currency::Usd;

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
        }
    }

    pub fn from_code(code: &str) -> Option<Currency> {
        match code {
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "GBP" => Some(Currency::Gbp),
            "JPY" => Some(Currency::Jpy),
            "CAD" => Some(Currency::Cad),
            "AUD" => Some(Currency::Aud),
            "CHF" => Some(Currency::Chf),
            "CNY" => Some(Currency::Cny),
            _ => None,
        }
    }

    pub fn all() -> [Currency; 8] {
        [
            Currency::Usd,
            Currency::Eur,
            Currency::Gbp,
            Currency::Jpy,
            Currency::Cad,
            Currency::Aud,
            Currency::Chf,
            Currency::Cny,
        ]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single source's price observation with its combination weight.
///
/// Created fresh on every fetch and discarded after aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub source: String,
    pub price: f64,
    pub currency: String,
    pub observed_at: DateTime<Utc>,
    /// Weight in (0, 1]; weights across all declared sources sum to 1.00.
    pub weight: f64,
}

/// Conversion factors relative to the base currency, snapshotted per cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self { rates }
    }

    /// Minimal degraded table: base currency only, at 1.0.
    pub fn base_only() -> Self {
        let mut rates = HashMap::new();
        rates.insert(Currency::BASE.code().to_string(), 1.0);
        Self { rates }
    }

    /// Conversion factor for `code`; unknown codes convert 1:1.
    pub fn rate(&self, code: &str) -> f64 {
        self.rates.get(code).copied().unwrap_or(1.0)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// The aggregated record published to subscribers, one per successful cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedPrice {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub currency: String,
    /// Surviving quotes in source-declaration order; never empty.
    pub sources: Vec<Quote>,
    pub last_updated: DateTime<Utc>,
}
