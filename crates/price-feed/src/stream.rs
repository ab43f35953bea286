//! Live price stream
//!
//! Owns the recurring fetch timer and the subscriber registry. Idle while
//! nobody is subscribed; the first subscriber arms a ticker task that runs
//! one aggregation cycle immediately and then on a fixed interval, and the
//! last unsubscribe disarms it. The stream can always re-activate on a new
//! subscribe.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use goldfeed_core::{AggregatedPrice, StreamConfig};

use crate::aggregator::PriceAggregator;

/// Subscriber callback, invoked once per successful cycle.
pub type PriceCallback = Arc<dyn Fn(AggregatedPrice) + Send + Sync>;

/// Opaque handle returned by [`PriceStream::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct StreamInner {
    currency: String,
    /// Insertion order is notification order.
    subscribers: Vec<(SubscriptionId, PriceCallback)>,
    next_id: u64,
    ticker: Option<JoinHandle<()>>,
}

/// Timer-driven publisher of [`AggregatedPrice`] snapshots.
///
/// All mutable state lives behind one mutex and aggregation is driven by a
/// single spawned task, so at most one cycle is in flight per stream.
pub struct PriceStream {
    aggregator: Arc<PriceAggregator>,
    tick_interval: Duration,
    inner: Arc<Mutex<StreamInner>>,
}

impl PriceStream {
    pub fn new(
        aggregator: PriceAggregator,
        initial_currency: impl Into<String>,
        config: StreamConfig,
    ) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            tick_interval: config.tick_interval,
            inner: Arc::new(Mutex::new(StreamInner {
                currency: initial_currency.into(),
                subscribers: Vec::new(),
                next_id: 0,
                ticker: None,
            })),
        }
    }

    /// Stream over the simulated sources and rates with default timing.
    pub fn simulated(initial_currency: impl Into<String>) -> Self {
        Self::new(
            PriceAggregator::simulated(),
            initial_currency,
            StreamConfig::default(),
        )
    }

    /// Register a callback. The first subscriber transitions the stream to
    /// Active: one immediate aggregate-and-notify, then the recurring timer.
    pub fn subscribe(
        &self,
        callback: impl Fn(AggregatedPrice) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut inner = self.inner.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(callback)));

        if inner.ticker.is_none() {
            info!(currency = %inner.currency, "first subscriber, starting price stream");
            inner.ticker = Some(self.spawn_ticker());
        }
        id
    }

    /// Deregister a callback; unknown ids are a no-op. Removing the last
    /// subscriber disarms the timer.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.inner.lock();
        inner.subscribers.retain(|(sid, _)| *sid != id);

        if inner.subscribers.is_empty() {
            if let Some(ticker) = inner.ticker.take() {
                info!("last subscriber left, stopping price stream");
                ticker.abort();
            }
        }
    }

    /// Switch the display currency. While Active the ticker is restarted so
    /// subscribers see the new currency promptly instead of waiting out a
    /// full interval.
    pub fn change_currency(&self, code: impl Into<String>) {
        let mut inner = self.inner.lock();
        inner.currency = code.into();

        if let Some(ticker) = inner.ticker.take() {
            ticker.abort();
            inner.ticker = Some(self.spawn_ticker());
        }
    }

    pub fn currency(&self) -> String {
        self.inner.lock().currency.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    pub fn is_active(&self) -> bool {
        self.inner.lock().ticker.is_some()
    }

    fn spawn_ticker(&self) -> JoinHandle<()> {
        let aggregator = Arc::clone(&self.aggregator);
        let inner = Arc::clone(&self.inner);
        let tick_interval = self.tick_interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_interval);
            loop {
                // First tick fires immediately, then every interval.
                interval.tick().await;
                run_cycle(&aggregator, &inner).await;
            }
        })
    }
}

impl Drop for PriceStream {
    fn drop(&mut self) {
        if let Some(ticker) = self.inner.lock().ticker.take() {
            ticker.abort();
        }
    }
}

async fn run_cycle(aggregator: &PriceAggregator, inner: &Mutex<StreamInner>) {
    let currency = inner.lock().currency.clone();

    match aggregator.aggregate(&currency).await {
        Ok(record) => {
            // Snapshot the registry so callbacks may re-enter the stream,
            // and so an emptied registry simply drops the result.
            let callbacks: Vec<PriceCallback> = inner
                .lock()
                .subscribers
                .iter()
                .map(|(_, cb)| Arc::clone(cb))
                .collect();

            debug!(
                price = record.price,
                currency = %record.currency,
                subscribers = callbacks.len(),
                "publishing aggregated price"
            );

            for callback in callbacks {
                callback(record.clone());
            }
        }
        // A failed cycle skips notification only; the timer keeps running.
        Err(e) => error!("aggregation cycle failed, skipping notification: {e}"),
    }
}
