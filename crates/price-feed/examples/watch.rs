//! Minimal stand-in for the presentation layer: subscribe to the simulated
//! stream, print a few snapshots, switch currency mid-run, then leave.
//!
//!     cargo run -p goldfeed-price-feed --example watch

use goldfeed_price_feed::PriceStream;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let stream = PriceStream::simulated("USD");

    let id = stream.subscribe(|record| {
        info!(
            "{} {:.2} ({:+.2}, {:+.3}%) from {} sources",
            record.currency,
            record.price,
            record.change,
            record.change_percent,
            record.sources.len()
        );
    });

    tokio::time::sleep(std::time::Duration::from_secs(12)).await;

    info!("switching display currency to EUR");
    stream.change_currency("EUR");

    tokio::time::sleep(std::time::Duration::from_secs(12)).await;

    stream.unsubscribe(id);
    info!("unsubscribed, stream is idle");
    Ok(())
}
