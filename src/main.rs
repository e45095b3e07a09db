//! Instrumented Cache - demo driver
//!
//! Stores each command-line argument through the cache, then prints the
//! replayed history of the store operation.
//!
//! ```text
//! instrumented_cache [--json] VALUE...
//! ```

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use instrumented_cache::{replay, Cache, Config, StoredValue};

/// Main entry point for the demo driver.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the configured store and create the cache (flushes the store)
/// 4. Store every positional argument
/// 5. Print the replay report as text or JSON
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "instrumented_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut json = false;
    let mut values = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            values.push(parse_value(&arg));
        }
    }

    let config = Config::from_env();
    info!("Configuration loaded: backend={:?}", config.backend);

    let store = config
        .connect()
        .with_context(|| format!("failed to connect to {:?} store", config.backend))?;
    let cache = Cache::new(store).context("failed to initialize cache")?;

    for value in values {
        let key = cache.store(value)?;
        info!("Stored value under {}", key);
    }

    let report = replay(&cache.store_operation())?;
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report);
    }

    Ok(())
}

/// Integers and floats are stored as numbers, anything else as text.
fn parse_value(arg: &str) -> StoredValue {
    if let Ok(n) = arg.parse::<i64>() {
        StoredValue::Integer(n)
    } else if let Ok(x) = arg.parse::<f64>() {
        StoredValue::Float(x)
    } else {
        StoredValue::Text(arg.to_string())
    }
}
