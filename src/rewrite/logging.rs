//! Tracing setup for the command-line tool
//!
//! The library only emits `tracing` events: queued operations at `trace`, rollbacks and
//! renders at `debug`. Binaries decide where they go by calling [init].
//!
//! Filtering follows the `RUST_LOG` environment variable when set:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=token_rewrite::rewrite::stream=trace` - every queued operation
//!
//! Otherwise the configured level (`logging.level`) applies.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Build the console filter: `RUST_LOG` first, then `level`, then `warn`.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install a stderr subscriber. Calling it twice keeps the first subscriber.
pub fn init(level: &str) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter(level));

    if let Err(e) = tracing_subscriber::registry().with(console_layer).try_init() {
        eprintln!("Warning: Could not initialize logging: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_falls_back() {
        // Must not panic whatever RUST_LOG holds
        let _ = filter("definitely=not=a=filter");
        let _ = filter("debug");
    }
}
