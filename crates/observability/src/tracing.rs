//! Subscriber initialization.
//!
//! The filter comes from `RUST_LOG` (default: `info` for our crates plus
//! `tower_http=info` so request spans show up).

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tower_http=info,sqlx=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event, for log shipping.
    Json,
    /// Plain text routed through the test writer.
    Test,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(format: LogFormat) {
    let result = match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .try_init(),
        LogFormat::Test => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_test_writer()
            .try_init(),
    };
    // Err only means a subscriber is already installed.
    let _ = result;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init(LogFormat::Test);
        init(LogFormat::Test);
        init(LogFormat::Json);
        ::tracing::info!("still logging after repeated init");
    }
}
