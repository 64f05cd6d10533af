//! Tracing/logging initialization.
//!
//! Logs go to stderr so they never interleave with the interactive menu on stdout.

use tracing_subscriber::EnvFilter;

/// Set to `1` or `true` to emit JSON log lines instead of human-readable ones.
pub const JSON_ENV: &str = "STOCKBOOK_LOG_JSON";

/// Initialize tracing/logging for the process.
///
/// Filtering follows `RUST_LOG` (default `info`). Safe to call multiple times
/// (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if json_requested() {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}

fn json_requested() -> bool {
    std::env::var(JSON_ENV)
        .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init();
        init();
        ::tracing::info!("still logging");
    }
}
