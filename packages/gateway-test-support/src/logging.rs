//! Test logging bootstrap shared by unit and integration tests.
//!
//! Filter precedence: `TEST_LOG`, then `RUST_LOG`, then `warn`.
//! Set `TEST_LOG_FORMAT=json` to see events in the same JSON shape the
//! gateway binary emits; anything else gives compact text.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var("TEST_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

fn filter_from_env() -> EnvFilter {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the test subscriber once per process. Later calls are no-ops.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let builder = fmt()
            .with_env_filter(filter_from_env())
            .with_test_writer()
            .without_time();

        match LogFormat::from_env() {
            LogFormat::Json => builder.json().try_init().ok(),
            LogFormat::Text => builder.compact().try_init().ok(),
        };
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        assert!(INITIALIZED.get().is_some());
        tracing_subscriber::fmt().try_init().unwrap_err();
    }
}
