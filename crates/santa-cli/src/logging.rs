//! Tracing subscriber setup for the binary.

use tracing_subscriber::{fmt, EnvFilter};

const CRATES: [&str; 3] = ["santa_cli", "santa_assign", "santa_core"];

/// Builds the filter directive applied when `RUST_LOG` is not set.
pub fn default_directive(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs a compact stderr subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive(level))?,
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init()
}
