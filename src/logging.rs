//! Logging setup on `tracing` and `tracing-subscriber`.
//!
//! Progress lines are plain stdout output; everything emitted through
//! `tracing` goes to stderr so it never mixes with them.
//!
//! - `warn`: missing columns, unauthenticated client
//! - `info`: run summary
//! - `debug`: file shape, skipped rows, each document request

use std::io;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use tracing_subscriber::util::TryInitError;

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` is not set.
    pub level: Level,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    /// Whether to include the module path in output.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), TryInitError> {
    let layer = fmt::layer()
        .compact()
        .without_time()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target);

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init()
}

/// `RUST_LOG` wins; otherwise this crate logs at `level` and dependencies at warn.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!("warn,vocab_upload={level}"))
    })
}
