//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! The widget only emits events; installing a subscriber is up to the
//! embedding. The browser entry point installs one that writes to the
//! devtools console, native hosts pick any [`MakeWriter`].
//!
//! # Log Levels
//!
//! - `warn`: Failed storage writes, identifiers that cannot be submitted
//! - `info`: Widget start-up, submissions
//! - `debug`: Load outcome, bound controls, viewport restore
//! - `trace`: Every persisted write
//!
//! # Usage
//!
//! ```ignore
//! use ratatoskr_webapp::logging::{init_logging_with_writer, LogConfig};
//!
//! let config = LogConfig {
//!     level: tracing::Level::DEBUG,
//!     ..LogConfig::default()
//! };
//! init_logging_with_writer(&config, std::io::stderr)?;
//! ```

use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{EnvFilter, fmt, fmt::MakeWriter, layer::SubscriberExt};

/// Crates whose events the default filter lets through at the configured level.
const CRATES: [&str; 3] = ["ratatoskr_model", "ratatoskr_persistence", "ratatoskr_webapp"];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter (error, warn, info, debug, trace).
    pub level: Level,
    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    /// Output format.
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            // No wall clock on wasm32-unknown-unknown.
            with_timestamps: false,
            with_target: false,
            with_ansi: false,
            format: LogFormat::default(),
        }
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> Result<(), SetGlobalDefaultError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing::subscriber::set_global_default(build_subscriber(config, writer))
}

/// Build a subscriber without installing it. `RUST_LOG` overrides the level.
pub fn build_subscriber<W>(
    config: &LogConfig,
    writer: W,
) -> Box<dyn tracing::Subscriber + Send + Sync + 'static>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    build_subscriber_with_filter(config, build_env_filter(config.level), writer)
}

/// Build a subscriber with an explicit filter, ignoring the environment.
pub fn build_subscriber_with_filter<W>(
    config: &LogConfig,
    filter: EnvFilter,
    writer: W,
) -> Box<dyn tracing::Subscriber + Send + Sync + 'static>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);

    match (config.format, config.with_timestamps) {
        (LogFormat::Json, true) => Box::new(
            registry.with(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_target(config.with_target),
            ),
        ),
        (LogFormat::Json, false) => Box::new(
            registry.with(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_target(config.with_target)
                    .without_time(),
            ),
        ),
        (LogFormat::Compact, true) => Box::new(
            registry.with(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            ),
        ),
        (LogFormat::Compact, false) => Box::new(
            registry.with(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target)
                    .without_time(),
            ),
        ),
        (LogFormat::Pretty, true) => Box::new(
            registry.with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            ),
        ),
        (LogFormat::Pretty, false) => Box::new(
            registry.with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target)
                    .without_time(),
            ),
        ),
    }
}

/// Default filter directives: `warn` globally, `level` for our crates.
fn filter_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    let mut directives = String::from("warn");
    for krate in CRATES {
        directives.push_str(&format!(",{krate}={level}"));
    }
    directives
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG`.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(level)))
}
