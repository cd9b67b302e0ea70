//! Logging and tracing initialization.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Default filter: camtrail crates at `info`, dependencies at `warn`.
///
/// Directive targets match by prefix, so `camtrail` covers every
/// `camtrail_*` crate and the CLI binary.
pub const DEFAULT_LOG_FILTER: &str = "warn,camtrail=info";

/// Filter used by `-v`: camtrail crates at `debug`.
pub const VERBOSE_LOG_FILTER: &str = "warn,camtrail=debug";

/// Build the event filter. `RUST_LOG` wins over the configured level; a
/// configured level that does not parse falls back to [`DEFAULT_LOG_FILTER`].
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    configured_filter(config)
}

fn configured_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(&config.level).unwrap_or_else(|e| {
        eprintln!(
            "Invalid log level '{}' ({e}), using '{DEFAULT_LOG_FILTER}'",
            config.level
        );
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}

/// Initialize the tracing subscriber with the given configuration.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::fmt;

    let env_filter = build_filter(config);

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}
