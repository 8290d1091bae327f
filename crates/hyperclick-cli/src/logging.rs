//! Logging initialization for the CLI.
//!
//! Logging is owned by the CLI crate; the core library only emits events.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber based on configuration.
///
/// # Arguments
/// * `verbosity` - 0 = WARN, 1 = DEBUG, 2+ = TRACE
/// * `json` - If true, output JSON lines to stderr
///
/// `RUST_LOG` is honoured; a non-zero verbosity overrides it for hyperclick targets.
pub fn init(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let filter = match verbosity {
        0 => filter,
        1 => with_level(filter, Level::DEBUG),
        _ => with_level(filter, Level::TRACE),
    };

    let subscriber = tracing_subscriber::registry().with(filter);

    // Results go to stdout; keep logs on stderr so they never mix.
    if json {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn with_level(filter: EnvFilter, level: Level) -> EnvFilter {
    let mut filter = filter;
    for target in ["hyperclick_core", "hyperclick"] {
        if let Ok(directive) = format!("{target}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}
