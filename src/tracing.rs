//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

static INIT: Once = Once::new();

/// Initialize the tracing subscriber for embedders and tests.
///
/// Logs go to stderr so an embedding API layer keeps stdout to itself.
/// Safe to call multiple times; only the first call takes effect.
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::from_default_env().add_directive(::tracing::Level::INFO.into());

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
            .with_writer(std::io::stderr)
            .compact();

        if let Err(e) = builder.try_init() {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
