use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a test-friendly tracing subscriber.
///
/// Output goes through the test harness writer so it is only shown for
/// failing tests. The level comes from `RUST_LOG`, defaulting to "debug".
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_test_writer()
        .with_target(true)
        .with_level(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}
