//! Test tracing setup

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // another subscriber may already be installed by the test binary
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init()
        .ok();
});

/// Installs a fmt subscriber once per test binary, filtered by `RUST_LOG`
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
