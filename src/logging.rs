//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "mse_manifest=trace,mse_manifest_media=trace"
    } else {
        "mse_manifest=debug,mse_manifest_media=debug"
    }
}

/// Install a global fmt subscriber.
///
/// Respects `RUST_LOG` if set. Does nothing if a subscriber is already
/// installed.
pub fn init_logging(verbose: bool) {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(verbose).to_string());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .try_init();
}
