//! Structured logging setup.
//!
//! The library itself only emits `tracing` events; applications that want to
//! see them call one of these initializers from `main`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize a subscriber filtered by `RUST_LOG`, defaulting to "info".
///
/// # Example
///
/// ```ignore
/// fn main() {
///     cmdtree::logging::init_subscriber();
///     // declare and run the tree
/// }
/// ```
pub fn init_subscriber() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize a subscriber at an explicit level, ignoring `RUST_LOG`.
pub fn init_subscriber_with_level(level: tracing::Level) {
    tracing_subscriber::registry()
        .with(EnvFilter::new(level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
