#![forbid(unsafe_code)]

//! Structured logging hooks.
//!
//! With the `tracing` feature the crate emits `tracing` spans and events
//! (`checktree.build`, `checktree.cascade`, `checktree.cascade.miss`,
//! `checktree.set`, `checktree.history`, `checktree.export`), all at debug
//! level. Without it every call site compiles away.
//!
//! The `tracing-json` feature adds [`init_json_subscriber`] for production
//! binaries that want newline-delimited JSON logs filtered by `RUST_LOG`.

/// Install a global JSON subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG`, falling back to `default_directive`
/// (for example `"checktree_core=debug"`). Returns `false` if a global
/// subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber(default_directive: &str) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
