//! Diagnostic tracing for textpatch.
//!
//! Two output channels never mix:
//!
//! - **Results** (what was renamed, patched, spliced, rewritten, the `--json`
//!   report) go to stdout from the CLI and are always printed.
//! - **Diagnostics** (this module) go to stderr through `tracing`, filtered
//!   by `RUST_LOG`. At the default `warn` level only precondition misses and
//!   failures skipped by `--keep-going` show up. `info` adds one event per
//!   edited file; `debug` adds plan loads, atomic writes and duplicate paths.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset, empty, or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from a `RUST_LOG`-style directive string.
fn filter_from(spec: Option<&str>) -> EnvFilter {
    spec.map(str::trim)
        .filter(|spec| !spec.is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the stderr subscriber.
///
/// # Example
/// ```bash
/// RUST_LOG=textpatch=debug textpatch apply --dry-run
/// ```
pub fn init() {
    let spec = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(filter_from(spec.as_deref()))
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
