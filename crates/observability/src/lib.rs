//! Shared tracing/logging setup for coursekit binaries.

/// Tracing configuration (filters, formatting).
pub mod tracing;

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    tracing::init();
}
