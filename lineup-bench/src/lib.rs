//! lineup-bench: criterion microbenches for the selection engine.

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
