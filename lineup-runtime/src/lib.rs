//! Worker runtime for live selection sessions: registry + event emission.

pub mod event_log;
pub mod registry;

pub use event_log::EventLog;
pub use registry::{SessionId, SessionRegistry};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
