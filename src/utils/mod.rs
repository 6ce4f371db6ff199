//! Process level helpers
//!
//! Currently only signal handling for a graceful shutdown.

pub mod signals;

// Re-export main functions
pub use signals::shutdown_signal;
