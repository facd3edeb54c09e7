//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Reads the filter from `RUST_LOG`. Call once, before creating a window.
pub fn init() {
    env_logger::init();
}
