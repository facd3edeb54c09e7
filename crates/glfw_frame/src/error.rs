//! Error types for the native platform layer and the window wrapper

use thiserror::Error;

use crate::config::ConfigError;

/// Failures reported by the native windowing library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The library's process-wide state could not be initialized
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// A native window or its GL context could not be created
    #[error("Window creation failed: {0}")]
    CreationFailed(String),

    /// An operation needed the library but `init` had not succeeded
    #[error("Windowing library is not initialized")]
    NotInitialized,

    /// The handle does not name a live native window
    #[error("Unknown native window handle")]
    UnknownWindow,

    /// Any other library-reported failure
    #[error("GLFW error: {0}")]
    GlfwError(String),
}

/// Result alias for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Failures of the [`Window`](crate::Window) wrapper
#[derive(Error, Debug)]
pub enum WindowError {
    /// Native library failure, passed through unchanged
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Construction parameters were rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The window was already destroyed
    #[error("Window has already been destroyed")]
    Destroyed,
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;
