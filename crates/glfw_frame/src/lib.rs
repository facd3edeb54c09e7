//! # glfw_frame
//!
//! A single-window wrapper around GLFW that owns one native window and its GL
//! context, paces frames to the display refresh, and issues a fixed
//! transform/projection sequence at the end of every frame.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glfw_frame::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     glfw_frame::logging::init();
//!
//!     let config = WindowConfig::new("My Window");
//!     let mut window = Window::new(GlfwPlatform::new(), &config)?;
//!
//!     // Load GL entry points, e.g. with the `gl` crate:
//!     // gl::load_with(|name| {
//!     //     window.get_proc_address(name).map_or(std::ptr::null(), |p| p as *const _)
//!     // });
//!
//!     while !window.should_window_close()? {
//!         window.begin_paint();
//!         // Render the frame here
//!         window.end_paint()?;
//!     }
//!
//!     window.destroy()?;
//!     Ok(())
//! }
//! ```
//!
//! The native library sits behind the [`platform::WindowPlatform`] trait, so the
//! frame sequence can be driven by [`platform::recording::RecordingPlatform`]
//! in tests.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod transform;
pub mod window;

/// The native library, for anything the wrapper does not forward
pub use glfw;

pub use error::{PlatformError, PlatformResult, WindowError, WindowResult};
pub use window::Window;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, WindowConfig},
        error::{PlatformError, WindowError, WindowResult},
        platform::{glfw::GlfwPlatform, Key, WindowPlatform},
        transform::{Mat4, TransformStack},
        window::Window,
    };
}
