//! Native windowing library seam
//!
//! [`WindowPlatform`] is the operation set the [`Window`](crate::Window) wrapper
//! consumes from the native library. It carries the library's process-wide
//! state (`init`/`terminate`) as an explicit value instead of a global, so a
//! window acquires it on construction and releases it on destroy.
//!
//! - **`glfw`**: the production backend over the `glfw` crate
//! - **`recording`**: a scriptable double that records every call

pub mod glfw;
pub mod recording;

use std::fmt::Debug;

use crate::error::PlatformResult;

/// Keys the wrapper can query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape
    Escape,
    /// Q
    Q,
}

/// Operations consumed from the native windowing library
///
/// Window operations take the opaque [`Handle`](WindowPlatform::Handle)
/// returned by [`create_window`](WindowPlatform::create_window). Matrix
/// operations act on the context made current last.
pub trait WindowPlatform {
    /// Opaque native window reference
    type Handle: Copy + Eq + Debug;

    /// Initialize the library's process-wide state
    fn init(&mut self) -> PlatformResult<()>;

    /// Reset window creation hints to their defaults
    fn default_window_hints(&mut self) -> PlatformResult<()>;

    /// Create a windowed-mode window with a GL context
    fn create_window(
        &mut self,
        width: u32,
        height: u32,
        title: &str,
    ) -> PlatformResult<Self::Handle>;

    /// Make the window's context current on the calling thread
    fn make_context_current(&mut self, handle: Self::Handle) -> PlatformResult<()>;

    /// Set how many refreshes to wait between buffer swaps
    fn set_swap_interval(&mut self, interval: u32) -> PlatformResult<()>;

    /// Whether a close was requested for the window
    fn window_should_close(&self, handle: Self::Handle) -> PlatformResult<bool>;

    /// Whether the key is currently held on the window
    fn key_pressed(&self, handle: Self::Handle, key: Key) -> PlatformResult<bool>;

    /// Pop the current transform
    fn pop_matrix(&mut self);

    /// Push a copy of the current transform
    fn push_matrix(&mut self);

    /// Multiply the current transform by an orthographic projection
    fn set_ortho(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32);

    /// Swap the window's front and back buffers
    fn swap_buffers(&mut self, handle: Self::Handle) -> PlatformResult<()>;

    /// Process pending window system events
    fn poll_events(&mut self) -> PlatformResult<()>;

    /// Destroy the window and its context
    fn destroy_window(&mut self, handle: Self::Handle) -> PlatformResult<()>;

    /// Release the library's process-wide state
    fn terminate(&mut self);
}
