//! Single-window wrapper
//!
//! [`Window`] owns one native window and the platform state behind it. The
//! platform is initialized when the window is built and terminated when it is
//! destroyed (or dropped), so release happens at most once per window.
//!
//! A frame looks like:
//!
//! ```text
//! while !window.should_window_close()? {
//!     window.begin_paint();
//!     // render pass, bracketed by the transform push/pop in end_paint
//!     window.end_paint()?;
//! }
//! window.destroy()?;
//! ```

use crate::config::WindowConfig;
use crate::error::{WindowError, WindowResult};
use crate::platform::{Key, WindowPlatform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowState<H> {
    Live(H),
    Destroyed,
}

/// One native window with an active GL context
pub struct Window<P: WindowPlatform> {
    platform: P,
    state: WindowState<P::Handle>,
    width: u32,
    height: u32,
    close_key: Option<Key>,
    frames_presented: u64,
}

impl<P: WindowPlatform> Window<P> {
    /// Open a window described by `config`
    ///
    /// Initializes the platform, resets window hints, creates the window, makes
    /// its context current and sets the swap interval. If a step after `init`
    /// fails, whatever was acquired is released before the error is returned.
    pub fn new(mut platform: P, config: &WindowConfig) -> WindowResult<Self> {
        config.validate()?;

        platform.init()?;
        let handle = match Self::open(&mut platform, config) {
            Ok(handle) => handle,
            Err(e) => {
                platform.terminate();
                return Err(e);
            }
        };

        log::info!(
            "Window \"{}\" ready ({}x{}, swap interval {})",
            config.title,
            config.width,
            config.height,
            config.swap_interval
        );

        Ok(Self {
            platform,
            state: WindowState::Live(handle),
            width: config.width,
            height: config.height,
            close_key: config.close_on_escape.then_some(Key::Escape),
            frames_presented: 0,
        })
    }

    /// Open a 1280x720 vsynced window
    pub fn with_title(platform: P, title: &str) -> WindowResult<Self> {
        Self::new(platform, &WindowConfig::new(title))
    }

    fn open(platform: &mut P, config: &WindowConfig) -> WindowResult<P::Handle> {
        platform.default_window_hints()?;
        let handle = platform.create_window(config.width, config.height, &config.title)?;

        let activated = platform
            .make_context_current(handle)
            .and_then(|()| platform.set_swap_interval(config.swap_interval));

        if let Err(e) = activated {
            if let Err(destroy_err) = platform.destroy_window(handle) {
                log::warn!("Failed to destroy half-initialized window: {}", destroy_err);
            }
            return Err(e.into());
        }
        Ok(handle)
    }

    /// Client area width in pixels, as constructed
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Client area height in pixels, as constructed
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The native handle, or `None` once destroyed
    pub const fn native_handle(&self) -> Option<P::Handle> {
        match self.state {
            WindowState::Live(handle) => Some(handle),
            WindowState::Destroyed => None,
        }
    }

    /// Whether `destroy` has run
    pub const fn is_destroyed(&self) -> bool {
        matches!(self.state, WindowState::Destroyed)
    }

    /// Number of completed `end_paint` calls
    pub const fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// The key that counts as a close request, if any
    pub const fn close_key(&self) -> Option<Key> {
        self.close_key
    }

    /// Replace the close key; `None` leaves only the native close flag
    pub fn set_close_key(&mut self, key: Option<Key>) {
        self.close_key = key;
    }

    /// The platform this window runs on
    pub const fn platform(&self) -> &P {
        &self.platform
    }

    pub(crate) fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    fn handle(&self) -> WindowResult<P::Handle> {
        self.native_handle().ok_or(WindowError::Destroyed)
    }

    /// Whether the window should close
    ///
    /// True when the native close flag is set. Otherwise, true while the close
    /// key (Escape by default) is held. The key is only queried when the flag
    /// is clear.
    pub fn should_window_close(&self) -> WindowResult<bool> {
        let handle = self.handle()?;

        if self.platform.window_should_close(handle)? {
            return Ok(true);
        }

        match self.close_key {
            Some(key) => Ok(self.platform.key_pressed(handle, key)?),
            None => Ok(false),
        }
    }

    /// Start a frame
    ///
    /// Deliberately issues no platform calls: the back buffer is not cleared
    /// because the depth and colour streams drawn into it are not in sync yet.
    #[allow(clippy::unused_self)]
    pub const fn begin_paint(&self) {}

    /// Finish a frame
    ///
    /// Pops the transform pushed at the end of the previous frame, presents,
    /// pumps events, then pushes a fresh transform with a top-left-origin
    /// orthographic projection over the window size for the next frame.
    ///
    /// The transform is pushed again even when presenting fails, so the
    /// push/pop bracket stays balanced; the frame is not counted and the
    /// error is returned after the push.
    #[allow(clippy::cast_precision_loss)]
    pub fn end_paint(&mut self) -> WindowResult<()> {
        let handle = self.handle()?;

        self.platform.pop_matrix();
        let presented = self
            .platform
            .swap_buffers(handle)
            .and_then(|()| self.platform.poll_events());
        self.platform.push_matrix();
        self.platform
            .set_ortho(0.0, self.width as f32, self.height as f32, 0.0, -1.0, 1.0);

        presented?;
        self.frames_presented += 1;
        Ok(())
    }

    /// Destroy the window and release the platform
    ///
    /// Calls `destroy_window` then `terminate`. A second call returns
    /// [`WindowError::Destroyed`] without touching the platform.
    pub fn destroy(&mut self) -> WindowResult<()> {
        let handle = self.handle()?;
        self.state = WindowState::Destroyed;

        let destroyed = self.platform.destroy_window(handle);
        self.platform.terminate();
        log::info!("Window destroyed after {} frames", self.frames_presented);

        destroyed.map_err(WindowError::from)
    }
}

impl<P: WindowPlatform> Drop for Window<P> {
    fn drop(&mut self) {
        if self.is_destroyed() {
            return;
        }
        if let Err(e) = self.destroy() {
            log::warn!("Failed to destroy window on drop: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::error::PlatformError;
    use crate::platform::recording::{Call, RecordedWindow, RecordingPlatform};

    fn open(config: &WindowConfig) -> (Window<RecordingPlatform>, RecordingPlatform) {
        let platform = RecordingPlatform::new();
        let recorder = platform.clone();
        let window = Window::new(platform, config).unwrap();
        recorder.clear_calls();
        (window, recorder)
    }

    #[test]
    fn test_construction_sequence() {
        let platform = RecordingPlatform::new();
        let recorder = platform.clone();
        let window = Window::with_title(platform, "Depth").unwrap();
        let handle = window.native_handle().unwrap();

        assert_eq!(
            recorder.calls(),
            vec![
                Call::Init,
                Call::DefaultWindowHints,
                Call::CreateWindow {
                    width: 1280,
                    height: 720,
                    title: "Depth".to_string(),
                },
                Call::MakeContextCurrent(handle),
                Call::SetSwapInterval(1),
            ]
        );
    }

    #[test]
    fn test_dimensions_match_arguments() {
        let (window, _) = open(&WindowConfig::new("Sized").with_size(640, 480));
        assert_eq!(window.width(), 640);
        assert_eq!(window.height(), 480);

        let window = Window::with_title(RecordingPlatform::new(), "Default").unwrap();
        assert_eq!(window.width(), 1280);
        assert_eq!(window.height(), 720);
    }

    #[test]
    fn test_invalid_size_touches_nothing() {
        let platform = RecordingPlatform::new();
        let recorder = platform.clone();
        let result = Window::new(platform, &WindowConfig::new("Bad").with_size(0, 720));

        assert!(matches!(result, Err(WindowError::Config(ConfigError::Invalid(_)))));
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_init_failure_is_passed_through() {
        let platform = RecordingPlatform::new();
        platform.fail_init();
        let recorder = platform.clone();

        let result = Window::with_title(platform, "No GLFW");

        assert!(matches!(
            result,
            Err(WindowError::Platform(PlatformError::InitializationFailed))
        ));
        assert_eq!(recorder.calls(), vec![Call::Init]);
    }

    #[test]
    fn test_creation_failure_releases_platform() {
        let platform = RecordingPlatform::new();
        platform.fail_create();
        let recorder = platform.clone();

        let result = Window::with_title(platform, "No context");

        assert!(matches!(
            result,
            Err(WindowError::Platform(PlatformError::CreationFailed(_)))
        ));
        assert_eq!(recorder.calls().last(), Some(&Call::Terminate));
        assert_eq!(recorder.live_windows(), 0);
    }

    #[test]
    fn test_close_flag_skips_key_query() {
        let (window, recorder) = open(&WindowConfig::new("Close"));
        let handle = window.native_handle().unwrap();
        recorder.set_close_requested(true);

        assert!(window.should_window_close().unwrap());
        assert_eq!(recorder.calls(), vec![Call::WindowShouldClose(handle)]);
    }

    #[test]
    fn test_escape_requests_close() {
        let (window, recorder) = open(&WindowConfig::new("Escape"));
        let handle = window.native_handle().unwrap();

        assert!(!window.should_window_close().unwrap());

        recorder.set_key(Key::Escape, true);
        recorder.clear_calls();
        assert!(window.should_window_close().unwrap());
        assert_eq!(
            recorder.calls(),
            vec![
                Call::WindowShouldClose(handle),
                Call::KeyPressed(handle, Key::Escape),
            ]
        );
    }

    #[test]
    fn test_close_key_can_be_replaced() {
        let (mut window, recorder) = open(&WindowConfig::new("Keys").with_close_on_escape(false));
        assert_eq!(window.close_key(), None);

        recorder.set_key(Key::Escape, true);
        assert!(!window.should_window_close().unwrap());

        window.set_close_key(Some(Key::Q));
        assert!(!window.should_window_close().unwrap());
        recorder.set_key(Key::Q, true);
        assert!(window.should_window_close().unwrap());
    }

    #[test]
    fn test_begin_paint_is_a_no_op() {
        let (window, recorder) = open(&WindowConfig::new("Paint"));
        window.begin_paint();
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_end_paint_order() {
        let (mut window, recorder) = open(&WindowConfig::new("Frame").with_size(800, 600));
        let handle = window.native_handle().unwrap();

        window.end_paint().unwrap();

        assert_eq!(
            recorder.calls(),
            vec![
                Call::PopMatrix,
                Call::SwapBuffers(handle),
                Call::PollEvents,
                Call::PushMatrix,
                Call::SetOrtho {
                    left: 0.0,
                    right: 800.0,
                    bottom: 600.0,
                    top: 0.0,
                    near: -1.0,
                    far: 1.0,
                },
            ]
        );
        assert_eq!(window.frames_presented(), 1);
    }

    #[test]
    fn test_failed_swap_keeps_bracket_balanced() {
        let (mut window, recorder) = open(&WindowConfig::new("Lost").with_size(320, 240));
        let handle = window.native_handle().unwrap();
        recorder.fail_swap();

        let result = window.end_paint();

        assert!(matches!(
            result,
            Err(WindowError::Platform(PlatformError::GlfwError(_)))
        ));
        assert_eq!(
            recorder.calls(),
            vec![
                Call::PopMatrix,
                Call::SwapBuffers(handle),
                Call::PushMatrix,
                Call::SetOrtho {
                    left: 0.0,
                    right: 320.0,
                    bottom: 240.0,
                    top: 0.0,
                    near: -1.0,
                    far: 1.0,
                },
            ]
        );
        assert_eq!(window.frames_presented(), 0);
    }

    #[test]
    fn test_destroy_order_and_handle_cleared() {
        let (mut window, recorder) = open(&WindowConfig::new("Destroy"));
        let handle = window.native_handle().unwrap();

        window.destroy().unwrap();

        assert_eq!(recorder.calls(), vec![Call::DestroyWindow(handle), Call::Terminate]);
        assert!(window.native_handle().is_none());
        assert!(window.is_destroyed());
    }

    #[test]
    fn test_double_destroy_is_an_error() {
        let (mut window, recorder) = open(&WindowConfig::new("Twice"));
        window.destroy().unwrap();
        recorder.clear_calls();

        assert!(matches!(window.destroy(), Err(WindowError::Destroyed)));
        assert!(matches!(window.end_paint(), Err(WindowError::Destroyed)));
        assert!(matches!(window.should_window_close(), Err(WindowError::Destroyed)));
        assert!(recorder.calls().is_empty());

        drop(window);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_drop_releases_once() {
        let (window, recorder) = open(&WindowConfig::new("Dropped"));
        let handle = window.native_handle().unwrap();

        drop(window);

        assert_eq!(recorder.calls(), vec![Call::DestroyWindow(handle), Call::Terminate]);
        assert_eq!(recorder.live_windows(), 0);
    }

    #[test]
    fn test_frame_loop_until_escape() {
        let (mut window, recorder) = open(&WindowConfig::new("Loop"));
        assert_eq!(window.native_handle(), Some(RecordedWindow(1)));

        while !window.should_window_close().unwrap() {
            window.begin_paint();
            window.end_paint().unwrap();
            if window.frames_presented() == 3 {
                recorder.set_key(Key::Escape, true);
            }
        }

        assert_eq!(window.frames_presented(), 3);
        window.destroy().unwrap();
    }
}
