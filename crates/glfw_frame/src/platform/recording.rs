//! Recording platform for tests
//!
//! [`RecordingPlatform`] opens no windows. It logs every call in order and lets
//! the test script the close flag, held keys, and creation failures. Clones
//! share state, so a test keeps one clone for inspection after moving the other
//! into a [`Window`](crate::Window).

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::{Key, WindowPlatform};
use crate::error::{PlatformError, PlatformResult};

/// Handle handed out by [`RecordingPlatform`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordedWindow(pub u32);

/// One recorded platform call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// `init`
    Init,
    /// `default_window_hints`
    DefaultWindowHints,
    /// `create_window`
    CreateWindow {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested title
        title: String,
    },
    /// `make_context_current`
    MakeContextCurrent(RecordedWindow),
    /// `set_swap_interval`
    SetSwapInterval(u32),
    /// `window_should_close`
    WindowShouldClose(RecordedWindow),
    /// `key_pressed`
    KeyPressed(RecordedWindow, Key),
    /// `pop_matrix`
    PopMatrix,
    /// `swap_buffers`
    SwapBuffers(RecordedWindow),
    /// `poll_events`
    PollEvents,
    /// `push_matrix`
    PushMatrix,
    /// `set_ortho`
    SetOrtho {
        /// Left plane
        left: f32,
        /// Right plane
        right: f32,
        /// Bottom plane
        bottom: f32,
        /// Top plane
        top: f32,
        /// Near plane
        near: f32,
        /// Far plane
        far: f32,
    },
    /// `destroy_window`
    DestroyWindow(RecordedWindow),
    /// `terminate`
    Terminate,
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<Call>,
    live: HashSet<RecordedWindow>,
    next_id: u32,
    close_requested: bool,
    pressed: HashSet<Key>,
    fail_init: bool,
    fail_create: bool,
    fail_swap: bool,
}

/// Scriptable [`WindowPlatform`] that records every call
#[derive(Debug, Clone, Default)]
pub struct RecordingPlatform {
    state: Rc<RefCell<RecordingState>>,
}

impl RecordingPlatform {
    /// Create a platform with no close request and no keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call recorded so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Forget the recorded calls
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Windows created and not yet destroyed
    pub fn live_windows(&self) -> usize {
        self.state.borrow().live.len()
    }

    /// Set the value `window_should_close` reports
    pub fn set_close_requested(&self, requested: bool) {
        self.state.borrow_mut().close_requested = requested;
    }

    /// Hold or release a key
    pub fn set_key(&self, key: Key, pressed: bool) {
        let mut state = self.state.borrow_mut();
        if pressed {
            state.pressed.insert(key);
        } else {
            state.pressed.remove(&key);
        }
    }

    /// Make the next `init` calls fail
    pub fn fail_init(&self) {
        self.state.borrow_mut().fail_init = true;
    }

    /// Make the next `create_window` calls fail
    pub fn fail_create(&self) {
        self.state.borrow_mut().fail_create = true;
    }

    /// Make the next `swap_buffers` calls fail
    pub fn fail_swap(&self) {
        self.state.borrow_mut().fail_swap = true;
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn check_live(&self, handle: RecordedWindow) -> PlatformResult<()> {
        if self.state.borrow().live.contains(&handle) {
            Ok(())
        } else {
            Err(PlatformError::UnknownWindow)
        }
    }
}

impl WindowPlatform for RecordingPlatform {
    type Handle = RecordedWindow;

    fn init(&mut self) -> PlatformResult<()> {
        self.record(Call::Init);
        if self.state.borrow().fail_init {
            return Err(PlatformError::InitializationFailed);
        }
        Ok(())
    }

    fn default_window_hints(&mut self) -> PlatformResult<()> {
        self.record(Call::DefaultWindowHints);
        Ok(())
    }

    fn create_window(
        &mut self,
        width: u32,
        height: u32,
        title: &str,
    ) -> PlatformResult<RecordedWindow> {
        self.record(Call::CreateWindow {
            width,
            height,
            title: title.to_string(),
        });

        let mut state = self.state.borrow_mut();
        if state.fail_create {
            return Err(PlatformError::CreationFailed(title.to_string()));
        }
        state.next_id += 1;
        let handle = RecordedWindow(state.next_id);
        state.live.insert(handle);
        Ok(handle)
    }

    fn make_context_current(&mut self, handle: RecordedWindow) -> PlatformResult<()> {
        self.record(Call::MakeContextCurrent(handle));
        self.check_live(handle)
    }

    fn set_swap_interval(&mut self, interval: u32) -> PlatformResult<()> {
        self.record(Call::SetSwapInterval(interval));
        Ok(())
    }

    fn window_should_close(&self, handle: RecordedWindow) -> PlatformResult<bool> {
        self.record(Call::WindowShouldClose(handle));
        self.check_live(handle)?;
        Ok(self.state.borrow().close_requested)
    }

    fn key_pressed(&self, handle: RecordedWindow, key: Key) -> PlatformResult<bool> {
        self.record(Call::KeyPressed(handle, key));
        self.check_live(handle)?;
        Ok(self.state.borrow().pressed.contains(&key))
    }

    fn pop_matrix(&mut self) {
        self.record(Call::PopMatrix);
    }

    fn push_matrix(&mut self) {
        self.record(Call::PushMatrix);
    }

    fn set_ortho(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.record(Call::SetOrtho {
            left,
            right,
            bottom,
            top,
            near,
            far,
        });
    }

    fn swap_buffers(&mut self, handle: RecordedWindow) -> PlatformResult<()> {
        self.record(Call::SwapBuffers(handle));
        self.check_live(handle)?;
        if self.state.borrow().fail_swap {
            return Err(PlatformError::GlfwError("swap failed".to_string()));
        }
        Ok(())
    }

    fn poll_events(&mut self) -> PlatformResult<()> {
        self.record(Call::PollEvents);
        Ok(())
    }

    fn destroy_window(&mut self, handle: RecordedWindow) -> PlatformResult<()> {
        self.record(Call::DestroyWindow(handle));
        if self.state.borrow_mut().live.remove(&handle) {
            Ok(())
        } else {
            Err(PlatformError::UnknownWindow)
        }
    }

    fn terminate(&mut self) {
        self.record(Call::Terminate);
    }
}
