//! GLFW-backed platform
//!
//! Windows live in a slot map so the wrapper only ever holds a small `Copy`
//! key. GLFW itself terminates once the last `Glfw` token is dropped; the
//! windows hold tokens too, so `terminate` drops them first.

use glfw::{
    Action, Context, GLProc, Glfw, GlfwReceiver, PWindow, SwapInterval, WindowEvent, WindowMode,
};
use slotmap::{new_key_type, SlotMap};

use super::{Key, WindowPlatform};
use crate::error::{PlatformError, PlatformResult};
use crate::error::{WindowError, WindowResult};
use crate::transform::{Mat4, TransformStack};
use crate::window::Window;

new_key_type! {
    /// Handle to a window owned by a [`GlfwPlatform`]
    pub struct GlfwWindowId;
}

struct GlfwWindow {
    window: PWindow,
    events: GlfwReceiver<(f64, WindowEvent)>,
    framebuffer_size: (u32, u32),
}

/// [`WindowPlatform`] over the `glfw` crate
pub struct GlfwPlatform {
    glfw: Option<Glfw>,
    windows: SlotMap<GlfwWindowId, GlfwWindow>,
    transforms: TransformStack,
}

impl GlfwPlatform {
    /// Create an uninitialized platform; GLFW starts on `init`
    pub fn new() -> Self {
        Self {
            glfw: None,
            windows: SlotMap::with_key(),
            transforms: TransformStack::new(),
        }
    }

    /// The transform built up by the push/pop/ortho calls
    ///
    /// Renderers upload this as their overlay projection.
    pub fn current_transform(&self) -> &Mat4 {
        self.transforms.top()
    }

    /// Framebuffer size in pixels, updated on `poll_events`
    pub fn framebuffer_size(&self, handle: GlfwWindowId) -> PlatformResult<(u32, u32)> {
        Ok(self.window(handle)?.framebuffer_size)
    }

    /// Look up a GL function in the window's context
    ///
    /// The context must be current on the calling thread; `Window::new` makes
    /// it current. Unknown names resolve to a null pointer.
    pub fn get_proc_address(
        &mut self,
        handle: GlfwWindowId,
        name: &str,
    ) -> PlatformResult<GLProc> {
        Ok(self.window_mut(handle)?.window.get_proc_address(name))
    }

    fn glfw_mut(&mut self) -> PlatformResult<&mut Glfw> {
        self.glfw.as_mut().ok_or(PlatformError::NotInitialized)
    }

    fn window(&self, handle: GlfwWindowId) -> PlatformResult<&GlfwWindow> {
        self.windows.get(handle).ok_or(PlatformError::UnknownWindow)
    }

    fn window_mut(&mut self, handle: GlfwWindowId) -> PlatformResult<&mut GlfwWindow> {
        self.windows.get_mut(handle).ok_or(PlatformError::UnknownWindow)
    }
}

impl Default for GlfwPlatform {
    fn default() -> Self {
        Self::new()
    }
}

const fn glfw_key(key: Key) -> glfw::Key {
    match key {
        Key::Escape => glfw::Key::Escape,
        Key::Q => glfw::Key::Q,
    }
}

const fn is_held(action: Action) -> bool {
    !matches!(action, Action::Release)
}

const fn swap_interval(interval: u32) -> SwapInterval {
    if interval == 0 {
        SwapInterval::None
    } else {
        SwapInterval::Sync(interval)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn log_glfw_error(error: glfw::Error, description: String) {
    log::error!("GLFW error {:?}: {}", error, description);
}

fn to_pixels(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

impl WindowPlatform for GlfwPlatform {
    type Handle = GlfwWindowId;

    fn init(&mut self) -> PlatformResult<()> {
        if self.glfw.is_some() {
            return Ok(());
        }

        let glfw = glfw::init(log_glfw_error).map_err(|e| {
            log::error!("GLFW init failed: {:?}", e);
            PlatformError::InitializationFailed
        })?;
        log::debug!("GLFW {} initialized", glfw::get_version_string());

        self.glfw = Some(glfw);
        Ok(())
    }

    fn default_window_hints(&mut self) -> PlatformResult<()> {
        self.glfw_mut()?.default_window_hints();
        Ok(())
    }

    fn create_window(
        &mut self,
        width: u32,
        height: u32,
        title: &str,
    ) -> PlatformResult<GlfwWindowId> {
        let (mut window, events) = self
            .glfw_mut()?
            .create_window(width, height, title, WindowMode::Windowed)
            .ok_or_else(|| {
                PlatformError::CreationFailed(format!("{width}x{height} \"{title}\""))
            })?;

        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        let (fb_width, fb_height) = window.get_framebuffer_size();
        let id = self.windows.insert(GlfwWindow {
            window,
            events,
            framebuffer_size: (to_pixels(fb_width), to_pixels(fb_height)),
        });

        log::info!("Created {}x{} window \"{}\"", width, height, title);
        Ok(id)
    }

    fn make_context_current(&mut self, handle: GlfwWindowId) -> PlatformResult<()> {
        self.window_mut(handle)?.window.make_current();
        Ok(())
    }

    fn set_swap_interval(&mut self, interval: u32) -> PlatformResult<()> {
        self.glfw_mut()?.set_swap_interval(swap_interval(interval));
        Ok(())
    }

    fn window_should_close(&self, handle: GlfwWindowId) -> PlatformResult<bool> {
        Ok(self.window(handle)?.window.should_close())
    }

    fn key_pressed(&self, handle: GlfwWindowId, key: Key) -> PlatformResult<bool> {
        Ok(is_held(self.window(handle)?.window.get_key(glfw_key(key))))
    }

    fn pop_matrix(&mut self) {
        if !self.transforms.pop() {
            log::trace!("Transform stack underflow ignored");
        }
    }

    fn push_matrix(&mut self) {
        self.transforms.push();
    }

    fn set_ortho(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.transforms.ortho(left, right, bottom, top, near, far);
    }

    fn swap_buffers(&mut self, handle: GlfwWindowId) -> PlatformResult<()> {
        self.window_mut(handle)?.window.swap_buffers();
        Ok(())
    }

    fn poll_events(&mut self) -> PlatformResult<()> {
        self.glfw_mut()?.poll_events();

        for slot in self.windows.values_mut() {
            for (_, event) in glfw::flush_messages(&slot.events) {
                match event {
                    WindowEvent::FramebufferSize(width, height) => {
                        slot.framebuffer_size = (to_pixels(width), to_pixels(height));
                        log::debug!("Framebuffer resized to {}x{}", width, height);
                    }
                    WindowEvent::Close => log::debug!("Close requested"),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn destroy_window(&mut self, handle: GlfwWindowId) -> PlatformResult<()> {
        self.windows.remove(handle).ok_or(PlatformError::UnknownWindow)?;
        log::info!("Window destroyed");
        Ok(())
    }

    fn terminate(&mut self) {
        self.windows.clear();
        if self.glfw.take().is_some() {
            log::info!("GLFW terminated");
        }
        self.transforms = TransformStack::new();
    }
}

impl Window<GlfwPlatform> {
    /// Look up a GL function in this window's context, for GL loaders
    ///
    /// ```rust,ignore
    /// gl::load_with(|name| {
    ///     window.get_proc_address(name).map_or(std::ptr::null(), |p| p as *const _)
    /// });
    /// ```
    pub fn get_proc_address(&mut self, name: &str) -> WindowResult<GLProc> {
        let handle = self.native_handle().ok_or(WindowError::Destroyed)?;
        Ok(self.platform_mut().get_proc_address(handle, name)?)
    }

    /// Current framebuffer size in pixels
    ///
    /// Differs from `width()`/`height()` after a resize or on high-DPI displays.
    pub fn framebuffer_size(&self) -> WindowResult<(u32, u32)> {
        let handle = self.native_handle().ok_or(WindowError::Destroyed)?;
        Ok(self.platform().framebuffer_size(handle)?)
    }
}
