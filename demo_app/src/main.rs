//! Frame loop demo
//!
//! Opens a vsynced window and runs empty frames until it is closed or Escape
//! is pressed. Pass a `.toml` or `.ron` window config as the first argument to
//! override the defaults, e.g. `glfw_frame_demo demo_app/config/window.toml`.

use std::time::Instant;

use glfw_frame::prelude::*;

const DEFAULT_TITLE: &str = "glfw_frame demo";

fn load_config() -> Result<WindowConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading window config from {}", path);
            WindowConfig::load_from_file(path)
        }
        None => Ok(WindowConfig::new(DEFAULT_TITLE)),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let mut window = Window::new(GlfwPlatform::new(), &config)?;

    gl::load_with(|name| {
        window
            .get_proc_address(name)
            .map_or(std::ptr::null(), |address| address as *const _)
    });
    log::info!(
        "GL loaded (glViewport {}), framebuffer {:?}",
        if gl::Viewport::is_loaded() { "resolved" } else { "missing" },
        window.framebuffer_size()?
    );

    let start = Instant::now();

    while !window.should_window_close()? {
        window.begin_paint();
        window.end_paint()?;

        if window.frames_presented() % 600 == 0 {
            log::debug!(
                "{} frames, framebuffer {:?}, overlay projection {:?}",
                window.frames_presented(),
                window.framebuffer_size()?,
                window.platform().current_transform()
            );
        }
    }

    let elapsed = start.elapsed().as_secs_f64();
    #[allow(clippy::cast_precision_loss)]
    let fps = if elapsed > 0.0 {
        window.frames_presented() as f64 / elapsed
    } else {
        0.0
    };
    log::info!(
        "Presented {} frames in {:.1}s ({:.1} fps)",
        window.frames_presented(),
        elapsed,
        fps
    );

    window.destroy()?;
    Ok(())
}

fn main() {
    glfw_frame::logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
