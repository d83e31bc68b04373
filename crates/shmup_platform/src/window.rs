use std::sync::Arc;
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "shmup".to_string(),
            width: 800,
            height: 600,
            resizable: false,
        }
    }
}

/// Create the game window. The playfield is a fixed logical size, so the window is
/// not resizable unless the config asks for it.
pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, OsError> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable);

    let window = event_loop.create_window(attrs)?;
    log::debug!(
        "Window '{}' created with scale factor {}",
        config.title,
        window.scale_factor()
    );
    Ok(Arc::new(window))
}
