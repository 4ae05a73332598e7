use std::sync::Arc;
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
        // The viewport is a fixed window into level space, so the window
        // stays at its logical size.
        Self {
            title: "Scroller".to_string(),
            width: 640,
            height: 480,
            resizable: false,
        }
    }
}

pub fn create_window(event_loop: &ActiveEventLoop, config: &PlatformConfig) -> Arc<Window> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable);

    let window = event_loop
        .create_window(attrs)
        .expect("Failed to create window");
    log::debug!(
        "Created window '{}' at {}x{}",
        config.title,
        config.width,
        config.height
    );
    Arc::new(window)
}
