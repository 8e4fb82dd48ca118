//! Window management system
//!
//! Handles window creation, the native cursor glyph, fullscreen toggle, and
//! title updates while the success message is showing.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use starfx_core::NativeCursor;
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
    success_title: String,
    message_visible: bool,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
            success_title: config.success_title.clone(),
            message_visible: false,
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Handle to the native cursor for the cursor trail
    pub fn native_cursor(&self) -> WindowCursor {
        WindowCursor(self.window.clone())
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Show or hide the success message in the title bar
    pub fn set_message_visible(&mut self, visible: bool) {
        if visible == self.message_visible {
            return;
        }
        self.message_visible = visible;
        self.window.set_title(title_for(&self.base_title, &self.success_title, visible));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn title_for<'a>(base: &'a str, success: &'a str, message_visible: bool) -> &'a str {
    if message_visible {
        success
    } else {
        base
    }
}

/// Native cursor glyph of a window
pub struct WindowCursor(Arc<Window>);

impl NativeCursor for WindowCursor {
    fn set_native_cursor_visible(&mut self, visible: bool) {
        self.0.set_cursor_visible(visible);
        log::debug!("Native cursor {}", if visible { "shown" } else { "hidden" });
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_switches_with_message() {
        assert_eq!(title_for("starfx", "Message Sent!", true), "Message Sent!");
        assert_eq!(title_for("starfx", "Message Sent!", false), "starfx");
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
