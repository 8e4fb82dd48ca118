//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input and hit-region clicks to high-level actions like
//! Launch, Dismiss, Exit. Pointer movement is NOT mapped here - it goes
//! directly to the PointerController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Name of the hit region that starts the celebration
pub const LAUNCH_REGION: &str = "launch";

/// Actions triggered by keys and clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Start the success animation (Enter/Space, or clicking the launch button)
    Launch,
    /// End the success animation early (Escape while it is showing)
    Dismiss,
    /// Exit application (Escape when nothing is showing)
    Exit,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for mapped keys, `None` otherwise
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        show_active: bool,
    ) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => {
                if show_active {
                    Some(InputAction::Dismiss)
                } else {
                    Some(InputAction::Exit)
                }
            }
            KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::Space => Some(InputAction::Launch),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            _ => None,
        }
    }

    /// Map a completed click on a named hit region to an action
    pub fn map_click(region: &str) -> Option<InputAction> {
        match region {
            LAUNCH_REGION => Some(InputAction::Launch),
            _ => None,
        }
    }
}
