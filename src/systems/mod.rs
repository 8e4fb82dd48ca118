//! Application systems
//!
//! Window, rendering, and effect simulation, kept apart from main.rs for
//! organization and testability.

mod effects;
mod render;
mod window;

pub use effects::{EffectsSystem, FrameReport, FrameSurfaces};
pub use render::{RenderError, RenderSystem};
pub use window::{WindowCursor, WindowError, WindowSystem};
