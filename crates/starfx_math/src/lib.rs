//! 2D Mathematics Library
//!
//! Small value types shared by every starfx effect.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector in surface-space pixels (y grows downward)
//! - [`Color`] - straight-alpha RGBA color with hex parsing
//!
//! ## Helpers
//!
//! - [`lerp`] - scalar linear interpolation
//! - [`ease_toward`] - one exponential easing step toward a target

mod vec2;
mod color;
pub mod easing;

pub use vec2::Vec2;
pub use color::{Color, ColorParseError};
pub use easing::{ease_toward, lerp};
