//! starfx - particle effects for a portfolio landing page
//!
//! A starfield background, a cursor trail, and a fireworks celebration,
//! composited in a native window.

pub mod config;
pub mod input;
pub mod systems;
