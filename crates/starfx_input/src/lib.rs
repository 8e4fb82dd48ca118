//! Pointer input for the starfx effects
//!
//! This crate turns raw window pointer events into the hover/press signals
//! the cursor trail reacts to, and detects clicks on named hit regions.

mod pointer_controller;

pub use pointer_controller::{HitRegion, PointerController, PointerTarget};
