//! The effect contract driven once per frame

use std::time::Duration;

use starfx_particles::RandomSource;

use crate::surface::Surface;

/// Produces a fresh random source each time an effect instance is created
pub type RandomFactory = Box<dyn FnMut() -> Box<dyn RandomSource>>;

/// Timing for one frame of an effect
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTick {
    /// Frames completed before this one (0 on the first frame)
    pub frame: u64,
    /// Time since the driver's first frame
    pub elapsed: Duration,
    /// Time since the previous frame
    pub delta: Duration,
}

impl FrameTick {
    pub fn new(frame: u64, elapsed: Duration, delta: Duration) -> Self {
        Self { frame, elapsed, delta }
    }
}

/// A per-frame animation that owns all of its state
///
/// The driver calls [`Effect::step`] strictly before [`Effect::render`] within
/// a frame. Effects never read or write another effect's state.
pub trait Effect {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Called once when the driver starts, with the surface size
    fn mount(&mut self, width: u32, height: u32) {
        self.resize(width, height);
    }

    /// Viewport changed size
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Advance state by one frame
    fn step(&mut self, tick: &FrameTick);

    /// Paint current state
    fn render(&self, surface: &mut dyn Surface);

    /// True once the effect has nothing left to do
    fn is_finished(&self) -> bool {
        false
    }

    /// Release external resources; called once when the driver stops
    fn teardown(&mut self) {}
}
