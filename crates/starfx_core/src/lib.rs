//! Core types for the starfx effects
//!
//! This crate provides the frame-driven animation loops and the surfaces they
//! paint into:
//!
//! - [`Surface`] - A drawing target sized to the viewport
//! - [`Effect`] - One animation: step physics, then render
//! - [`AnimationDriver`] - Runs an effect once per frame until cancelled or finished
//! - [`CancellationToken`] - Shared flag that stops a driver
//! - [`Starfield`] - Drifting, twinkling background stars
//! - [`CursorTrail`] - Pointer markers with a comet-tail of followers
//! - [`Fireworks`] / [`SuccessAnimation`] - Celebration shown after a successful submit

mod surface;
mod effect;
mod driver;
mod starfield;
mod cursor_trail;
mod fireworks;

pub use surface::{Surface, GradientStop, DrawCommand, RecordingSurface};
pub use effect::{Effect, FrameTick, RandomFactory};
pub use driver::{AnimationDriver, CancellationToken, FrameOutcome};
pub use starfield::{Star, Starfield, StarfieldConfig};
pub use cursor_trail::{
    CursorTrail, CursorTrailConfig, Follower, MarkerState, NativeCursor, PointerFlags,
};
pub use fireworks::{Fireworks, FireworksConfig, Rocket, SuccessAnimation};

// Re-export commonly used types for convenience
pub use starfx_math::{Color, Vec2};
pub use starfx_particles::{ParticleConfig, RandomSource, SeededRandom, SequenceRandom};
