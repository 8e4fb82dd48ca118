//! Particle simulation for starfx
//!
//! This crate provides the per-frame particle physics shared by the effects:
//! - Decaying particles with gravity and friction
//! - Randomized burst emission
//! - Pluggable random sources for reproducible runs

pub mod particle;
pub mod rng;
pub mod set;

// Re-export commonly used types
pub use particle::Particle;
pub use rng::{RandomSource, SeededRandom, SequenceRandom};
pub use set::{BurstSpec, ParticleConfig, ParticleSet};
