//! Particle sets and burst emission

use serde::{Serialize, Deserialize};
use starfx_math::{Color, Vec2};

use crate::particle::Particle;
use crate::rng::RandomSource;

/// Per-frame forces applied to every particle in a set
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Added to vertical velocity each frame (positive = down)
    pub gravity: f32,
    /// Velocity multiplier each frame
    pub friction: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            gravity: 0.1,
            friction: 0.98,
        }
    }
}

/// Parameters for one burst of particles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstSpec {
    /// Minimum particle count (inclusive)
    pub count_min: usize,
    /// Maximum particle count (exclusive, must be > `count_min` to randomize)
    pub count_max: usize,
    /// Radius scale: each particle gets `r * size + 1`
    pub size: f32,
    /// Velocity scale: each axis gets `(r - 0.5) * 6 * speed_factor`
    pub speed_factor: f32,
    /// Multiplier on the randomized lifetime of `r * 80 + 50` frames
    pub life_scale: f32,
    /// Particle color
    pub color: Color,
}

impl BurstSpec {
    /// A burst of exactly `count` particles
    pub fn exact(count: usize, size: f32, color: Color) -> Self {
        Self {
            count_min: count,
            count_max: count,
            size,
            speed_factor: 1.0,
            life_scale: 1.0,
            color,
        }
    }

    /// A burst with a random count in `min..max`
    pub fn ranged(min: usize, max: usize, size: f32, color: Color) -> Self {
        Self {
            count_min: min,
            count_max: max,
            ..Self::exact(min, size, color)
        }
    }

    pub fn with_speed_factor(mut self, speed_factor: f32) -> Self {
        self.speed_factor = speed_factor;
        self
    }

    pub fn with_life_scale(mut self, life_scale: f32) -> Self {
        self.life_scale = life_scale;
        self
    }

    fn count(&self, rng: &mut dyn RandomSource) -> usize {
        if self.count_max > self.count_min {
            self.count_min + rng.index(self.count_max - self.count_min)
        } else {
            self.count_min
        }
    }

    /// Spawn one particle at `origin` with randomized size, velocity and lifetime
    pub fn spawn(&self, origin: Vec2, rng: &mut dyn RandomSource) -> Particle {
        let size = rng.next_f32() * self.size + 1.0;
        let velocity = Vec2::new(
            rng.signed(6.0 * self.speed_factor),
            rng.signed(6.0 * self.speed_factor),
        );
        let max_life = (rng.next_f32() * 80.0 + 50.0) * self.life_scale;
        Particle::new(origin, size, self.color, max_life).with_velocity(velocity)
    }
}

/// An exclusively owned collection of live particles
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single particle
    pub fn emit(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Emit a burst at `origin`; returns how many particles were spawned
    pub fn emit_burst(
        &mut self,
        origin: Vec2,
        spec: &BurstSpec,
        rng: &mut dyn RandomSource,
    ) -> usize {
        let count = spec.count(rng);
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(spec.spawn(origin, rng));
        }
        count
    }

    /// Step every particle one frame, then drop expired ones
    pub fn step(&mut self, config: &ParticleConfig) {
        for p in &mut self.particles {
            p.step(config);
        }
        self.particles.retain(|p| !p.is_expired());
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
