//! Decaying particle type

use starfx_math::{Color, Vec2};

use crate::set::ParticleConfig;

/// A short-lived point with velocity and linearly decaying opacity
///
/// Units are per frame: `velocity` is pixels per frame and `life` counts
/// frames lived. Opacity falls from 1 at birth to exactly 0 at `max_life`.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Position in surface space
    pub position: Vec2,
    /// Velocity (pixels per frame)
    pub velocity: Vec2,
    /// Radius in pixels
    pub size: f32,
    /// Base color; drawn with alpha multiplied by [`Particle::opacity`]
    pub color: Color,
    /// Frames lived
    pub life: f32,
    /// Frames until fully transparent
    pub max_life: f32,
}

impl Particle {
    /// Create a particle at rest
    pub fn new(position: Vec2, size: f32, color: Color, max_life: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size: size.max(f32::MIN_POSITIVE),
            color,
            life: 0.0,
            max_life: max_life.max(1.0),
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Opacity this particle has at a given age
    #[inline]
    pub fn opacity_at(&self, age: f32) -> f32 {
        (1.0 - age / self.max_life).clamp(0.0, 1.0)
    }

    /// Current opacity
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity_at(self.life)
    }

    /// Whether the particle should be removed
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.life >= self.max_life || self.opacity() <= 0.0
    }

    /// Color with the current opacity applied
    #[inline]
    pub fn current_color(&self) -> Color {
        self.color.fade(self.opacity())
    }

    /// Advance one frame: gravity, friction, integration, aging
    pub fn step(&mut self, config: &ParticleConfig) {
        self.velocity.y += config.gravity;
        self.velocity *= config.friction;
        self.position += self.velocity;
        self.life += 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(max_life: f32) -> Particle {
        Particle::new(Vec2::new(10.0, 10.0), 2.0, Color::WHITE, max_life)
    }

    #[test]
    fn test_opacity_zero_at_max_life() {
        for max_life in [50.0, 73.4, 130.0, 195.0] {
            let p = particle(max_life);
            assert_eq!(p.opacity_at(max_life), 0.0);
            assert_eq!(p.opacity_at(0.0), 1.0);
        }
    }

    #[test]
    fn test_opacity_non_increasing() {
        let p = particle(87.5);
        let mut last = p.opacity_at(0.0);
        for age in 1..200 {
            let o = p.opacity_at(age as f32);
            assert!(o <= last, "opacity rose at age {}", age);
            last = o;
        }
    }

    #[test]
    fn test_step_applies_gravity_then_friction() {
        let config = ParticleConfig { gravity: 0.1, friction: 0.98 };
        let mut p = particle(100.0).with_velocity(Vec2::new(2.0, -1.0));
        p.step(&config);

        let expected_vx = 2.0 * 0.98;
        let expected_vy = (-1.0 + 0.1) * 0.98;
        assert!((p.velocity.x - expected_vx).abs() < 1e-6);
        assert!((p.velocity.y - expected_vy).abs() < 1e-6);
        assert!((p.position.x - (10.0 + expected_vx)).abs() < 1e-5);
        assert!((p.position.y - (10.0 + expected_vy)).abs() < 1e-5);
        assert_eq!(p.life, 1.0);
    }

    #[test]
    fn test_expires_at_max_life() {
        let config = ParticleConfig::default();
        let mut p = particle(3.0);
        for _ in 0..2 {
            p.step(&config);
            assert!(!p.is_expired());
        }
        p.step(&config);
        assert!(p.is_expired());
        assert_eq!(p.current_color().a, 0.0);
    }
}
