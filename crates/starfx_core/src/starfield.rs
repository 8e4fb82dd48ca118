//! Starfield background
//!
//! A density-sized set of stars that drift slowly downward and twinkle.
//! The whole set is regenerated from fresh randomness whenever the viewport
//! is resized.

use std::f32::consts::TAU;

use serde::{Serialize, Deserialize};
use starfx_math::{Color, Vec2};
use starfx_particles::RandomSource;

use crate::effect::{Effect, FrameTick};
use crate::surface::{GradientStop, Surface};

/// Starfield parameters; ranges are `[min, max)`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Viewport pixels per star
    pub density_divisor: f32,
    /// Star radius range in pixels
    pub size: [f32; 2],
    /// Base opacity range
    pub opacity: [f32; 2],
    /// Downward drift range, pixels per frame
    pub drift_speed: [f32; 2],
    /// Twinkle phase advance range, radians per frame
    pub twinkle_speed: [f32; 2],
    /// Opacity of the whole layer when composited
    pub layer_opacity: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            density_divisor: 10_000.0,
            size: [0.5, 2.5],
            opacity: [0.2, 0.7],
            drift_speed: [0.01, 0.06],
            twinkle_speed: [0.003, 0.013],
            layer_opacity: 0.6,
        }
    }
}

impl StarfieldConfig {
    /// Number of stars for a viewport: `floor(width * height / density_divisor)`
    pub fn star_count(&self, width: u32, height: u32) -> usize {
        if self.density_divisor <= 0.0 {
            return 0;
        }
        let area = width as f64 * height as f64;
        (area / self.density_divisor as f64).floor() as usize
    }
}

/// A single background star
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub size: f32,
    /// Base opacity before twinkle modulation
    pub opacity: f32,
    /// Downward drift per frame
    pub speed: f32,
    pub twinkle_speed: f32,
    pub twinkle_phase: f32,
}

impl Star {
    /// Twinkle modulation in [0, 1]
    #[inline]
    pub fn twinkle(&self) -> f32 {
        (self.twinkle_phase.sin() + 1.0) / 2.0
    }

    /// Opacity after twinkle modulation: between half and all of the base
    #[inline]
    pub fn current_opacity(&self) -> f32 {
        self.opacity * (0.5 + self.twinkle() * 0.5)
    }
}

const STAR_CORE: Color = Color::rgba(80.0 / 255.0, 250.0 / 255.0, 123.0 / 255.0, 1.0);
const STAR_HALO: Color = Color::rgba(16.0 / 255.0, 185.0 / 255.0, 129.0 / 255.0, 1.0);

/// Drifting, twinkling background stars
pub struct Starfield {
    config: StarfieldConfig,
    rng: Box<dyn RandomSource>,
    stars: Vec<Star>,
    width: u32,
    height: u32,
}

impl Starfield {
    pub fn new(config: StarfieldConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            rng,
            stars: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn stars_mut(&mut self) -> &mut [Star] {
        &mut self.stars
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Replace every star with a freshly randomized one
    pub fn regenerate(&mut self) {
        let count = self.config.star_count(self.width, self.height);
        let (w, h) = (self.width as f32, self.height as f32);
        let c = &self.config;
        let rng = &mut self.rng;

        self.stars = (0..count)
            .map(|_| Star {
                position: Vec2::new(rng.next_f32() * w, rng.next_f32() * h),
                size: rng.range(c.size[0], c.size[1]),
                opacity: rng.range(c.opacity[0], c.opacity[1]),
                speed: rng.range(c.drift_speed[0], c.drift_speed[1]),
                twinkle_speed: rng.range(c.twinkle_speed[0], c.twinkle_speed[1]),
                twinkle_phase: rng.next_f32() * TAU,
            })
            .collect();
        log::debug!("starfield: {} stars for {}x{}", count, self.width, self.height);
    }
}

impl Effect for Starfield {
    fn name(&self) -> &'static str {
        "starfield"
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.regenerate();
    }

    fn step(&mut self, _tick: &FrameTick) {
        let (w, h) = (self.width as f32, self.height as f32);
        for star in &mut self.stars {
            star.position.y += star.speed;
            if star.position.y > h {
                star.position.y = 0.0;
                star.position.x = self.rng.next_f32() * w;
            }
            star.twinkle_phase += star.twinkle_speed;
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        for star in &self.stars {
            let twinkle = star.twinkle();
            let opacity = star.current_opacity();
            let stops = [
                GradientStop::new(0.0, STAR_CORE.with_alpha(opacity * (0.7 + twinkle * 0.3))),
                GradientStop::new(0.5, STAR_HALO.with_alpha(opacity * 0.5)),
                GradientStop::new(1.0, Color::TRANSPARENT),
            ];
            surface.radial_glow(star.position, star.size, star.size * 2.0, &stops);
        }
    }
}
