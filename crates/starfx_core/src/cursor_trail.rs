//! Custom cursor with a comet tail
//!
//! The dot and ring sit exactly on the pointer. Behind them a fixed number of
//! followers ease toward the pointer, each a little slower than the one before,
//! so fast movement stretches them into a tail. Their opacity and size swell
//! with pointer speed.
//!
//! While mounted the native pointer glyph is hidden; teardown restores it.
//! On narrow viewports the custom cursor is disabled and the native one shown.
//!
//! Sizes, speeds and the narrow breakpoint are in logical pixels; positions and
//! viewport sizes arrive in physical pixels and are converted with the scale
//! factor.

use std::time::Duration;

use bitflags::bitflags;
use serde::{Serialize, Deserialize};
use starfx_math::{ease_toward, Color, Vec2};

use crate::effect::{Effect, FrameTick};
use crate::surface::{GradientStop, Surface};

/// Shows or hides the platform's own pointer glyph
pub trait NativeCursor {
    fn set_native_cursor_visible(&mut self, visible: bool);
}

bitflags! {
    /// Raw pointer conditions reported by input handling
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PointerFlags: u8 {
        /// Pointer is over an interactive element
        const HOVER = 1 << 0;
        /// Primary button is held
        const PRESSED = 1 << 1;
    }
}

/// Visual state of the dot and ring
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkerState {
    #[default]
    Default,
    Hovering,
    Pressed,
}

impl MarkerState {
    /// Pressed wins over hovering
    pub fn from_flags(flags: PointerFlags) -> Self {
        if flags.contains(PointerFlags::PRESSED) {
            MarkerState::Pressed
        } else if flags.contains(PointerFlags::HOVER) {
            MarkerState::Hovering
        } else {
            MarkerState::Default
        }
    }

    /// Dot diameter in pixels
    pub fn dot_diameter(self) -> f32 {
        match self {
            MarkerState::Default => 8.0,
            MarkerState::Hovering => 12.0,
            MarkerState::Pressed => 10.0,
        }
    }

    /// Ring diameter in pixels
    pub fn ring_diameter(self) -> f32 {
        match self {
            MarkerState::Default => 24.0,
            MarkerState::Hovering => 36.0,
            MarkerState::Pressed => 20.0,
        }
    }
}

/// Cursor trail parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorTrailConfig {
    /// Number of trailing followers
    pub trail_count: usize,
    /// Ease factor of the first follower
    pub follow_speed: f32,
    /// Ease factor lost by each later follower
    pub follow_falloff: f32,
    /// Opacity of the first follower at rest
    pub base_opacity: f32,
    /// Opacity lost by each later follower
    pub opacity_falloff: f32,
    /// Diameter of the first follower at rest
    pub base_size: f32,
    /// Diameter lost by each later follower
    pub size_falloff: f32,
    /// Extra diameter at full pointer speed
    pub speed_size_boost: f32,
    /// Pointer travel per frame that counts as full speed
    pub full_speed: f32,
    /// Lifetime of a click burst in milliseconds
    pub burst_duration_ms: u64,
    /// Final radius of a click burst
    pub burst_radius: f32,
    /// Viewports this wide or narrower get the native cursor
    pub narrow_viewport_width: u32,
}

impl Default for CursorTrailConfig {
    fn default() -> Self {
        Self {
            trail_count: 5,
            follow_speed: 0.15,
            follow_falloff: 0.02,
            base_opacity: 0.7,
            opacity_falloff: 0.12,
            base_size: 30.0,
            size_falloff: 3.0,
            speed_size_boost: 15.0,
            full_speed: 20.0,
            burst_duration_ms: 700,
            burst_radius: 60.0,
            narrow_viewport_width: 768,
        }
    }
}

impl CursorTrailConfig {
    /// Ease factor of follower `index`, never below 0.01 so every follower converges
    pub fn follow_speed_for(&self, index: usize) -> f32 {
        (self.follow_speed - self.follow_falloff * index as f32).clamp(0.01, 1.0)
    }
}

/// One trailing marker
#[derive(Clone, Debug, PartialEq)]
pub struct Follower {
    pub position: Vec2,
    pub opacity: f32,
    /// Diameter in pixels
    pub size: f32,
}

#[derive(Clone, Debug)]
struct ClickBurst {
    center: Vec2,
    /// Set on the first frame after the press
    born: Option<Duration>,
    progress: f32,
}

const EMERALD: Color = Color::rgba(16.0 / 255.0, 185.0 / 255.0, 129.0 / 255.0, 1.0);
const NEON: Color = Color::rgba(80.0 / 255.0, 250.0 / 255.0, 123.0 / 255.0, 1.0);

const TRAIL_PALETTE: [Color; 5] = [
    Color::rgba(80.0 / 255.0, 250.0 / 255.0, 123.0 / 255.0, 0.7),
    Color::rgba(16.0 / 255.0, 185.0 / 255.0, 129.0 / 255.0, 0.6),
    Color::rgba(5.0 / 255.0, 150.0 / 255.0, 105.0 / 255.0, 0.5),
    Color::rgba(6.0 / 255.0, 95.0 / 255.0, 70.0 / 255.0, 0.4),
    Color::rgba(4.0 / 255.0, 120.0 / 255.0, 87.0 / 255.0, 0.3),
];

/// Pointer markers plus eased followers
pub struct CursorTrail {
    config: CursorTrailConfig,
    native: Box<dyn NativeCursor>,
    native_hidden: bool,
    mounted: bool,
    narrow: bool,
    /// Physical viewport width
    width: u32,
    scale_factor: f32,
    pointer: Vec2,
    prev_pointer: Vec2,
    flags: PointerFlags,
    followers: Vec<Follower>,
    bursts: Vec<ClickBurst>,
    elapsed: Duration,
}

impl CursorTrail {
    pub fn new(config: CursorTrailConfig, native: Box<dyn NativeCursor>) -> Self {
        let followers = (0..config.trail_count)
            .map(|i| Follower {
                position: Vec2::ZERO,
                opacity: (config.base_opacity - config.opacity_falloff * i as f32).clamp(0.0, 1.0),
                size: config.base_size - config.size_falloff * i as f32,
            })
            .collect();
        Self {
            config,
            native,
            native_hidden: false,
            mounted: false,
            narrow: false,
            width: 0,
            scale_factor: 1.0,
            pointer: Vec2::ZERO,
            prev_pointer: Vec2::ZERO,
            flags: PointerFlags::empty(),
            followers,
            bursts: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Latest raw pointer position
    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = position;
    }

    /// Pointer entered or left an interactive element
    pub fn set_hovering(&mut self, hovering: bool) {
        self.flags.set(PointerFlags::HOVER, hovering);
    }

    /// Primary button went down: enter the pressed state and spawn a click burst
    pub fn press(&mut self) {
        self.flags.insert(PointerFlags::PRESSED);
        if !self.narrow {
            self.bursts.push(ClickBurst {
                center: self.pointer,
                born: None,
                progress: 0.0,
            });
        }
    }

    /// Primary button released
    pub fn release(&mut self) {
        self.flags.remove(PointerFlags::PRESSED);
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn marker_state(&self) -> MarkerState {
        MarkerState::from_flags(self.flags)
    }

    pub fn followers(&self) -> &[Follower] {
        &self.followers
    }

    /// Click bursts still animating
    pub fn burst_count(&self) -> usize {
        self.bursts.len()
    }

    /// Whether the custom cursor is disabled for a narrow viewport
    pub fn is_disabled(&self) -> bool {
        self.narrow
    }

    /// Physical pixels per logical pixel
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        if self.mounted {
            self.update_narrow();
        }
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    fn update_narrow(&mut self) {
        let logical_width = self.width as f32 / self.scale_factor;
        let narrow = logical_width <= self.config.narrow_viewport_width as f32;
        if narrow != self.narrow {
            log::debug!(
                "cursor_trail: {} at logical width {}",
                if narrow { "disabled" } else { "enabled" },
                logical_width
            );
        }
        self.narrow = narrow;
        if narrow {
            self.bursts.clear();
        }
        self.sync_native_cursor();
    }

    fn sync_native_cursor(&mut self) {
        let want_hidden = self.mounted && !self.narrow;
        if want_hidden != self.native_hidden {
            self.native.set_native_cursor_visible(!want_hidden);
            self.native_hidden = want_hidden;
        }
    }

    fn render_bursts(&self, surface: &mut dyn Surface) {
        for burst in &self.bursts {
            let radius = self.config.burst_radius * burst.progress * self.scale_factor;
            if radius <= 0.0 {
                continue;
            }
            let alpha = 0.8 * (1.0 - burst.progress);
            let stops = [
                GradientStop::new(0.0, NEON.with_alpha(alpha)),
                GradientStop::new(0.7, EMERALD.with_alpha(0.0)),
            ];
            surface.radial_glow(burst.center, radius, radius, &stops);
        }
    }

    fn render_followers(&self, surface: &mut dyn Surface) {
        for (i, follower) in self.followers.iter().enumerate() {
            let tint = TRAIL_PALETTE[i.min(TRAIL_PALETTE.len() - 1)];
            let radius = follower.size / 2.0 * self.scale_factor;
            let stops = [
                GradientStop::new(0.0, tint.fade(follower.opacity)),
                GradientStop::new(0.7, tint.with_alpha(0.0)),
            ];
            surface.radial_glow(follower.position, radius, radius, &stops);
        }
    }

    fn render_markers(&self, surface: &mut dyn Surface) {
        let state = self.marker_state();
        let scale = self.scale_factor;
        let ring_radius = state.ring_diameter() / 2.0 * scale;
        let dot_radius = state.dot_diameter() / 2.0 * scale;

        let (ring_fill, ring_stroke, dot_color) = match state {
            MarkerState::Default => (None, EMERALD.with_alpha(0.8), EMERALD),
            MarkerState::Hovering => (Some(EMERALD.with_alpha(0.2)), NEON, NEON),
            MarkerState::Pressed => (Some(NEON.with_alpha(0.3)), NEON, NEON),
        };

        if let Some(fill) = ring_fill {
            surface.fill_circle(self.pointer, ring_radius, fill);
        }
        surface.stroke_ring(self.pointer, ring_radius, 2.0 * scale, ring_stroke);

        let glow = [
            GradientStop::new(0.0, EMERALD.with_alpha(0.8)),
            GradientStop::new(1.0, EMERALD.with_alpha(0.0)),
        ];
        let glow_radius = dot_radius + 10.0 * scale;
        surface.radial_glow(self.pointer, glow_radius, glow_radius, &glow);
        surface.fill_circle(self.pointer, dot_radius, dot_color);
    }
}

impl Effect for CursorTrail {
    fn name(&self) -> &'static str {
        "cursor_trail"
    }

    fn mount(&mut self, width: u32, height: u32) {
        self.mounted = true;
        self.resize(width, height);
    }

    fn resize(&mut self, width: u32, _height: u32) {
        self.width = width;
        self.update_narrow();
    }

    fn step(&mut self, tick: &FrameTick) {
        self.elapsed = tick.elapsed;

        // Travel since the previous frame, not the previous move event
        let speed = self.pointer.distance(self.prev_pointer) / self.scale_factor;
        let speed_factor = if self.config.full_speed > 0.0 {
            (speed / self.config.full_speed).min(1.0)
        } else {
            0.0
        };

        let c = &self.config;
        for (i, follower) in self.followers.iter_mut().enumerate() {
            follower.position = ease_toward(follower.position, self.pointer, c.follow_speed_for(i));
            let base_opacity = c.base_opacity - c.opacity_falloff * i as f32;
            follower.opacity = (base_opacity * (1.0 + speed_factor)).clamp(0.0, 1.0);
            follower.size = c.base_size - c.size_falloff * i as f32 + c.speed_size_boost * speed_factor;
        }
        self.prev_pointer = self.pointer;

        let duration = Duration::from_millis(self.config.burst_duration_ms.max(1));
        let now = self.elapsed;
        for burst in &mut self.bursts {
            let born = *burst.born.get_or_insert(now);
            burst.progress = now.saturating_sub(born).as_secs_f32() / duration.as_secs_f32();
        }
        self.bursts.retain(|b| b.progress < 1.0);
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.clear();
        if self.narrow {
            return;
        }
        self.render_bursts(surface);
        self.render_followers(surface);
        self.render_markers(surface);
    }

    fn teardown(&mut self) {
        self.mounted = false;
        self.bursts.clear();
        self.sync_native_cursor();
    }
}
