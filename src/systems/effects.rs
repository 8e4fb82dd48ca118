//! Effect simulation system
//!
//! Owns one driver per effect and runs them once per redraw:
//! - Starfield background (always running)
//! - Cursor trail (always running, fed by the pointer controller)
//! - Fireworks (only while a success show is active)
//!
//! Randomness comes from `debug.seed` when set so whole sessions replay.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use starfx_core::{
    AnimationDriver, CursorTrail, CursorTrailConfig, FireworksConfig, NativeCursor, RandomFactory,
    RandomSource, SeededRandom, Starfield, StarfieldConfig, SuccessAnimation, Surface,
};

/// Summary of one frame for the host
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// A fireworks show is running and its layer should be composited
    pub fireworks_active: bool,
    /// The success message should be on screen
    pub message_visible: bool,
    /// A show finished (or was dismissed) since the previous frame
    pub show_completed: bool,
}

/// Per-layer drawing targets for one frame; `None` skips painting
#[derive(Default)]
pub struct FrameSurfaces<'a> {
    pub starfield: Option<&'a mut dyn Surface>,
    pub fireworks: Option<&'a mut dyn Surface>,
    pub cursor: Option<&'a mut dyn Surface>,
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::from_seed(seed)),
        None => Box::new(SeededRandom::from_entropy()),
    }
}

/// Each show gets its own stream; seeded sessions derive them from the base seed
fn fireworks_factory(seed: Option<u64>) -> RandomFactory {
    let mut shows = 0u64;
    Box::new(move || {
        shows += 1;
        random_source(seed.map(|s| s.wrapping_add(shows)))
    })
}

/// Drives every effect layer
pub struct EffectsSystem {
    clock: Instant,
    size: (u32, u32),
    starfield: AnimationDriver<Starfield>,
    cursor: AnimationDriver<CursorTrail>,
    success: SuccessAnimation,
    completed: Rc<Cell<bool>>,
    /// Fireworks layer holds stale pixels from a previous show
    fireworks_stale: bool,
}

impl EffectsSystem {
    pub fn new(
        starfield: StarfieldConfig,
        cursor: CursorTrailConfig,
        fireworks: FireworksConfig,
        native_cursor: Box<dyn NativeCursor>,
        seed: Option<u64>,
        width: u32,
        height: u32,
    ) -> Self {
        let completed = Rc::new(Cell::new(false));
        let flag = completed.clone();
        let success = SuccessAnimation::new(
            fireworks,
            fireworks_factory(seed),
            Box::new(move || flag.set(true)),
        );

        if let Some(seed) = seed {
            log::info!("Effects seeded with {}", seed);
        }

        Self {
            clock: Instant::now(),
            size: (width, height),
            starfield: AnimationDriver::start(Starfield::new(starfield, random_source(seed)), width, height),
            cursor: AnimationDriver::start(CursorTrail::new(cursor, native_cursor), width, height),
            success,
            completed,
            fireworks_stale: false,
        }
    }

    /// Cursor trail, for feeding pointer input
    pub fn cursor_trail(&mut self) -> &mut CursorTrail {
        self.cursor.effect_mut()
    }

    #[cfg(test)]
    fn starfield(&self) -> &Starfield {
        self.starfield.effect()
    }

    pub fn is_showing(&self) -> bool {
        self.success.is_showing()
    }

    /// Start a fireworks show; returns false if one is already running
    pub fn launch(&mut self) -> bool {
        if self.success.is_showing() {
            return false;
        }
        let (w, h) = self.size;
        self.success.set_show(true, w, h);
        self.fireworks_stale = true;
        true
    }

    /// End the running show immediately
    pub fn dismiss(&mut self) {
        if self.success.is_showing() {
            self.success.dismiss();
            log::info!("Success animation dismissed");
        }
    }

    /// Window scale factor, so the cursor trail sizes itself in logical pixels
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.cursor.effect_mut().set_scale_factor(scale_factor as f32);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.size {
            return;
        }
        self.size = (width, height);
        self.starfield.resize(width, height);
        self.cursor.resize(width, height);
        self.success.resize(width, height);
    }

    /// Run one frame at the current wall-clock time
    pub fn frame(&mut self, surfaces: FrameSurfaces<'_>) -> FrameReport {
        let now = self.clock.elapsed();
        self.frame_at(now, surfaces)
    }

    /// Run one frame at host time `now`
    pub fn frame_at(&mut self, now: Duration, surfaces: FrameSurfaces<'_>) -> FrameReport {
        let FrameSurfaces { starfield, fireworks, cursor } = surfaces;

        self.starfield.frame(now, starfield);

        let fireworks = fireworks.map(|surface| {
            if self.fireworks_stale {
                surface.clear();
                self.fireworks_stale = false;
            }
            surface
        });
        let fireworks_active = self.success.frame(now, fireworks);
        let message_visible = self.success.message_visible();

        self.cursor.frame(now, cursor);

        FrameReport {
            fireworks_active,
            message_visible,
            show_completed: self.completed.replace(false),
        }
    }
}
