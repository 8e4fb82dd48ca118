//! Fireworks celebration
//!
//! [`Fireworks`] is the per-frame effect: rockets climb to a random apex,
//! explode into decaying particles, and the canvas fades toward black each
//! frame so sparks leave trails. [`SuccessAnimation`] owns the show/hide
//! trigger around it and reports completion exactly once per show.
//!
//! Lifecycle of one show:
//! 1. Launch window: a rocket every `launch_interval_ms` while fewer than
//!    `max_rockets` are in flight, until `launch_window_ms` has elapsed
//! 2. Drain: no new launches; wait for every rocket and particle to expire
//! 3. Completion delay: keep fading for `completion_delay_ms`, then finish

use std::time::Duration;

use serde::{Serialize, Deserialize};
use starfx_math::{Color, Vec2};
use starfx_particles::{BurstSpec, ParticleConfig, ParticleSet, RandomSource};

use crate::driver::{AnimationDriver, FrameOutcome};
use crate::effect::{Effect, FrameTick, RandomFactory};
use crate::surface::Surface;

/// Fireworks parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworksConfig {
    /// Minimum time between launches
    pub launch_interval_ms: u64,
    /// Cap on rockets in flight (including exploded ones with live sparks)
    pub max_rockets: usize,
    /// How long new rockets keep launching
    pub launch_window_ms: u64,
    /// Delay between the last spark dying and completion
    pub completion_delay_ms: u64,
    /// Delay before the success message is shown
    pub message_delay_ms: u64,
    /// Rocket climb speed, pixels per frame
    pub rocket_speed: f32,
    /// Apex is drawn from the top `apex_band` fraction of the height
    pub apex_band: f32,
    /// Explosion particle count range `[min, max)`
    pub burst_count: [usize; 2],
    /// Extra white particles per explosion
    pub special_count: usize,
    /// Alpha of the black wash applied every frame
    pub fade_alpha: f32,
    /// Gravity and friction of sparks
    pub particles: ParticleConfig,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            launch_interval_ms: 300,
            max_rockets: 5,
            launch_window_ms: 5_000,
            completion_delay_ms: 500,
            message_delay_ms: 500,
            rocket_speed: 8.0,
            apex_band: 0.6,
            burst_count: [50, 100],
            special_count: 10,
            fade_alpha: 0.2,
            particles: ParticleConfig::default(),
        }
    }
}

const ROCKET_PALETTE: [Color; 4] = [
    Color::rgba(80.0 / 255.0, 250.0 / 255.0, 123.0 / 255.0, 1.0),
    Color::rgba(16.0 / 255.0, 185.0 / 255.0, 129.0 / 255.0, 1.0),
    Color::rgba(52.0 / 255.0, 211.0 / 255.0, 153.0 / 255.0, 1.0),
    Color::rgba(5.0 / 255.0, 150.0 / 255.0, 105.0 / 255.0, 1.0),
];

fn rocket_color(rng: &mut dyn RandomSource) -> Color {
    ROCKET_PALETTE[rng.index(ROCKET_PALETTE.len())]
}

/// A rising shell that bursts into sparks at its apex
#[derive(Clone, Debug)]
pub struct Rocket {
    pub position: Vec2,
    pub target_y: f32,
    pub color: Color,
    exploded: bool,
    particles: ParticleSet,
}

impl Rocket {
    pub fn new(x: f32, start_y: f32, target_y: f32, color: Color) -> Self {
        Self {
            position: Vec2::new(x, start_y),
            target_y,
            color,
            exploded: false,
            particles: ParticleSet::new(),
        }
    }

    pub fn has_exploded(&self) -> bool {
        self.exploded
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// Exploded and every spark has faded
    pub fn is_finished(&self) -> bool {
        self.exploded && self.particles.is_empty()
    }

    fn update(&mut self, config: &FireworksConfig, rng: &mut dyn RandomSource) {
        if self.position.y > self.target_y {
            self.position.y -= config.rocket_speed;
        } else if !self.exploded {
            self.explode(config, rng);
        }
        self.particles.step(&config.particles);
    }

    fn explode(&mut self, config: &FireworksConfig, rng: &mut dyn RandomSource) {
        let [min, max] = config.burst_count;
        let main = BurstSpec::ranged(min, max, 3.0, self.color);
        let special = BurstSpec::exact(config.special_count, 4.0, Color::WHITE)
            .with_speed_factor(1.5)
            .with_life_scale(1.5);

        let n = self.particles.emit_burst(self.position, &main, rng);
        let s = self.particles.emit_burst(self.position, &special, rng);
        self.exploded = true;
        log::debug!("fireworks: rocket exploded at {:?} into {} sparks", self.position, n + s);
    }

    fn render(&self, surface: &mut dyn Surface) {
        if !self.exploded {
            surface.fill_circle(self.position, 3.0, self.color);
            surface.stroke_line(self.position, self.position + Vec2::new(0.0, 10.0), 2.0, self.color);
        }
        for p in self.particles.iter() {
            surface.fill_circle(p.position, p.size, p.current_color());
        }
    }
}

/// Rockets and sparks for one show
pub struct Fireworks {
    config: FireworksConfig,
    rng: Box<dyn RandomSource>,
    rockets: Vec<Rocket>,
    width: u32,
    height: u32,
    elapsed: Duration,
    last_launch: Option<Duration>,
    launched: usize,
    completion_due: Option<Duration>,
}

impl Fireworks {
    pub fn new(config: FireworksConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            rng,
            rockets: Vec::new(),
            width: 0,
            height: 0,
            elapsed: Duration::ZERO,
            last_launch: None,
            launched: 0,
            completion_due: None,
        }
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    /// Rockets launched since the show started
    pub fn launched(&self) -> usize {
        self.launched
    }

    /// Live sparks across all rockets
    pub fn particle_count(&self) -> usize {
        self.rockets.iter().map(|r| r.particles.len()).sum()
    }

    /// Whether new rockets may still launch
    pub fn launch_window_open(&self) -> bool {
        self.elapsed < Duration::from_millis(self.config.launch_window_ms)
    }

    /// Whether the success message should be on screen
    pub fn message_visible(&self) -> bool {
        self.elapsed >= Duration::from_millis(self.config.message_delay_ms)
    }

    fn should_launch(&self) -> bool {
        let interval = Duration::from_millis(self.config.launch_interval_ms);
        let due = self
            .last_launch
            .map_or(true, |last| self.elapsed.saturating_sub(last) > interval);
        due && self.launch_window_open() && self.rockets.len() < self.config.max_rockets
    }

    fn launch(&mut self) {
        let (w, h) = (self.width as f32, self.height as f32);
        let x = self.rng.next_f32() * w;
        let target_y = self.rng.next_f32() * h * self.config.apex_band;
        let color = rocket_color(self.rng.as_mut());
        self.rockets.push(Rocket::new(x, h, target_y, color));
        self.last_launch = Some(self.elapsed);
        self.launched += 1;
        log::debug!("fireworks: launched rocket {} at x={:.1} apex={:.1}", self.launched, x, target_y);
    }
}

impl Effect for Fireworks {
    fn name(&self) -> &'static str {
        "fireworks"
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn step(&mut self, tick: &FrameTick) {
        self.elapsed = tick.elapsed;

        if self.should_launch() {
            self.launch();
        }

        for rocket in &mut self.rockets {
            rocket.update(&self.config, self.rng.as_mut());
        }
        self.rockets.retain(|r| !r.is_finished());

        if self.completion_due.is_none() && !self.launch_window_open() && self.rockets.is_empty() {
            let due = self.elapsed + Duration::from_millis(self.config.completion_delay_ms);
            self.completion_due = Some(due);
            log::debug!("fireworks: drained after {} rockets", self.launched);
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fade(Color::BLACK.with_alpha(self.config.fade_alpha));
        for rocket in &self.rockets {
            rocket.render(surface);
        }
    }

    fn is_finished(&self) -> bool {
        self.completion_due.map_or(false, |due| self.elapsed >= due)
    }
}

/// Show/hide trigger around [`Fireworks`] with a one-shot completion callback
///
/// Turning `show` on starts a new show (cancelling any previous loop first).
/// Turning it off cancels the current loop before its next frame. When a show
/// runs to completion the callback fires once and `show` drops back to false.
pub struct SuccessAnimation {
    config: FireworksConfig,
    rng_factory: RandomFactory,
    on_complete: Box<dyn FnMut()>,
    show: bool,
    driver: Option<AnimationDriver<Fireworks>>,
}

impl SuccessAnimation {
    pub fn new(config: FireworksConfig, rng_factory: RandomFactory, on_complete: Box<dyn FnMut()>) -> Self {
        Self {
            config,
            rng_factory,
            on_complete,
            show: false,
            driver: None,
        }
    }

    pub fn is_showing(&self) -> bool {
        self.show
    }

    /// The running show, if any
    pub fn fireworks(&self) -> Option<&Fireworks> {
        self.driver.as_ref().map(|d| d.effect())
    }

    pub fn message_visible(&self) -> bool {
        self.fireworks().map_or(false, Fireworks::message_visible)
    }

    /// Set the trigger; `width`/`height` size the canvas for a new show
    pub fn set_show(&mut self, show: bool, width: u32, height: u32) {
        if show == self.show {
            return;
        }
        self.show = show;
        if let Some(mut previous) = self.driver.take() {
            previous.cancel();
        }
        if show {
            let fireworks = Fireworks::new(self.config.clone(), (self.rng_factory)());
            self.driver = Some(AnimationDriver::start(fireworks, width, height));
            log::info!("Success animation started");
        } else {
            log::info!("Success animation cancelled");
        }
    }

    /// Dismiss early, as if the show had completed
    pub fn dismiss(&mut self) {
        if !self.show {
            return;
        }
        if let Some(mut driver) = self.driver.take() {
            driver.cancel();
        }
        self.show = false;
        (self.on_complete)();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(driver) = &mut self.driver {
            driver.resize(width, height);
        }
    }

    /// Run one frame; returns true while a show is active
    pub fn frame(&mut self, now: Duration, surface: Option<&mut dyn Surface>) -> bool {
        let Some(driver) = &mut self.driver else {
            return false;
        };
        match driver.frame(now, surface) {
            FrameOutcome::Continue => true,
            FrameOutcome::Finished => {
                self.driver = None;
                self.show = false;
                log::info!("Success animation complete");
                (self.on_complete)();
                false
            }
            FrameOutcome::Cancelled => {
                self.driver = None;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use starfx_particles::{SeededRandom, SequenceRandom};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_rocket_palette_matches_hex() {
        let hex = ["#50fa7b", "#10b981", "#34d399", "#059669"];
        for (color, hex) in ROCKET_PALETTE.iter().zip(hex) {
            assert_eq!(Some(*color), Color::from_hex(hex).ok());
        }

        let mut rng = SequenceRandom::new(vec![0.0, 0.99]);
        assert_eq!(rocket_color(&mut rng), ROCKET_PALETTE[0]);
        assert_eq!(rocket_color(&mut rng), ROCKET_PALETTE[3]);
    }

    fn frame_at(n: u64) -> FrameTick {
        FrameTick::new(n, Duration::from_millis(n * 16), Duration::from_millis(16))
    }

    fn fireworks(seed: u64) -> Fireworks {
        let mut fw = Fireworks::new(FireworksConfig::default(), Box::new(SeededRandom::from_seed(seed)));
        fw.mount(1280, 720);
        fw
    }

    #[test]
    fn test_first_rocket_launches_immediately() {
        let mut fw = fireworks(1);
        fw.step(&frame_at(0));
        assert_eq!(fw.launched(), 1);
        assert_eq!(fw.rockets().len(), 1);
        let r = &fw.rockets()[0];
        assert!(r.position.x >= 0.0 && r.position.x < 1280.0);
        assert!(r.target_y >= 0.0 && r.target_y < 720.0 * 0.6);
    }

    #[test]
    fn test_launch_interval_respected() {
        let mut fw = fireworks(2);
        fw.step(&frame_at(0));
        for n in 1..=18 {
            fw.step(&frame_at(n)); // up to 288ms
        }
        assert_eq!(fw.launched(), 1);
        fw.step(&frame_at(19)); // 304ms
        assert_eq!(fw.launched(), 2);
    }

    #[test]
    fn test_rockets_in_flight_never_exceed_cap() {
        let mut fw = fireworks(3);
        for n in 0..2_000 {
            fw.step(&frame_at(n));
            assert!(fw.rockets().len() <= 5, "{} rockets at frame {}", fw.rockets().len(), n);
        }
    }

    #[test]
    fn test_rocket_climbs_then_explodes_once() {
        let mut rocket = Rocket::new(100.0, 720.0, 700.0, Color::WHITE);
        let config = FireworksConfig::default();
        let mut rng = SequenceRandom::constant(0.5);

        rocket.update(&config, &mut rng);
        assert_eq!(rocket.position.y, 712.0);
        rocket.update(&config, &mut rng);
        rocket.update(&config, &mut rng);
        assert_eq!(rocket.position.y, 696.0);
        assert!(!rocket.has_exploded());

        rocket.update(&config, &mut rng);
        assert!(rocket.has_exploded());
        // 50 + index(50) at r = 0.5, plus 10 specials
        assert_eq!(rocket.particles().len(), 85);

        rocket.update(&config, &mut rng);
        assert_eq!(rocket.particles().len(), 85);
    }

    #[test]
    fn test_show_drains_and_finishes() {
        let mut fw = fireworks(4);
        let mut n = 0;
        while !fw.is_finished() {
            fw.step(&frame_at(n));
            n += 1;
            assert!(n < 10_000, "fireworks never finished");
        }
        assert!(fw.launched() > 0);
        assert!(fw.rockets().is_empty());
        assert!(Duration::from_millis(n * 16) >= Duration::from_millis(5_500));
    }

    #[test]
    fn test_render_fades_then_draws() {
        let mut fw = fireworks(5);
        fw.step(&frame_at(0));
        let mut surface = RecordingSurface::new(1280, 720);
        fw.render(&mut surface);
        let cmds = surface.commands();
        assert!(matches!(cmds[0], DrawCommand::Fade(c) if (c.a - 0.2).abs() < 1e-6));
        assert!(cmds.iter().any(|c| matches!(c, DrawCommand::StrokeLine { .. })));
    }

    fn success_animation(calls: Rc<Cell<u32>>) -> SuccessAnimation {
        let mut seed = 0;
        SuccessAnimation::new(
            FireworksConfig::default(),
            Box::new(move || {
                seed += 1;
                Box::new(SeededRandom::from_seed(seed)) as Box<dyn RandomSource>
            }),
            Box::new(move || calls.set(calls.get() + 1)),
        )
    }

    #[test]
    fn test_hide_cancels_without_completion() {
        let calls = Rc::new(Cell::new(0));
        let mut anim = success_animation(calls.clone());
        anim.set_show(true, 800, 600);
        assert!(anim.frame(Duration::ZERO, None));
        let launched = anim.fireworks().map(|f| f.launched());
        assert_eq!(launched, Some(1));

        anim.set_show(false, 800, 600);
        assert!(anim.fireworks().is_none());
        assert!(!anim.frame(Duration::from_millis(400), None));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_reshow_restarts_cleanly() {
        let calls = Rc::new(Cell::new(0));
        let mut anim = success_animation(calls.clone());
        anim.set_show(true, 800, 600);
        for n in 0..30 {
            anim.frame(Duration::from_millis(n * 16), None);
        }
        anim.set_show(false, 800, 600);
        anim.set_show(true, 800, 600);
        anim.frame(Duration::from_secs(100), None);
        assert_eq!(anim.fireworks().map(|f| f.launched()), Some(1));
    }

    #[test]
    fn test_dismiss_completes_once() {
        let calls = Rc::new(Cell::new(0));
        let mut anim = success_animation(calls.clone());
        anim.set_show(true, 800, 600);
        anim.frame(Duration::ZERO, None);
        anim.dismiss();
        anim.dismiss();
        assert_eq!(calls.get(), 1);
        assert!(!anim.is_showing());
    }

    #[test]
    fn test_message_visible_after_delay() {
        let calls = Rc::new(Cell::new(0));
        let mut anim = success_animation(calls);
        anim.set_show(true, 800, 600);
        anim.frame(Duration::from_millis(1_000), None);
        assert!(!anim.message_visible());
        anim.frame(Duration::from_millis(1_600), None);
        assert!(anim.message_visible());
    }
}
