//! Frame-driven animation loop with explicit cancellation
//!
//! An [`AnimationDriver`] owns one effect. The host calls
//! [`AnimationDriver::frame`] once per display refresh; the driver steps the
//! effect, renders it, and reports whether it wants another frame. Cancelling
//! the driver (directly or through a [`CancellationToken`]) tears the effect
//! down and turns every later frame into a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::effect::{Effect, FrameTick};
use crate::surface::Surface;

/// Shared flag that stops a driver at its next frame
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// What the host should do after a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame
    Continue,
    /// The effect completed on its own
    Finished,
    /// The driver was cancelled; nothing was stepped or drawn
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DriverState {
    Running,
    Finished,
    Cancelled,
}

/// Runs one effect once per frame until it finishes or is cancelled
pub struct AnimationDriver<E: Effect> {
    effect: E,
    token: CancellationToken,
    state: DriverState,
    /// Host timestamp of the first frame
    origin: Option<Duration>,
    last_elapsed: Duration,
    frame: u64,
}

impl<E: Effect> AnimationDriver<E> {
    /// Mount `effect` on a surface of the given size and start driving it
    pub fn start(mut effect: E, width: u32, height: u32) -> Self {
        effect.mount(width, height);
        log::debug!("{}: started on {}x{} surface", effect.name(), width, height);
        Self {
            effect,
            token: CancellationToken::new(),
            state: DriverState::Running,
            origin: None,
            last_elapsed: Duration::ZERO,
            frame: 0,
        }
    }

    /// Token that cancels this driver when triggered
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Run one frame at host time `now`
    ///
    /// Physics is stepped before rendering. A `None` surface still steps the
    /// effect but skips painting.
    pub fn frame(&mut self, now: Duration, surface: Option<&mut dyn Surface>) -> FrameOutcome {
        match self.state {
            DriverState::Finished => return FrameOutcome::Finished,
            DriverState::Cancelled => return FrameOutcome::Cancelled,
            DriverState::Running => {}
        }

        if self.token.is_cancelled() {
            self.stop(DriverState::Cancelled);
            return FrameOutcome::Cancelled;
        }

        let origin = *self.origin.get_or_insert(now);
        let elapsed = now.saturating_sub(origin);
        let tick = FrameTick::new(self.frame, elapsed, elapsed.saturating_sub(self.last_elapsed));
        self.last_elapsed = elapsed;
        self.frame += 1;

        self.effect.step(&tick);
        if let Some(surface) = surface {
            self.effect.render(surface);
        }

        if self.effect.is_finished() {
            self.stop(DriverState::Finished);
            return FrameOutcome::Finished;
        }
        FrameOutcome::Continue
    }

    /// Forward a viewport resize to the effect
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.is_running() {
            self.effect.resize(width, height);
        }
    }

    /// Cancel immediately and tear the effect down
    pub fn cancel(&mut self) {
        self.token.cancel();
        self.stop(DriverState::Cancelled);
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running && !self.token.is_cancelled()
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    fn stop(&mut self, state: DriverState) {
        if self.state != DriverState::Running {
            return;
        }
        self.state = state;
        self.effect.teardown();
        log::debug!("{}: stopped ({:?}) after {} frames", self.effect.name(), state, self.frame);
    }
}

impl<E: Effect> Drop for AnimationDriver<E> {
    fn drop(&mut self) {
        self.stop(DriverState::Cancelled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use starfx_math::{Color, Vec2};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records the order of calls into a shared log
    struct Probe {
        log: Rc<RefCell<Vec<String>>>,
        finish_after: Option<u64>,
        steps: u64,
    }

    impl Probe {
        fn new(log: Rc<RefCell<Vec<String>>>) -> Self {
            Self { log, finish_after: None, steps: 0 }
        }
    }

    impl Effect for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }
        fn resize(&mut self, width: u32, height: u32) {
            self.log.borrow_mut().push(format!("resize {}x{}", width, height));
        }
        fn step(&mut self, tick: &FrameTick) {
            self.steps += 1;
            self.log.borrow_mut().push(format!("step {} {}ms", tick.frame, tick.elapsed.as_millis()));
        }
        fn render(&self, surface: &mut dyn Surface) {
            self.log.borrow_mut().push("render".to_string());
            surface.fill_circle(Vec2::ZERO, 1.0, Color::WHITE);
        }
        fn is_finished(&self) -> bool {
            self.finish_after.map_or(false, |n| self.steps >= n)
        }
        fn teardown(&mut self) {
            self.log.borrow_mut().push("teardown".to_string());
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_step_precedes_render() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut driver = AnimationDriver::start(Probe::new(log.clone()), 10, 10);
        let mut surface = RecordingSurface::new(10, 10);

        assert_eq!(driver.frame(ms(1000), Some(&mut surface)), FrameOutcome::Continue);
        assert_eq!(driver.frame(ms(1016), Some(&mut surface)), FrameOutcome::Continue);

        let log = log.borrow();
        assert_eq!(
            *log,
            vec!["resize 10x10", "step 0 0ms", "render", "step 1 16ms", "render"]
        );
    }

    #[test]
    fn test_missing_surface_is_noop_render() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut driver = AnimationDriver::start(Probe::new(log.clone()), 10, 10);
        assert_eq!(driver.frame(ms(0), None), FrameOutcome::Continue);
        assert!(!log.borrow().iter().any(|l| l == "render"));
        assert_eq!(driver.frame_count(), 1);
    }

    #[test]
    fn test_token_cancels_before_next_step() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut driver = AnimationDriver::start(Probe::new(log.clone()), 10, 10);
        let token = driver.token();

        driver.frame(ms(0), None);
        token.cancel();
        assert!(!driver.is_running());
        assert_eq!(driver.frame(ms(16), None), FrameOutcome::Cancelled);
        assert_eq!(driver.frame(ms(32), None), FrameOutcome::Cancelled);

        let log = log.borrow();
        assert_eq!(log.iter().filter(|l| l.starts_with("step")).count(), 1);
        assert_eq!(log.iter().filter(|l| *l == "teardown").count(), 1);
    }

    #[test]
    fn test_finishes_and_tears_down_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut probe = Probe::new(log.clone());
        probe.finish_after = Some(2);
        let mut driver = AnimationDriver::start(probe, 10, 10);

        assert_eq!(driver.frame(ms(0), None), FrameOutcome::Continue);
        assert_eq!(driver.frame(ms(16), None), FrameOutcome::Finished);
        assert_eq!(driver.frame(ms(32), None), FrameOutcome::Finished);
        driver.cancel();
        drop(driver);

        assert_eq!(log.borrow().iter().filter(|l| *l == "teardown").count(), 1);
    }

    #[test]
    fn test_drop_tears_down() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let _driver = AnimationDriver::start(Probe::new(log.clone()), 10, 10);
        }
        assert_eq!(log.borrow().last().map(String::as_str), Some("teardown"));
    }

    #[test]
    fn test_resize_ignored_after_cancel() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut driver = AnimationDriver::start(Probe::new(log.clone()), 10, 10);
        driver.cancel();
        driver.resize(20, 20);
        assert!(!log.borrow().iter().any(|l| l == "resize 20x20"));
    }
}
