//! Pointer controller
//!
//! Tracks the pointer across window events and forwards changes to a
//! [`PointerTarget`] once per frame:
//! - Cursor moved: new pointer position
//! - Entering/leaving a hit region: hover on/off
//! - Left button: press/release
//! - Left button released over the region it was pressed on: click

use starfx_core::CursorTrail;
use starfx_math::Vec2;
use winit::event::{ElementState, MouseButton};

/// A named rectangle that reacts to hover and click
#[derive(Clone, Debug, PartialEq)]
pub struct HitRegion {
    pub name: String,
    pub min: Vec2,
    pub max: Vec2,
}

impl HitRegion {
    pub fn new(name: impl Into<String>, min: Vec2, max: Vec2) -> Self {
        Self { name: name.into(), min, max }
    }

    /// A region of `size` centered on `center`
    pub fn centered(name: impl Into<String>, center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(name, center - half, center + half)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x
            && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Pointer event accumulator
pub struct PointerController {
    position: Option<Vec2>,
    moved: bool,

    regions: Vec<HitRegion>,
    hovered: Option<usize>,
    hover_dirty: bool,

    // Left-button transitions since the last update, true = pressed
    button_events: Vec<bool>,
    pressed: bool,
    pressed_region: Option<usize>,
    clicked: Option<String>,
}

impl Default for PointerController {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerController {
    pub fn new() -> Self {
        Self {
            position: None,
            moved: false,
            regions: Vec::new(),
            hovered: None,
            hover_dirty: false,
            button_events: Vec::new(),
            pressed: false,
            pressed_region: None,
            clicked: None,
        }
    }

    /// Replace all hit regions (e.g. after a layout change)
    pub fn set_regions(&mut self, regions: Vec<HitRegion>) {
        self.regions = regions;
        self.pressed_region = None;
        self.refresh_hover();
    }

    pub fn regions(&self) -> &[HitRegion] {
        &self.regions
    }

    /// Process cursor movement in window pixels
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        self.position = Some(Vec2::new(x as f32, y as f32));
        self.moved = true;
        self.refresh_hover();
    }

    /// Cursor left the window
    pub fn process_cursor_left(&mut self) {
        self.position = None;
        self.refresh_hover();
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }
        let pressed = state == ElementState::Pressed;
        if pressed == self.pressed {
            return;
        }
        self.pressed = pressed;
        self.button_events.push(pressed);

        if pressed {
            self.pressed_region = self.hovered;
        } else {
            let released_on = self.hovered;
            if let Some(index) = self.pressed_region.take().filter(|i| Some(*i) == released_on) {
                self.clicked = Some(self.regions[index].name.clone());
            }
        }
    }

    /// Name of the region under the pointer
    pub fn hovered_region(&self) -> Option<&str> {
        self.hovered.map(|i| self.regions[i].name.as_str())
    }

    /// Consume the last completed click
    pub fn take_click(&mut self) -> Option<String> {
        self.clicked.take()
    }

    /// Forward accumulated changes to `target`
    ///
    /// Order: position, hover, then button transitions in the order received.
    pub fn update<T: PointerTarget>(&mut self, target: &mut T) {
        if self.moved {
            if let Some(position) = self.position {
                target.pointer_moved(position);
            }
            self.moved = false;
        }
        if self.hover_dirty {
            target.hover_changed(self.hovered.is_some());
            self.hover_dirty = false;
        }
        for pressed in self.button_events.drain(..) {
            if pressed {
                target.pointer_down();
            } else {
                target.pointer_up();
            }
        }
    }

    fn refresh_hover(&mut self) {
        let hovered = self
            .position
            .and_then(|p| self.regions.iter().position(|r| r.contains(p)));
        if hovered.is_some() != self.hovered.is_some() {
            self.hover_dirty = true;
        }
        self.hovered = hovered;
    }
}

/// Trait for pointer-driven effects
/// Allows the controller to drive anything that follows the pointer
pub trait PointerTarget {
    fn pointer_moved(&mut self, position: Vec2);
    fn hover_changed(&mut self, hovering: bool);
    fn pointer_down(&mut self);
    fn pointer_up(&mut self);
}

impl PointerTarget for CursorTrail {
    fn pointer_moved(&mut self, position: Vec2) {
        self.set_pointer(position);
    }

    fn hover_changed(&mut self, hovering: bool) {
        self.set_hovering(hovering);
    }

    fn pointer_down(&mut self) {
        self.press();
    }

    fn pointer_up(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl PointerTarget for Recorder {
        fn pointer_moved(&mut self, p: Vec2) {
            self.events.push(format!("move {} {}", p.x, p.y));
        }
        fn hover_changed(&mut self, hovering: bool) {
            self.events.push(format!("hover {}", hovering));
        }
        fn pointer_down(&mut self) {
            self.events.push("down".to_string());
        }
        fn pointer_up(&mut self) {
            self.events.push("up".to_string());
        }
    }

    fn controller() -> PointerController {
        let mut c = PointerController::new();
        c.set_regions(vec![HitRegion::new("launch", Vec2::new(100.0, 100.0), Vec2::new(200.0, 140.0))]);
        c
    }

    #[test]
    fn test_hit_region_contains_edges() {
        let r = HitRegion::centered("r", Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0));
        assert!(r.contains(Vec2::new(40.0, 45.0)));
        assert!(r.contains(Vec2::new(60.0, 55.0)));
        assert!(!r.contains(Vec2::new(61.0, 50.0)));
    }

    #[test]
    fn test_update_forwards_in_order() {
        let mut c = controller();
        let mut target = Recorder::default();

        c.process_cursor_moved(150.0, 120.0);
        c.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        c.process_mouse_button(MouseButton::Left, ElementState::Released);
        c.update(&mut target);

        assert_eq!(target.events, vec!["move 150 120", "hover true", "down", "up"]);

        target.events.clear();
        c.update(&mut target);
        assert!(target.events.is_empty());
    }

    #[test]
    fn test_hover_reports_only_transitions() {
        let mut c = controller();
        let mut target = Recorder::default();

        c.process_cursor_moved(150.0, 120.0);
        c.update(&mut target);
        c.process_cursor_moved(160.0, 125.0);
        c.update(&mut target);
        c.process_cursor_moved(10.0, 10.0);
        c.update(&mut target);

        let hovers: Vec<_> = target.events.iter().filter(|e| e.starts_with("hover")).collect();
        assert_eq!(hovers, vec!["hover true", "hover false"]);
    }

    #[test]
    fn test_click_requires_release_on_same_region() {
        let mut c = controller();

        c.process_cursor_moved(150.0, 120.0);
        c.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        c.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert_eq!(c.take_click().as_deref(), Some("launch"));
        assert_eq!(c.take_click(), None);

        c.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        c.process_cursor_moved(10.0, 10.0);
        c.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert_eq!(c.take_click(), None);
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut c = controller();
        let mut target = Recorder::default();
        c.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        c.update(&mut target);
        assert!(target.events.is_empty());
        assert!(!c.pressed);
    }

    #[test]
    fn test_cursor_left_clears_hover() {
        let mut c = controller();
        c.process_cursor_moved(150.0, 120.0);
        assert_eq!(c.hovered_region(), Some("launch"));
        c.process_cursor_left();
        assert_eq!(c.hovered_region(), None);
        assert_eq!(c.position, None);
    }

    #[test]
    fn test_drives_cursor_trail() {
        use starfx_core::{CursorTrailConfig, Effect, MarkerState, NativeCursor};

        struct NoCursor;
        impl NativeCursor for NoCursor {
            fn set_native_cursor_visible(&mut self, _visible: bool) {}
        }

        let mut trail = CursorTrail::new(CursorTrailConfig::default(), Box::new(NoCursor));
        trail.mount(1280, 720);
        let mut c = controller();

        c.process_cursor_moved(150.0, 120.0);
        c.update(&mut trail);
        assert_eq!(trail.pointer(), Vec2::new(150.0, 120.0));
        assert_eq!(trail.marker_state(), MarkerState::Hovering);

        c.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        c.update(&mut trail);
        assert_eq!(trail.marker_state(), MarkerState::Pressed);
        assert_eq!(trail.burst_count(), 1);
    }
}
