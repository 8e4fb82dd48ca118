//! Drawing surfaces
//!
//! A [`Surface`] is the pixel region an effect paints into. Effects only ever
//! see this trait; the software canvas in `starfx_render` and the
//! [`RecordingSurface`] used by tests are the two implementations.

use starfx_math::{Color, Vec2};

/// One color stop of a radial gradient
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the radius, 0.0 (center) to 1.0 (edge)
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// A rectangular drawing target in surface-space pixels
pub trait Surface {
    /// Current size in pixels (width, height)
    fn size(&self) -> (u32, u32);

    /// Resize, discarding contents
    fn resize(&mut self, width: u32, height: u32);

    /// Clear every pixel to transparent
    fn clear(&mut self);

    /// Composite a translucent color over the whole surface
    fn fade(&mut self, color: Color);

    /// Fill an axis-aligned rectangle
    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color);

    /// Fill a circle with a solid color
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Fill a circle of `radius` with a radial gradient spanning `gradient_radius`
    fn radial_glow(&mut self, center: Vec2, radius: f32, gradient_radius: f32, stops: &[GradientStop]);

    /// Stroke a straight line
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Stroke a circle outline
    fn stroke_ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
}

/// A recorded draw call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fade(Color),
    FillRect { min: Vec2, max: Vec2, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    RadialGlow { center: Vec2, radius: f32, gradient_radius: f32, stops: Vec<GradientStop> },
    StrokeLine { from: Vec2, to: Vec2, width: f32, color: Color },
    StrokeRing { center: Vec2, radius: f32, width: f32, color: Color },
}

/// Surface that records draw calls instead of rasterizing them
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Every command recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded circle-like primitives (fills and glows)
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. } | DrawCommand::RadialGlow { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fade(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fade(color));
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { min, max, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, gradient_radius: f32, stops: &[GradientStop]) {
        self.commands.push(DrawCommand::RadialGlow {
            center,
            radius,
            gradient_radius,
            stops: stops.to_vec(),
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeLine { from, to, width, color });
    }

    fn stroke_ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRing { center, radius, width, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_records_in_order() {
        let mut s = RecordingSurface::new(100, 50);
        s.clear();
        s.fill_circle(Vec2::new(1.0, 2.0), 3.0, Color::WHITE);
        s.fade(Color::BLACK.with_alpha(0.2));

        assert_eq!(s.size(), (100, 50));
        assert_eq!(s.commands().len(), 3);
        assert_eq!(s.commands()[0], DrawCommand::Clear);
        assert_eq!(s.circle_count(), 1);
    }

    #[test]
    fn test_resize_discards_commands() {
        let mut s = RecordingSurface::new(10, 10);
        s.clear();
        s.resize(20, 30);
        assert_eq!(s.size(), (20, 30));
        assert!(s.commands().is_empty());
    }
}
