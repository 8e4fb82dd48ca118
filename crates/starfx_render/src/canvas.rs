//! Software pixel canvas
//!
//! A CPU rasterizer implementing [`Surface`]. Pixels are stored as
//! premultiplied RGBA floats so repeated translucent fades accumulate without
//! banding; [`PixelCanvas::write_rgba8`] converts them for texture upload.
//!
//! All primitives are composited with source-over blending and a one pixel
//! anti-aliased edge. Pixel `(x, y)` is sampled at its center `(x + 0.5, y + 0.5)`.

use starfx_core::{GradientStop, Surface};
use starfx_math::{Color, Vec2};

/// A CPU-side RGBA drawing target
#[derive(Clone, Debug)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    /// Premultiplied RGBA, row-major from the top-left
    pixels: Vec<[f32; 4]>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; (width as usize) * (height as usize)],
        }
    }

    /// Premultiplied RGBA at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Straight-alpha color at `(x, y)`
    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        self.pixel(x, y).map(|[r, g, b, a]| {
            if a <= 0.0 {
                Color::TRANSPARENT
            } else {
                Color::rgba(r / a, g / a, b / a, a)
            }
        })
    }

    /// Write premultiplied RGBA8 bytes into `out`, resizing it as needed
    pub fn write_rgba8(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels.len() * 4);
        for p in &self.pixels {
            for c in p {
                out.push((c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8);
            }
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Source-over blend of a straight-alpha color scaled by `coverage`
    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let a = (color.a * coverage).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let i = self.index(x, y);
        let dst = &mut self.pixels[i];
        let inv = 1.0 - a;
        dst[0] = color.r * a + dst[0] * inv;
        dst[1] = color.g * a + dst[1] * inv;
        dst[2] = color.b * a + dst[2] * inv;
        dst[3] = a + dst[3] * inv;
    }

    /// Pixel bounds covering `[min, max]`, clipped to the canvas
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Visit every pixel in the padded bounding box with its center point
    fn shade<F>(&mut self, min: Vec2, max: Vec2, mut f: F)
    where
        F: FnMut(Vec2) -> Option<(Color, f32)>,
    {
        let pad = Vec2::new(1.0, 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(min - pad, max + pad) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if let Some((color, coverage)) = f(center) {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}

/// Coverage of a pixel whose center is `distance` past an edge (negative = inside)
#[inline]
fn edge_coverage(distance: f32) -> f32 {
    (0.5 - distance).clamp(0.0, 1.0)
}

/// Color of a radial gradient at `t` (0 = center, 1 = edge)
pub fn sample_gradient(stops: &[GradientStop], t: f32) -> Color {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Color::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return a.color.lerp(b.color, local);
        }
    }
    last.color
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Surface for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![[0.0; 4]; (width as usize) * (height as usize)];
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    fn fade(&mut self, color: Color) {
        let a = color.a.clamp(0.0, 1.0);
        let inv = 1.0 - a;
        let src = [color.r * a, color.g * a, color.b * a, a];
        for p in &mut self.pixels {
            for (d, s) in p.iter_mut().zip(src) {
                *d = s + *d * inv;
            }
        }
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(min, max) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let extent = Vec2::new(radius, radius);
        self.shade(center - extent, center + extent, |p| {
            let coverage = edge_coverage(p.distance(center) - radius);
            (coverage > 0.0).then_some((color, coverage))
        });
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, gradient_radius: f32, stops: &[GradientStop]) {
        if radius <= 0.0 || gradient_radius <= 0.0 {
            return;
        }
        let extent = Vec2::new(radius, radius);
        self.shade(center - extent, center + extent, |p| {
            let d = p.distance(center);
            let coverage = edge_coverage(d - radius);
            (coverage > 0.0).then(|| (sample_gradient(stops, d / gradient_radius), coverage))
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if width <= 0.0 {
            return;
        }
        let half = width * 0.5;
        let min = Vec2::new(from.x.min(to.x) - half, from.y.min(to.y) - half);
        let max = Vec2::new(from.x.max(to.x) + half, from.y.max(to.y) + half);
        self.shade(min, max, |p| {
            let coverage = edge_coverage(distance_to_segment(p, from, to) - half);
            (coverage > 0.0).then_some((color, coverage))
        });
    }

    fn stroke_ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if radius <= 0.0 || width <= 0.0 {
            return;
        }
        let half = width * 0.5;
        let extent = Vec2::new(radius + half, radius + half);
        self.shade(center - extent, center + extent, |p| {
            let coverage = edge_coverage((p.distance(center) - radius).abs() - half);
            (coverage > 0.0).then_some((color, coverage))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = PixelCanvas::new(4, 3);
        assert_eq!(canvas.size(), (4, 3));
        assert_eq!(canvas.pixel(3, 2), Some([0.0; 4]));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_circle_covers_center_not_corners() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 4.0, Color::WHITE);
        assert_eq!(canvas.pixel(10, 10), Some([1.0; 4]));
        assert_eq!(canvas.pixel(0, 0), Some([0.0; 4]));
        assert_eq!(canvas.pixel(10, 16), Some([0.0; 4]));
    }

    #[test]
    fn test_fade_over_opaque_and_empty() {
        let mut canvas = PixelCanvas::new(2, 1);
        canvas.fill_rect(Vec2::ZERO, Vec2::new(1.0, 1.0), Color::WHITE);
        canvas.fade(Color::BLACK.with_alpha(0.2));

        let lit = canvas.pixel(0, 0).unwrap_or_default();
        assert!(approx(lit[0], 0.8) && approx(lit[3], 1.0));
        let empty = canvas.pixel(1, 0).unwrap_or_default();
        assert!(approx(empty[0], 0.0) && approx(empty[3], 0.2));
    }

    #[test]
    fn test_repeated_fade_converges_to_black() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.fill_rect(Vec2::ZERO, Vec2::new(1.0, 1.0), Color::WHITE);
        for _ in 0..60 {
            canvas.fade(Color::BLACK.with_alpha(0.2));
        }
        let c = canvas.color_at(0, 0).unwrap_or(Color::WHITE);
        assert!(c.r < 0.001);
        assert!(approx(c.a, 1.0));
    }

    #[test]
    fn test_radial_glow_uses_stops() {
        let mut canvas = PixelCanvas::new(20, 20);
        let core = Color::rgba(0.0, 1.0, 0.0, 1.0);
        let stops = [
            GradientStop::new(0.0, core),
            GradientStop::new(1.0, Color::TRANSPARENT),
        ];
        canvas.radial_glow(Vec2::new(10.5, 10.5), 6.0, 12.0, &stops);
        let center = canvas.color_at(10, 10).unwrap_or(Color::TRANSPARENT);
        assert!(approx(center.g, 1.0) && approx(center.a, 1.0));
        let off = canvas.color_at(13, 10).unwrap_or(Color::TRANSPARENT);
        assert!(off.a < 1.0 && off.a > 0.0);
        assert_eq!(canvas.pixel(19, 19), Some([0.0; 4]));
    }

    #[test]
    fn test_sample_gradient_interpolates() {
        let stops = [
            GradientStop::new(0.0, Color::WHITE),
            GradientStop::new(0.5, Color::BLACK),
            GradientStop::new(1.0, Color::TRANSPARENT),
        ];
        assert_eq!(sample_gradient(&stops, -1.0), Color::WHITE);
        assert!(approx(sample_gradient(&stops, 0.25).r, 0.5));
        assert_eq!(sample_gradient(&stops, 2.0), Color::TRANSPARENT);
        assert_eq!(sample_gradient(&[], 0.5), Color::TRANSPARENT);
    }

    #[test]
    fn test_stroke_ring_leaves_center_empty() {
        let mut canvas = PixelCanvas::new(40, 40);
        canvas.stroke_ring(Vec2::new(20.0, 20.0), 10.0, 2.0, Color::WHITE);
        assert_eq!(canvas.pixel(20, 20), Some([0.0; 4]));
        assert!(canvas.pixel(29, 19).map_or(false, |p| p[3] > 0.9));
    }

    #[test]
    fn test_stroke_line_vertical() {
        let mut canvas = PixelCanvas::new(10, 20);
        canvas.stroke_line(Vec2::new(5.0, 2.0), Vec2::new(5.0, 12.0), 2.0, Color::WHITE);
        assert!(canvas.pixel(4, 7).map_or(false, |p| p[3] > 0.9));
        assert_eq!(canvas.pixel(4, 18), Some([0.0; 4]));
    }

    #[test]
    fn test_offscreen_shapes_are_clipped() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.fill_circle(Vec2::new(-50.0, -50.0), 5.0, Color::WHITE);
        canvas.fill_circle(Vec2::new(8.0, 8.0), 3.0, Color::WHITE);
        canvas.stroke_line(Vec2::new(-10.0, 4.0), Vec2::new(20.0, 4.0), 1.0, Color::WHITE);
        assert!(canvas.pixel(7, 7).map_or(false, |p| p[3] > 0.9));
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_rect(Vec2::ZERO, Vec2::new(4.0, 4.0), Color::WHITE);
        canvas.resize(6, 2);
        assert_eq!(canvas.size(), (6, 2));
        assert_eq!(canvas.pixel(5, 1), Some([0.0; 4]));
    }

    #[test]
    fn test_write_rgba8_premultiplied() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.fill_rect(Vec2::ZERO, Vec2::new(1.0, 1.0), Color::WHITE.with_alpha(0.5));
        let mut bytes = Vec::new();
        canvas.write_rgba8(&mut bytes);
        assert_eq!(bytes, vec![128, 128, 128, 128]);
    }

    #[test]
    fn test_draws_effect_frame() {
        use starfx_core::{Effect, SeededRandom, Starfield, StarfieldConfig};

        let mut field = Starfield::new(StarfieldConfig::default(), Box::new(SeededRandom::from_seed(1)));
        field.mount(200, 100);
        let mut canvas = PixelCanvas::new(200, 100);
        field.render(&mut canvas);
        let lit = (0..100)
            .flat_map(|y| (0..200).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y).map_or(false, |p| p[3] > 0.0))
            .count();
        assert!(lit > 0);
    }
}
