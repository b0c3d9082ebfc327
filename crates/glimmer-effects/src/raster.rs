//! Software canvas presented in the terminal with half-block cells.

use glimmer_core::{Bounds, Canvas, Rgba};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::color::to_terminal;

/// Character drawing the top pixel as foreground and the bottom as background.
const HALF_BLOCK: &str = "▀";

/// An RGB pixel buffer implementing [`Canvas`].
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelCanvas {
    /// Create a black canvas covering `bounds` (rounded to whole pixels).
    pub fn new(bounds: Bounds) -> Self {
        let (width, height) = pixel_size(bounds);
        Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; width * height],
        }
    }

    /// Resize, discarding the current contents.
    pub fn resize(&mut self, bounds: Bounds) {
        let (width, height) = pixel_size(bounds);
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba::BLACK; width * height];
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Read a pixel, `None` when out of range.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Render the buffer as terminal lines, two pixel rows per line.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        (0..self.height.div_ceil(2))
            .map(|row| {
                let spans: Vec<Span> = (0..self.width)
                    .map(|x| {
                        let top = self.pixels[row * 2 * self.width + x];
                        let bottom = self.pixel(x, row * 2 + 1).unwrap_or(Rgba::BLACK);
                        Span::styled(
                            HALF_BLOCK,
                            Style::new().fg(to_terminal(top)).bg(to_terminal(bottom)),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Additive blending for glow.
    fn add(&mut self, idx: usize, color: Rgba, alpha: f32) {
        let px = &mut self.pixels[idx];
        px.r = (px.r + color.r * alpha).min(1.0);
        px.g = (px.g + color.g * alpha).min(1.0);
        px.b = (px.b + color.b * alpha).min(1.0);
    }

    /// Source-over blending for strokes.
    fn blend(&mut self, idx: usize, color: Rgba) {
        let a = color.a;
        let px = &mut self.pixels[idx];
        px.r = px.r * (1.0 - a) + color.r * a;
        px.g = px.g * (1.0 - a) + color.g * a;
        px.b = px.b * (1.0 - a) + color.b * a;
    }
}

fn pixel_size(bounds: Bounds) -> (usize, usize) {
    (
        bounds.width.round().max(1.0) as usize,
        bounds.height.round().max(1.0) as usize,
    )
}

impl Canvas for PixelCanvas {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.width as f32, self.height as f32)
    }

    fn clear(&mut self, color: Rgba) {
        let opaque = color.with_alpha(1.0);
        self.pixels.fill(opaque);
    }

    fn fill_radial_gradient(&mut self, cx: f32, cy: f32, radius: f32, inner: Rgba, outer: Rgba) {
        if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) || radius <= 0.0 {
            return;
        }

        let center_px = (cx.floor() as i64, cy.floor() as i64);
        let min_x = (cx - radius).floor() as i64;
        let max_x = (cx + radius).ceil() as i64;
        let min_y = (cy - radius).floor() as i64;
        let max_y = (cy + radius).ceil() as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let Some(idx) = self.index(x, y) else {
                    continue;
                };
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();

                let (t, coverage) = if dist <= radius {
                    (dist / radius, 1.0)
                } else if (x, y) == center_px {
                    // sub-pixel dots still light the pixel under their center
                    (0.0, radius.min(1.0))
                } else {
                    continue;
                };

                let color = inner.lerp(outer, t);
                self.add(idx, color, color.a.clamp(0.0, 1.0) * coverage);
            }
        }
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Rgba) {
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) || color.a <= 0.0 {
            return;
        }
        // with_alpha clamps into 0..=1
        let color = color.with_alpha(color.a);

        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let half = if width.is_finite() {
            ((width - 1.0) / 2.0).round().max(0.0) as i64
        } else {
            0
        };
        // Thicken across the minor axis
        let (ox, oy) = if dx.abs() >= dy.abs() { (0, 1) } else { (1, 0) };

        let mut covered: Vec<usize> = Vec::with_capacity((steps + 1) * (2 * half as usize + 1));
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (x0 + dx * t).floor() as i64;
            let y = (y0 + dy * t).floor() as i64;
            for k in -half..=half {
                if let Some(idx) = self.index(x + k * ox, y + k * oy) {
                    covered.push(idx);
                }
            }
        }
        covered.sort_unstable();
        covered.dedup();

        for idx in covered {
            self.blend(idx, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: f32, h: f32) -> PixelCanvas {
        PixelCanvas::new(Bounds::new(w, h))
    }

    #[test]
    fn test_zero_size_canvas_is_one_pixel() {
        let c = PixelCanvas::new(Bounds::new(0.0, 0.0));
        assert_eq!((c.width(), c.height()), (1, 1));
        assert_eq!(c.to_lines().len(), 1);
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut c = canvas(4.0, 4.0);
        let color = Rgba::from_u8(10, 20, 30);
        c.clear(color.with_alpha(0.2));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(c.pixel(x, y).unwrap().to_u8(), (10, 20, 30));
            }
        }
    }

    #[test]
    fn test_radial_gradient_is_brightest_at_center() {
        let mut c = canvas(21.0, 21.0);
        let white = Rgba::rgb(1.0, 1.0, 1.0);
        c.fill_radial_gradient(10.5, 10.5, 6.0, white, white.with_alpha(0.0));

        let center = c.pixel(10, 10).unwrap().r;
        let edge = c.pixel(14, 10).unwrap().r;
        let outside = c.pixel(0, 0).unwrap().r;
        assert!(center > edge);
        assert!(edge > 0.0);
        assert_eq!(outside, 0.0);
    }

    #[test]
    fn test_tiny_radius_still_lights_center_pixel() {
        let mut c = canvas(5.0, 5.0);
        c.fill_radial_gradient(2.9, 2.1, 0.05, Rgba::rgb(1.0, 0.0, 0.0), Rgba::TRANSPARENT);
        assert!(c.pixel(2, 2).unwrap().r > 0.0);
    }

    #[test]
    fn test_offscreen_drawing_is_dropped() {
        let mut c = canvas(4.0, 4.0);
        let white = Rgba::rgb(1.0, 1.0, 1.0);
        c.fill_radial_gradient(-50.0, -50.0, 3.0, white, white);
        c.stroke_line(-10.0, -10.0, -2.0, -2.0, 1.0, white);
        c.fill_radial_gradient(f32::NAN, 1.0, 3.0, white, white);
        assert!((0..4).all(|y| (0..4).all(|x| c.pixel(x, y) == Some(Rgba::BLACK))));
    }

    #[test]
    fn test_stroke_line_covers_endpoints() {
        let mut c = canvas(10.0, 10.0);
        let white = Rgba::rgb(1.0, 1.0, 1.0);
        c.stroke_line(0.5, 0.5, 8.5, 4.5, 1.0, white.with_alpha(0.5));
        assert_eq!(c.pixel(0, 0).unwrap().to_u8(), (128, 128, 128));
        assert_eq!(c.pixel(8, 4).unwrap().to_u8(), (128, 128, 128));
        assert_eq!(c.pixel(0, 9), Some(Rgba::BLACK));
    }

    #[test]
    fn test_to_lines_packs_two_rows_per_line() {
        let mut c = canvas(3.0, 4.0);
        c.clear(Rgba::from_u8(5, 5, 5));
        let lines = c.to_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans.len(), 3);
        assert_eq!(lines[0].spans[0].content, HALF_BLOCK);
    }
}
