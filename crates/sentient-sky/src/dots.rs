//! Sub-cell dot raster that stands in for a 2D canvas in the terminal.
//!
//! Each terminal cell covers a 2×4 block of dots drawn as one braille glyph.
//! Dots hold a white intensity composited over a black backdrop.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use sentient_sky_core::{DrawContext, Point, RadialGradient, Rgba, Surface, Viewport};

/// Dots per cell, horizontally.
pub const CELL_DOTS_X: u32 = 2;
/// Dots per cell, vertically.
pub const CELL_DOTS_Y: u32 = 4;

/// Intensity above which a dot is drawn as part of the glyph.
const LIT_THRESHOLD: f32 = 0.05;

/// Slack absorbed when snapping a scaled size to whole dots.
const SNAP_EPSILON: f64 = 1e-6;

/// First braille codepoint (no dots raised).
const BRAILLE_BASE: u32 = 0x2800;

/// Braille bit for the dot at `[row][column]` within a cell.
const BRAILLE_BITS: [[u32; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Logical viewport for a terminal of `cols × rows` cells.
pub fn viewport_for_cells(cols: u16, rows: u16, pixel_ratio: f64) -> Viewport {
    let ratio = effective_ratio(pixel_ratio);
    Viewport::new(
        (cols as u32 * CELL_DOTS_X) as f64 / ratio,
        (rows as u32 * CELL_DOTS_Y) as f64 / ratio,
        pixel_ratio,
    )
}

/// Logical position of the center of a terminal cell.
pub fn cell_center(column: u16, row: u16, pixel_ratio: f64) -> Point {
    let ratio = effective_ratio(pixel_ratio);
    Point::new(
        (column as f64 + 0.5) * CELL_DOTS_X as f64 / ratio,
        (row as f64 + 0.5) * CELL_DOTS_Y as f64 / ratio,
    )
}

fn effective_ratio(pixel_ratio: f64) -> f64 {
    if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
        pixel_ratio
    } else {
        1.0
    }
}

/// A grid of dot intensities implementing [`DrawContext`].
#[derive(Debug, Clone, Default)]
pub struct DotCanvas {
    width: u32,
    height: u32,
    scale: f64,
    dots: Vec<f32>,
    /// Gradient contribution alone, used for cell backgrounds.
    haze: Vec<f32>,
}

impl DotCanvas {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            ..Default::default()
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size the backing to `surface` for a terminal of `cols × rows` cells.
    ///
    /// The scaled surface size is snapped to whole dots so a fractional
    /// pixel ratio does not drop the last column, and clipped to the dots
    /// the terminal can show.
    pub fn fit_to_cells(&mut self, surface: &Surface, cols: u16, rows: u16) {
        let snap = |logical: f64, limit: u32| {
            ((logical * surface.dpr() + SNAP_EPSILON).floor().max(0.0) as u32).min(limit)
        };
        self.resize_backing(
            snap(surface.width(), cols as u32 * CELL_DOTS_X),
            snap(surface.height(), rows as u32 * CELL_DOTS_Y),
        );
        self.set_transform(surface.dpr());
    }

    /// Intensity at device position `(x, y)`; zero outside the grid.
    #[cfg(test)]
    pub fn intensity(&self, x: u32, y: u32) -> f32 {
        self.index(x as i64, y as i64)
            .map(|i| self.dots[i])
            .unwrap_or(0.0)
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Device-space bounds of the logical rect `(0, 0, w, h)`, clipped.
    fn device_rect(&self, width: f64, height: f64) -> (u32, u32) {
        let w = (width * self.scale).ceil().clamp(0.0, self.width as f64) as u32;
        let h = (height * self.scale).ceil().clamp(0.0, self.height as f64) as u32;
        (w, h)
    }

    /// Source-over of `color` onto one dot.
    fn blend(&mut self, index: usize, color: Rgba) {
        over(&mut self.dots[index], color);
    }

    /// Brightest intensity and mean haze of a cell, with its braille pattern.
    fn cell(&self, column: u32, row: u32) -> (u32, f32, f32) {
        let mut bits = 0;
        let mut brightest = 0.0_f32;
        let mut haze = 0.0_f32;
        for (dy, row_bits) in BRAILLE_BITS.iter().enumerate() {
            for (dx, bit) in row_bits.iter().enumerate() {
                let x = (column * CELL_DOTS_X) as i64 + dx as i64;
                let y = (row * CELL_DOTS_Y) as i64 + dy as i64;
                let Some(index) = self.index(x, y) else {
                    continue;
                };
                let value = self.dots[index];
                if value > LIT_THRESHOLD {
                    bits |= bit;
                }
                brightest = brightest.max(value);
                haze += self.haze[index];
            }
        }
        (bits, brightest, haze / (CELL_DOTS_X * CELL_DOTS_Y) as f32)
    }
}

impl DrawContext for DotCanvas {
    fn resize_backing(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.dots = vec![0.0; width as usize * height as usize];
        self.haze = vec![0.0; width as usize * height as usize];
    }

    fn set_transform(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn clear(&mut self, width: f64, height: f64) {
        let (w, h) = self.device_rect(width, height);
        for y in 0..h {
            let start = y as usize * self.width as usize;
            let row = start..start + w as usize;
            self.dots[row.clone()].fill(0.0);
            self.haze[row].fill(0.0);
        }
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient, width: f64, height: f64) {
        let (w, h) = self.device_rect(width, height);
        for y in 0..h {
            for x in 0..w {
                let logical = Point::new(
                    (x as f64 + 0.5) / self.scale,
                    (y as f64 + 0.5) / self.scale,
                );
                let color = gradient.color_at(logical);
                let index = y as usize * self.width as usize + x as usize;
                self.blend(index, color);
                over(&mut self.haze[index], color);
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        let cx = center.x * self.scale;
        let cy = center.y * self.scale;
        let r = radius * self.scale;

        let mut covered = Vec::new();
        let (x0, x1) = ((cx - r).floor() as i64, (cx + r).ceil() as i64);
        let (y0, y1) = ((cy - r).floor() as i64, (cy + r).ceil() as i64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    covered.extend(self.index(x, y));
                }
            }
        }
        // Sub-dot circles still light the dot under their center.
        if covered.is_empty() {
            covered.extend(self.index(cx.floor() as i64, cy.floor() as i64));
        }

        for index in covered {
            self.blend(index, color);
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, line_width: f64, color: Rgba) {
        let (fx, fy) = (from.x * self.scale, from.y * self.scale);
        let (tx, ty) = (to.x * self.scale, to.y * self.scale);
        let steps = (tx - fx).abs().max((ty - fy).abs()).ceil().max(1.0) as i64;
        let thickness = (line_width * self.scale).round().max(1.0) as i64;
        let spread = (thickness - 1) / 2;

        let mut touched = Vec::new();
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let x = (fx + (tx - fx) * t).floor() as i64;
            let y = (fy + (ty - fy) * t).floor() as i64;
            for oy in 0..thickness {
                for ox in 0..thickness {
                    touched.extend(self.index(x + ox - spread, y + oy - spread));
                }
            }
        }
        touched.sort_unstable();
        touched.dedup();

        for index in touched {
            self.blend(index, color);
        }
    }
}

impl Widget for &DotCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for column in 0..area.width {
                let (bits, brightest, haze) = self.cell(column as u32, row as u32);
                let cell = &mut buf[(area.x + column, area.y + row)];
                if bits == 0 {
                    cell.set_char(' ');
                } else {
                    let glyph = char::from_u32(BRAILLE_BASE + bits).unwrap_or(' ');
                    cell.set_char(glyph).set_fg(gray(brightest));
                }
                cell.set_bg(gray(haze));
            }
        }
    }
}

/// Source-over of `color` onto a white intensity over black.
fn over(dst: &mut f32, color: Rgba) {
    let a = color.clamped_alpha() as f32;
    let src = color.luminance() as f32;
    *dst = src * a + *dst * (1.0 - a);
}

/// Map an intensity in `[0, 1]` to a terminal gray.
fn gray(level: f32) -> Color {
    let v = (level.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(v, v, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: u32, height: u32, scale: f64) -> DotCanvas {
        let mut canvas = DotCanvas::new();
        canvas.resize_backing(width, height);
        canvas.set_transform(scale);
        canvas
    }

    fn lit(canvas: &DotCanvas) -> usize {
        canvas.dots.iter().filter(|&&v| v > 0.0).count()
    }

    #[test]
    fn test_viewport_for_cells() {
        let viewport = viewport_for_cells(80, 24, 1.0);
        assert_eq!(viewport.width, 160.0);
        assert_eq!(viewport.height, 96.0);

        let viewport = viewport_for_cells(80, 24, 2.0);
        assert_eq!(viewport.width, 80.0);
        assert_eq!(viewport.height, 48.0);
        assert_eq!(viewport.pixel_ratio, 2.0);
    }

    #[test]
    fn test_cell_center() {
        assert_eq!(cell_center(0, 0, 1.0), Point::new(1.0, 2.0));
        assert_eq!(cell_center(3, 1, 2.0), Point::new(3.5, 3.0));
    }

    #[test]
    fn test_tiny_circle_lights_center_dot() {
        let mut canvas = canvas(10, 10, 1.0);
        canvas.fill_circle(Point::new(4.2, 7.9), 0.3, Rgba::white(0.5));
        assert_eq!(lit(&canvas), 1);
        assert_eq!(canvas.intensity(4, 7), 0.5);
    }

    #[test]
    fn test_circle_respects_scale() {
        let mut small = canvas(20, 20, 1.0);
        small.fill_circle(Point::new(5.0, 5.0), 1.5, Rgba::white(1.0));
        let mut large = canvas(20, 20, 2.0);
        large.fill_circle(Point::new(5.0, 5.0), 1.5, Rgba::white(1.0));
        assert!(lit(&large) > lit(&small));
        assert_eq!(large.intensity(10, 10), 1.0);
    }

    #[test]
    fn test_off_canvas_draws_are_clipped() {
        let mut canvas = canvas(8, 8, 1.0);
        canvas.fill_circle(Point::new(-20.0, -20.0), 0.4, Rgba::white(1.0));
        canvas.stroke_line(
            Point::new(-10.0, -60.0),
            Point::new(-5.0, -50.0),
            1.0,
            Rgba::white(1.0),
        );
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn test_source_over_blending() {
        let mut canvas = canvas(4, 4, 1.0);
        canvas.fill_circle(Point::new(1.5, 1.5), 0.2, Rgba::white(0.5));
        canvas.fill_circle(Point::new(1.5, 1.5), 0.2, Rgba::white(0.5));
        assert!((canvas.intensity(1, 1) - 0.75).abs() < 1e-6);

        canvas.fill_circle(Point::new(1.5, 1.5), 0.2, Rgba::white(-1.0));
        assert!((canvas.intensity(1, 1) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_line_touches_each_dot_once() {
        let mut canvas = canvas(16, 16, 1.0);
        canvas.stroke_line(
            Point::new(0.5, 0.5),
            Point::new(10.5, 0.5),
            1.0,
            Rgba::white(0.5),
        );
        assert_eq!(lit(&canvas), 11);
        assert!((0..=10).all(|x| canvas.intensity(x, 0) == 0.5));
    }

    #[test]
    fn test_clear_and_gradient() {
        let mut canvas = canvas(4, 4, 1.0);
        canvas.fill_circle(Point::new(2.0, 2.0), 3.0, Rgba::white(1.0));
        canvas.clear(4.0, 4.0);
        assert_eq!(lit(&canvas), 0);

        let gradient = RadialGradient::new(Point::new(2.0, 2.0), 0.0, 4.0)
            .with_stop(0.0, Rgba::white(0.5))
            .with_stop(1.0, Rgba::TRANSPARENT);
        canvas.fill_radial_gradient(&gradient, 4.0, 4.0);
        assert!(canvas.intensity(1, 1) > canvas.intensity(0, 0));
        assert!(canvas.intensity(0, 0) > 0.0);
    }

    #[test]
    fn test_widget_braille_output() {
        let mut canvas = canvas(4, 4, 1.0);
        canvas.fill_circle(Point::new(0.5, 0.5), 0.2, Rgba::white(1.0));
        canvas.fill_circle(Point::new(3.5, 3.5), 0.2, Rgba::white(1.0));

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "\u{2801}");
        assert_eq!(buf[(1, 0)].symbol(), "\u{2880}");
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_star_leaves_background_black() {
        let mut canvas = canvas(2, 4, 1.0);
        canvas.clear(2.0, 4.0);
        canvas.fill_circle(Point::new(1.0, 2.0), 0.5, Rgba::white(0.6));

        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);

        assert_ne!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_background_follows_haze_only() {
        let mut canvas = canvas(2, 4, 1.0);
        let gradient = RadialGradient::new(Point::new(1.0, 2.0), 0.0, 100.0)
            .with_stop(0.0, Rgba::white(0.2))
            .with_stop(1.0, Rgba::white(0.2));
        canvas.fill_radial_gradient(&gradient, 2.0, 4.0);

        let area = Rect::new(0, 0, 1, 1);
        let mut hazy = Buffer::empty(area);
        (&canvas).render(area, &mut hazy);

        canvas.fill_circle(Point::new(1.0, 2.0), 3.0, Rgba::white(1.0));
        let mut starry = Buffer::empty(area);
        (&canvas).render(area, &mut starry);

        assert_eq!(hazy[(0, 0)].bg, Color::Rgb(51, 51, 51));
        assert_eq!(starry[(0, 0)].bg, hazy[(0, 0)].bg);
        assert_eq!(starry[(0, 0)].fg, Color::Rgb(255, 255, 255));

        canvas.clear(2.0, 4.0);
        let mut cleared = Buffer::empty(area);
        (&canvas).render(area, &mut cleared);
        assert_eq!(cleared[(0, 0)].bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_fit_to_cells_keeps_last_column() {
        for ratio in [0.3, 0.7, 1.0, 1.1, 1.3, 1.7, 2.0] {
            for cols in 1..=120 {
                let surface = Surface::new(viewport_for_cells(cols, 7, ratio));
                let mut canvas = DotCanvas::new();
                canvas.fit_to_cells(&surface, cols, 7);
                assert_eq!(canvas.width(), cols as u32 * CELL_DOTS_X, "ratio {ratio} cols {cols}");
                assert_eq!(canvas.height(), 7 * CELL_DOTS_Y, "ratio {ratio}");
            }
        }
    }

    #[test]
    fn test_fit_to_cells_with_capped_ratio() {
        let surface = Surface::new(viewport_for_cells(10, 5, 4.0));
        let mut canvas = DotCanvas::new();
        canvas.fit_to_cells(&surface, 10, 5);
        assert_eq!((canvas.width(), canvas.height()), (10, 10));
        assert_eq!(canvas.scale, 2.0);
    }

    #[test]
    fn test_widget_blank_cells() {
        let canvas = canvas(4, 4, 1.0);
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);
        assert_eq!(buf[(2, 1)].symbol(), " ");
        assert_eq!(buf[(2, 1)].bg, Color::Rgb(0, 0, 0));
    }
}
