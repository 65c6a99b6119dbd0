//! The drawing primitives a host must provide.

use crate::color::Rgba;
use crate::geometry::Point;

/// A color at a position along a gradient, `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// A gradient between two concentric circles.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Stops sorted by offset.
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: Point, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            stops: Vec::new(),
        }
    }

    pub fn with_stop(mut self, offset: f64, color: Rgba) -> Self {
        let stop = ColorStop::new(offset.clamp(0.0, 1.0), color);
        let at = self.stops.partition_point(|s| s.offset <= stop.offset);
        self.stops.insert(at, stop);
        self
    }

    /// Color of the gradient at `point`. Outside the stop range the nearest
    /// stop color extends; without stops the gradient is transparent.
    pub fn color_at(&self, point: Point) -> Rgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::TRANSPARENT;
        };

        let span = self.outer_radius - self.inner_radius;
        let t = if span > 0.0 {
            (point.distance(self.center) - self.inner_radius) / span
        } else {
            1.0
        };

        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        self.stops
            .windows(2)
            .find(|pair| t <= pair[1].offset)
            .map(|pair| {
                let width = pair[1].offset - pair[0].offset;
                let local = if width > 0.0 {
                    (t - pair[0].offset) / width
                } else {
                    1.0
                };
                pair[0].color.lerp(pair[1].color, local)
            })
            .unwrap_or(last.color)
    }
}

/// An immediate-mode 2D drawing surface.
///
/// Coordinates passed to the drawing calls are logical; implementations map
/// them to device pixels through the scale installed by
/// [`set_transform`](DrawContext::set_transform).
pub trait DrawContext {
    /// Reallocate the backing store at the given device pixel size.
    fn resize_backing(&mut self, width: u32, height: u32);

    /// Install a uniform logical-to-device scale.
    fn set_transform(&mut self, scale: f64);

    /// Erase the logical rectangle `(0, 0, width, height)`.
    fn clear(&mut self, width: f64, height: f64);

    /// Fill the logical rectangle `(0, 0, width, height)` with a gradient.
    fn fill_radial_gradient(&mut self, gradient: &RadialGradient, width: f64, height: f64);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: Point, to: Point, line_width: f64, color: Rgba);
}
