//! Drawing surface abstraction for the effect renderers.

use crate::{Bounds, Rgba};

/// A 2D surface the effects draw onto.
///
/// Coordinates are in canvas pixels with the origin at the top-left.
/// Implementations drop any drawing that falls outside [`Canvas::bounds`].
pub trait Canvas {
    /// Current size of the surface.
    fn bounds(&self) -> Bounds;

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Rgba);

    /// Draw a disc whose color fades from `inner` at the center to `outer`
    /// at `radius`. Alpha of both stops is honoured.
    fn fill_radial_gradient(&mut self, cx: f32, cy: f32, radius: f32, inner: Rgba, outer: Rgba);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Rgba);
}
