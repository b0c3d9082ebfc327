//! Drawing surface dimensions.

/// Width and height of a drawing surface, in canvas pixels.
///
/// Both sides are at least one pixel so that wrapping and normalization
/// never divide by zero, even for a collapsed terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Bounds {
    /// Create bounds, clamping each side to a minimum of one pixel.
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Bounds for a terminal area of `cols` x `rows` cells drawn with half blocks.
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self::new(cols as f32, rows as f32 * 2.0)
    }

    /// Wrap a position back inside the bounds (toroidal edges).
    pub fn wrap(&self, x: f32, y: f32) -> (f32, f32) {
        (wrap_axis(x, self.width), wrap_axis(y, self.height))
    }

    /// Whether the position lies within `[0, width] x [0, height]`.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

fn wrap_axis(v: f32, extent: f32) -> f32 {
    if !v.is_finite() {
        return extent / 2.0;
    }
    let wrapped = v.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sized_bounds_are_clamped() {
        let b = Bounds::new(0.0, -5.0);
        assert_eq!(b.width, 1.0);
        assert_eq!(b.height, 1.0);

        let b = Bounds::new(f32::NAN, f32::INFINITY);
        assert_eq!(b, Bounds::default());
    }

    #[test]
    fn test_wrap_positions() {
        let b = Bounds::new(100.0, 50.0);
        assert_eq!(b.wrap(105.0, 10.0), (5.0, 10.0));
        assert_eq!(b.wrap(-10.0, 60.0), (90.0, 10.0));
        assert_eq!(b.wrap(100.0, 50.0), (0.0, 0.0));

        let (x, y) = b.wrap(-1e-9, f32::NAN);
        assert!(b.contains(x, y));
    }

    #[test]
    fn test_from_cells_doubles_rows() {
        let b = Bounds::from_cells(80, 24);
        assert_eq!(b.width, 80.0);
        assert_eq!(b.height, 48.0);
        assert_eq!(b.center(), (40.0, 24.0));
        assert_eq!(b.min_side(), 48.0);
    }
}
