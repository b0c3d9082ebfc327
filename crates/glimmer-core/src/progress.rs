//! Scroll progress input for the node network.

/// Scroll position expressed as a percentage in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollProgress(f32);

impl ScrollProgress {
    pub const START: ScrollProgress = ScrollProgress(0.0);
    pub const END: ScrollProgress = ScrollProgress(100.0);

    /// Create from a raw percentage, clamping out-of-range and NaN input.
    pub fn new(percent: f32) -> Self {
        if percent.is_nan() {
            return Self::START;
        }
        Self(percent.clamp(0.0, 100.0))
    }

    /// Convert a scroll offset within a scrollable range to a percentage.
    ///
    /// A range of zero (nothing to scroll) reports 0%.
    pub fn from_offset(offset: f32, max_offset: f32) -> Self {
        if max_offset <= 0.0 || !max_offset.is_finite() {
            return Self::START;
        }
        Self::new(offset / max_offset * 100.0)
    }

    pub fn percent(self) -> f32 {
        self.0
    }

    /// Progress as a fraction in `0.0..=1.0`.
    pub fn fraction(self) -> f32 {
        self.0 / 100.0
    }
}
