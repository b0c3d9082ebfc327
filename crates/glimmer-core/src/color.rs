//! Linear RGBA color used by the canvas.

/// Color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Build an opaque color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Same color with a new alpha, clamped to `0.0..=1.0`.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: clamp_unit(a),
            ..self
        }
    }

    /// Multiply the color channels (not alpha) by `factor`.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            r: clamp_unit(self.r * factor),
            g: clamp_unit(self.g * factor),
            b: clamp_unit(self.b * factor),
            a: self.a,
        }
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = clamp_unit(t);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Convert to 8-bit channels, ignoring alpha.
    pub fn to_u8(self) -> (u8, u8, u8) {
        let c = |v: f32| (clamp_unit(v) * 255.0).round() as u8;
        (c(self.r), c(self.g), c(self.b))
    }
}

/// Clamp to `0.0..=1.0`, mapping NaN to zero.
pub(crate) fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(Rgba::BLACK.with_alpha(2.0).a, 1.0);
        assert_eq!(Rgba::BLACK.with_alpha(-1.0).a, 0.0);
        assert_eq!(Rgba::BLACK.with_alpha(f32::NAN).a, 0.0);
    }

    #[test]
    fn test_lerp_and_to_u8() {
        let white = Rgba::rgb(1.0, 1.0, 1.0);
        let mid = Rgba::BLACK.lerp(white, 0.5);
        assert_eq!(mid.to_u8(), (128, 128, 128));
        assert_eq!(Rgba::from_u8(10, 20, 30).to_u8(), (10, 20, 30));
    }
}
