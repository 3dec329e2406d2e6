//! RGBA colours

use crate::math::*;

/// A 4-channel floating point colour. The values are not restricted to
/// [0, 1]; sinks that need it quantize on write.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: Float,

    /// Green channel.
    pub g: Float,

    /// Blue channel.
    pub b: Float,

    /// Alpha channel.
    pub a: Float,
}

impl Rgba {
    /// Creates a new `Rgba`.
    ///
    /// * `r` - Red channel.
    /// * `g` - Green channel.
    /// * `b` - Blue channel.
    /// * `a` - Alpha channel.
    pub fn new(r: Float, g: Float, b: Float, a: Float) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque colour from RGB values.
    ///
    /// * `rgb` - Red, green and blue channels.
    pub fn opaque(rgb: [Float; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], 1.0)
    }

    /// Creates an opaque grey colour with all three colour channels set to `v`.
    ///
    /// * `v` - The value.
    pub fn grey(v: Float) -> Self {
        Self::new(v, v, v, 1.0)
    }

    /// Returns the RGB channels.
    pub fn rgb(&self) -> [Float; 3] {
        [self.r, self.g, self.b]
    }

    /// Apply a function to the RGB channels, leaving alpha unchanged.
    ///
    /// * `f` - The function.
    pub fn map_rgb<F: Fn(Float) -> Float>(&self, f: F) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), self.a)
    }

    /// Returns true if any channel is NaN.
    pub fn has_nans(&self) -> bool {
        self.r.is_nan() || self.g.is_nan() || self.b.is_nan() || self.a.is_nan()
    }

    /// Quantize to 8-bits per channel by clamping to [0, 1] and scaling by
    /// 255. The fractional part is truncated.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}

/// Clamp a value to [0, 1], scale to [0, 255] and truncate.
///
/// * `v` - Value to quantize.
#[inline]
fn quantize(v: Float) -> u8 {
    (saturate(v) * 255.0) as u8
}

impl Clamp<Float> for Rgba {
    /// Clamps all four channels to [low, high].
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    fn clamp(&self, low: Float, high: Float) -> Self {
        Self::new(
            clamp(self.r, low, high),
            clamp(self.g, low, high),
            clamp(self.b, low, high),
            clamp(self.a, low, high),
        )
    }

    /// Clamps all four channels to [0, 1].
    fn saturate(&self) -> Self {
        Clamp::clamp(self, 0.0, 1.0)
    }
}
