//! Clamp

use super::Float;
use num_traits::Num;

/// Clamps a value x to [min, max].
///
/// See https://github.com/rust-lang/rust/issues/44095
///
/// * `x` - The number to clamp.
/// * `min` - Minimum value.
/// * `max` - Maximum value.
pub fn clamp<T>(x: T, min: T, max: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// Clamps a value to [0, 1].
///
/// * `x` - The number to clamp.
#[inline(always)]
pub fn saturate(x: Float) -> Float {
    clamp(x, 0.0, 1.0)
}

/// Interface for clamping values.
pub trait Clamp<T: Copy> {
    /// Clamps the values to given [low, high] interval.
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    fn clamp(&self, low: T, high: T) -> Self;

    /// Clamps the values to [0, 1].
    fn saturate(&self) -> Self;
}
