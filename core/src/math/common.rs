//! Common

use num_traits::Num;
use std::ops::{Add, Mul, Neg};

/// Use 32-bit precision for floating point numbers.
pub type Float = f32;

/// PI (π)
pub const PI: Float = std::f32::consts::PI;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// 32-bit precision value for 1 - epsilon.
pub const ONE_MINUS_EPSILON: Float = hexf32!("0x1.fffffep-1"); // 0.99999994

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Linearly interpolate between two points for parameters in [0, 1] and
/// extrapolate for parameters outside that interval.
///
/// * `t` - Parameter.
/// * `p0` - Point at t=0.
/// * `p1` - Point at t=1.
#[inline(always)]
pub fn lerp<P>(t: Float, p0: P, p1: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    (1.0 - t) * p0 + t * p1
}

/// Double precision version of `lerp`.
///
/// * `t` - Parameter.
/// * `a` - Value at t=0.
/// * `b` - Value at t=1.
#[inline(always)]
pub fn lerp_f64(t: f64, a: f64, b: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Returns `v^5`.
///
/// * `v` - The value.
#[inline(always)]
pub fn pow5<T: Mul<T, Output = T> + Copy>(v: T) -> T {
    (v * v) * (v * v) * v
}

/// Hermite interpolation between 0 and 1 when `x` is in [edge0, edge1].
///
/// * `edge0` - Lower edge.
/// * `edge1` - Upper edge.
/// * `x`     - The value.
#[inline]
pub fn smooth_step(edge0: Float, edge1: Float, x: Float) -> Float {
    let t = super::clamp((x - edge0) / (edge1 - edge0), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Returns -1, 0 or 1 based on the sign of the value.
///
/// * `v` - The value.
#[inline]
pub fn sign(v: Float) -> Float {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(0.0, 1000.0, 20000.0), 1000.0);
        assert_eq!(lerp(1.0, 1000.0, 20000.0), 20000.0);
        assert_eq!(lerp_f64(0.0, 380.0, 720.0), 380.0);
        assert_eq!(lerp_f64(1.0, 380.0, 720.0), 720.0);
    }

    #[test]
    fn pow5_of_negative_keeps_sign() {
        assert!(approx_eq!(f32, pow5(-2.0), -32.0, ulps = 2));
    }

    #[test]
    fn smooth_step_edges() {
        assert_eq!(smooth_step(0.2, 0.8, 0.0), 0.0);
        assert_eq!(smooth_step(0.2, 0.8, 1.0), 1.0);
        assert!(approx_eq!(f32, smooth_step(0.2, 0.8, 0.5), 0.5, epsilon = 1e-6));
    }

    #[test]
    fn sign_values() {
        assert_eq!(sign(3.0), 1.0);
        assert_eq!(sign(-0.1), -1.0);
        assert_eq!(sign(0.0), 0.0);
    }
}
