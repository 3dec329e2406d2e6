//! Low Discrepancy Sequences

use crate::geometry::*;
use crate::math::*;

/// Returns the base-2 radical inverse (van der Corput sequence) of `a` by
/// mirroring its bits about the binary point.
///
/// * `a` - The value.
#[inline]
pub fn radical_inverse_base2(a: u32) -> Float {
    let v = a.reverse_bits() as f64 * hexf64!("0x1.0p-32");
    min(v as Float, ONE_MINUS_EPSILON)
}

/// Memoized 2-D Hammersley point set.
///
/// The points are generated once for a given length and reused until a
/// different length is requested. Not meant to be shared between threads.
#[derive(Clone, Default)]
pub struct HammersleySequence {
    /// The cached points.
    points: Vec<Point2f>,
}

impl HammersleySequence {
    /// Returns the point at `index % length` from the sequence of the given
    /// length, regenerating the cache if the length differs from the last
    /// request.
    ///
    /// * `index`  - The sample index.
    /// * `length` - Number of points in the sequence; must be non-zero.
    pub fn sample_at(&mut self, index: usize, length: usize) -> Point2f {
        assert!(length > 0, "Hammersley sequence length must be non-zero");
        if self.points.len() != length {
            self.generate(length);
        }
        self.points[index % length]
    }

    /// Recompute the points.
    ///
    /// * `length` - Number of points.
    fn generate(&mut self, length: usize) {
        debug!("Generating Hammersley sequence of length {length}");

        let inv_length = 1.0 / length as f64;
        self.points = (0..length)
            .map(|i| Point2f::new(radical_inverse_base2(i as u32), (i as f64 * inv_length) as Float))
            .collect();
    }
}
