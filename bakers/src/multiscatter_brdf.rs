//! Multiscatter Diffuse BRDF

use baker_core::bake::Baker;
use baker_core::color::Rgba;
use baker_core::error::BakeError;
use baker_core::math::*;

/// Resolution of the diffuse BRDF term tables.
pub const MULTISCATTER_BRDF_RESOLUTION: usize = 128;

/// Gloss used when baking the retro-reflective bump table.
pub const RETRO_REFLECTIVE_GLOSS: Float = 0.0;

/// Rough foundation term `Fd0`.
///
/// * `l_dot_h` - Cosine between light direction and half-vector.
pub fn rough_foundation(l_dot_h: Float) -> Float {
    l_dot_h + pow5(1.0 - l_dot_h)
}

/// Disney Schlick style diffuse falloff.
///
/// * `v` - Cosine term.
#[inline]
fn disney_schlick(v: Float) -> Float {
    1.0 - 0.75 * pow5(1.0 - v)
}

/// Disney diffuse rough term `Fd1`.
///
/// * `n_dot_l` - Cosine between normal and light direction.
/// * `n_dot_v` - Cosine between normal and view direction.
pub fn disney_diffuse_rough(n_dot_l: Float, n_dot_v: Float) -> Float {
    disney_schlick(n_dot_l) * disney_schlick(n_dot_v)
}

/// Retro-reflective bump term `FdR`.
///
/// * `l_dot_h` - Cosine between light direction and half-vector.
/// * `n_dot_h` - Cosine between normal and half-vector.
/// * `gloss`   - Surface gloss.
pub fn retro_reflective_bump(l_dot_h: Float, n_dot_h: Float, gloss: Float) -> Float {
    let amplitude = 34.5 * gloss * gloss - 59.0 * gloss + 24.5;
    let falloff = max(73.2 * gloss - 21.2, 8.9);
    amplitude * l_dot_h * Float::powf(2.0, -falloff * n_dot_h.sqrt())
}

/// Bake the `Fd0`, `Fd1` and `FdR` tables.
///
/// * `baker` - The bake driver.
pub fn bake_multiscatter_brdf(baker: &Baker) -> Result<(), BakeError> {
    let res = MULTISCATTER_BRDF_RESOLUTION;

    baker.image_2d("brdf_Fd0.png", res, |x, _y| Rgba::grey(rough_foundation(x)))?;
    baker.image_2d("brdf_Fd1.png", res, |x, y| Rgba::grey(disney_diffuse_rough(x, y)))?;
    baker.image_2d("brdf_FdR.png", res, |x, y| {
        Rgba::grey(retro_reflective_bump(x, y, RETRO_REFLECTIVE_GLOSS))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn rough_foundation_end_points() {
        assert!(approx_eq!(Float, rough_foundation(0.0), 1.0));
        assert!(approx_eq!(Float, rough_foundation(1.0), 1.0));
        assert!(rough_foundation(0.5) < 1.0);
    }

    #[test]
    fn disney_diffuse_rough_end_points() {
        assert!(approx_eq!(Float, disney_diffuse_rough(1.0, 1.0), 1.0));
        assert!(approx_eq!(Float, disney_diffuse_rough(0.0, 0.0), 0.0625));
    }

    #[test]
    fn retro_reflective_bump_at_zero_gloss() {
        assert!(approx_eq!(Float, retro_reflective_bump(1.0, 0.0, 0.0), 24.5));
        assert!(approx_eq!(Float, retro_reflective_bump(0.0, 0.5, 0.0), 0.0));
        assert!(approx_eq!(
            Float,
            retro_reflective_bump(1.0, 1.0, 0.0),
            24.5 * Float::powf(2.0, -8.9),
            epsilon = 1e-6
        ));
    }

    proptest! {
        #[test]
        fn disney_diffuse_rough_is_symmetric(a in 0.0..=1.0f32, b in 0.0..=1.0f32) {
            prop_assert_eq!(disney_diffuse_rough(a, b), disney_diffuse_rough(b, a));
        }

        #[test]
        fn disney_diffuse_rough_is_in_range(a in 0.0..=1.0f32, b in 0.0..=1.0f32) {
            let v = disney_diffuse_rough(a, b);
            prop_assert!((0.0625 - 1e-6..=1.0 + 1e-6).contains(&v));
        }
    }
}
