//! GGX Microfacet Distribution

use crate::geometry::*;
use crate::math::*;

/// Maps a gloss value in [0, 1] to the squared GGX roughness α². Gloss 0 is
/// fully rough (α² = 1) and gloss 1 is near-mirror (α² ≈ 2^-18).
///
/// * `gloss` - The gloss value.
#[inline]
pub fn gloss_to_alpha2(gloss: Float) -> Float {
    2.0 / (1.0 + Float::powf(2.0, 18.0 * gloss))
}

/// Returns a half-vector sampled from the GGX distribution of normals around
/// `n`.
///
/// * `xi`     - The 2D sample in [0, 1)^2.
/// * `alpha2` - Squared roughness α².
/// * `n`      - The surface normal.
pub fn importance_sample_ggx(xi: &Point2f, alpha2: Float, n: &Vector3f) -> Vector3f {
    let phi = TWO_PI * xi.x;
    let cos_theta = ((1.0 - xi.y) / (1.0 + (alpha2 - 1.0) * xi.y)).sqrt();
    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    let h = Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);

    // Tangent frame around `n`.
    let up = if abs(n.z) < 0.999 {
        Vector3f::new(0.0, 0.0, 1.0)
    } else {
        Vector3f::new(1.0, 0.0, 0.0)
    };
    let tangent_x = up.cross(n).normalize();
    let tangent_y = n.cross(&tangent_x);

    tangent_x * h.x + tangent_y * h.y + *n * h.z
}

/// Returns the height-correlated Smith masking-shadowing term for GGX.
///
/// * `n_dot_l` - Cosine of the angle between normal and light direction.
/// * `n_dot_v` - Cosine of the angle between normal and view direction.
/// * `alpha2`  - Squared roughness α².
#[inline]
pub fn smith_ggx(n_dot_l: Float, n_dot_v: Float, alpha2: Float) -> Float {
    let denom_a = n_dot_v * (alpha2 + (1.0 - alpha2) * n_dot_l * n_dot_l).sqrt();
    let denom_b = n_dot_l * (alpha2 + (1.0 - alpha2) * n_dot_v * n_dot_v).sqrt();
    2.0 * n_dot_l * n_dot_v / (denom_a + denom_b)
}

/// Reflect `v` about `h`.
///
/// * `v` - The direction to reflect.
/// * `h` - The half-vector.
#[inline]
pub fn reflect(v: &Vector3f, h: &Vector3f) -> Vector3f {
    *h * (2.0 * v.dot(h)) - *v
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn gloss_to_alpha2_endpoints() {
        assert_eq!(gloss_to_alpha2(0.0), 1.0);
        assert!(approx_eq!(
            f32,
            gloss_to_alpha2(1.0),
            2.0 / (1.0 + 262144.0),
            ulps = 4
        ));
    }

    #[test]
    fn sample_at_origin_is_normal() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let h = importance_sample_ggx(&Point2f::new(0.0, 0.0), 0.5, &n);
        assert!(approx_eq!(f32, h.z, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, h.length(), 1.0, epsilon = 1e-6));
    }

    #[test]
    fn smith_at_normal_incidence_is_one() {
        assert!(approx_eq!(f32, smith_ggx(1.0, 1.0, 0.3), 1.0, epsilon = 1e-6));
    }

    #[test]
    fn reflect_about_normal() {
        let v = Vector3f::new(0.6, 0.0, 0.8);
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let l = reflect(&v, &n);
        assert!(approx_eq!(f32, l.x, -0.6, epsilon = 1e-6));
        assert!(approx_eq!(f32, l.z, 0.8, epsilon = 1e-6));
    }

    proptest! {
        #[test]
        fn gloss_to_alpha2_is_decreasing(g in 0.0f32..0.99f32) {
            prop_assert!(gloss_to_alpha2(g) > gloss_to_alpha2(g + 0.01));
        }

        #[test]
        fn samples_are_unit_and_upper_hemisphere(
            u in 0.0f32..1.0f32,
            v in 0.0f32..1.0f32,
            gloss in 0.0f32..1.0f32,
        ) {
            let n = Vector3f::new(0.0, 0.0, 1.0);
            let h = importance_sample_ggx(&Point2f::new(u, v), gloss_to_alpha2(gloss), &n);
            prop_assert!(approx_eq!(f32, h.length(), 1.0, epsilon = 1e-4));
            prop_assert!(h.z >= 0.0);
        }

        #[test]
        fn smith_is_in_unit_interval(
            nl in 0.01f32..1.0f32,
            nv in 0.01f32..1.0f32,
            a2 in 0.0001f32..1.0f32,
        ) {
            let g = smith_ggx(nl, nv, a2);
            prop_assert!(g > 0.0 && g <= 1.0 + 1e-5);
        }
    }
}
