//! Environment BRDF

use baker_core::bake::Baker;
use baker_core::color::Rgba;
use baker_core::error::BakeError;
use baker_core::geometry::*;
use baker_core::low_discrepancy::HammersleySequence;
use baker_core::math::*;
use baker_core::microfacet::*;

/// Number of importance samples per table entry.
pub const ENV_BRDF_SAMPLE_COUNT: usize = 1024;

/// Resolution of the environment BRDF tables.
pub const ENV_BRDF_RESOLUTION: usize = 256;

/// Smallest `n · v` used by the table so the view vector never lies in the
/// tangent plane.
const MIN_N_DOT_V: Float = 1e-5;

/// Selects what the bias channel accumulates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnvBrdfKind {
    /// Split-sum approximation; bias is weighted by the Fresnel term.
    SplitSum,

    /// Multiscatter variant; bias accumulates the full visibility so it
    /// can be used for energy compensation.
    Multiscatter,
}

/// Integrates the GGX specular BRDF over the hemisphere for a given gloss and
/// view angle. Returns the `(scale, bias)` pair applied to F0.
///
/// * `gloss`    - Surface gloss in [0, 1].
/// * `n_dot_v`  - Cosine between normal and view direction; must be positive.
/// * `kind`     - Which bias term to accumulate.
/// * `sequence` - Hammersley sequence cache.
pub fn integrate_env_brdf(
    gloss: Float,
    n_dot_v: Float,
    kind: EnvBrdfKind,
    sequence: &mut HammersleySequence,
) -> (Float, Float) {
    let alpha2 = gloss_to_alpha2(gloss);
    let v = Vector3f::new((1.0 - n_dot_v * n_dot_v).sqrt(), 0.0, n_dot_v);
    let n = Vector3f::new(0.0, 0.0, 1.0);

    let mut scale = 0.0;
    let mut bias = 0.0;
    for i in 0..ENV_BRDF_SAMPLE_COUNT {
        let xi = sequence.sample_at(i, ENV_BRDF_SAMPLE_COUNT);
        let h = importance_sample_ggx(&xi, alpha2, &n);
        let l = reflect(&v, &h);

        let n_dot_l = saturate(l.z);
        let n_dot_h = saturate(h.z);
        let v_dot_h = saturate(v.dot(&h));

        if n_dot_l > 0.0 {
            let g = smith_ggx(n_dot_l, n_dot_v, alpha2);
            let g_vis = g * v_dot_h / (n_dot_h * n_dot_v);
            let fc = pow5(1.0 - v_dot_h);

            let bias_weight = match kind {
                EnvBrdfKind::SplitSum => fc,
                EnvBrdfKind::Multiscatter => 1.0,
            };

            scale += (1.0 - fc) * g_vis;
            bias += bias_weight * g_vis;
        }
    }

    // Rejected samples still count.
    let n_samples = ENV_BRDF_SAMPLE_COUNT as Float;
    (scale / n_samples, bias / n_samples)
}

/// Grid function for the environment BRDF table. `x` is gloss and `y` is
/// `n · v`.
///
/// * `x`        - Gloss.
/// * `y`        - Cosine between normal and view direction.
/// * `kind`     - Which bias term to accumulate.
/// * `sequence` - Hammersley sequence cache.
pub fn env_brdf_sample(x: Float, y: Float, kind: EnvBrdfKind, sequence: &mut HammersleySequence) -> Rgba {
    let n_dot_v = max(y, MIN_N_DOT_V);
    let (scale, bias) = integrate_env_brdf(x, n_dot_v, kind, sequence);
    Rgba::new(scale, bias, 0.0, 1.0)
}

/// Evaluates an analytic polynomial fit of the split-sum environment BRDF.
/// The result is clamped to [0, 1] and stores bias in red and scale in green.
///
/// * `gloss`   - Surface gloss in [0, 1].
/// * `n_dot_v` - Cosine between normal and view direction.
#[rustfmt::skip]
pub fn eval_env_brdf_fit(gloss: Float, n_dot_v: Float) -> Rgba {
    let x = n_dot_v;
    let y = gloss;

    let y2 = y * y;
    let y3 = y2 * y;
    let y4 = y2 * y2;
    let y5 = y4 * y;

    let p = 109.82183929 * y5 - 291.94656688 * y4 + 262.87670289 * y3 - 88.27433503 * y2 + 11.16956904 * y - 0.87481312;
    let q = -182.32941472 * y5 + 469.90565431 * y4 - 402.67303522 * y3 + 123.83971017 * y2 - 16.59005077 * y + 1.87103872;
    let r = 71.84851046 * y5 - 173.69958023 * y4 + 132.48656983 * y3 - 32.65209286 * y2 + 7.80449807 * y - 1.60302536;
    let z2 = p * x * x + q * x + r;

    let p = -17.85712754 * y5 + 59.72998797 * y4 - 63.78537961 * y3 + 21.95229787 * y2 - 2.50508609 * y - 0.08256607;
    let q = 43.65809225 * y5 - 130.48400716 * y4 + 125.05400347 * y3 - 37.08717555 * y2 + 4.24345391 * y + 0.19560386;
    let r = 32.31212079 * y5 + 86.12066514 * y4 - 71.28450854 * y3 + 15.53854696 * y2 - 1.90410394 * y - 0.15284118;
    let z1 = p * x * x + q * x + r;

    Rgba::new(z1, z2, 0.0, 1.0).saturate()
}

/// Bake the split-sum, multiscatter and fitted environment BRDF tables. The
/// split-sum table is also written unquantized as Radiance HDR and OpenEXR.
///
/// * `baker`    - The bake driver.
/// * `sequence` - Hammersley sequence cache.
pub fn bake_env_brdf(baker: &Baker, sequence: &mut HammersleySequence) -> Result<(), BakeError> {
    let res = ENV_BRDF_RESOLUTION;

    let split_sum = baker.image_2d("env_brdf.png", res, |x, y| {
        env_brdf_sample(x, y, EnvBrdfKind::SplitSum, sequence)
    })?;
    baker.save_image("env_brdf.hdr", &split_sum)?;
    baker.save_image("env_brdf.exr", &split_sum)?;

    baker.image_2d("env_brdf_multiscatter.png", res, |x, y| {
        env_brdf_sample(x, y, EnvBrdfKind::Multiscatter, sequence)
    })?;

    baker.image_2d("env_brdf_fit.png", res, |x, y| eval_env_brdf_fit(y, x))?;

    Ok(())
}
