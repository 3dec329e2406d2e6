//! Pre-integrated Subsurface Scattering

use baker_core::bake::Baker;
use baker_core::color::Rgba;
use baker_core::error::BakeError;
use baker_core::math::*;

/// Number of angular samples integrated per table entry.
pub const SUBSURFACE_SAMPLE_COUNT: usize = 2048;

/// Resolution of the curvature tables.
pub const SUBSURFACE_RESOLUTION: usize = 256;

/// Sum-of-Gaussians fit to the dipole diffusion profile of skin. Each entry
/// is the RGB weight followed by the variance.
#[rustfmt::skip]
const SKIN_GAUSSIAN_FIT: [[Float; 4]; 6] = [
    [0.233, 0.455, 0.649, 0.0064],
    [0.100, 0.336, 0.344, 0.0484],
    [0.118, 0.198, 0.0,   0.187],
    [0.113, 0.007, 0.007, 0.567],
    [0.358, 0.004, 0.0,   1.99],
    [0.078, 0.0,   0.0,   7.41],
];

/// Normalized Gaussian.
///
/// * `x`     - Distance from the centre.
/// * `sigma` - Standard deviation.
pub fn gaussian(x: Float, sigma: Float) -> Float {
    let s = 2.0 * sigma * sigma;
    (-(x * x) / s).exp() / (TWO_PI * s).sqrt()
}

/// Scattering profiles used to blur irradiance around a curved surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScatterKernel {
    /// Single Gaussian with the width as standard deviation.
    Gaussian,

    /// Smoothstep falloff reaching zero at 80% of the width.
    Smoothstep,

    /// Penner's skin profile as a sum of six Gaussians.
    Penner,
}

impl ScatterKernel {
    /// All kernels with the file name of their table.
    pub const TABLES: [(ScatterKernel, &'static str); 3] = [
        (Self::Gaussian, "subsurface_gaussian.png"),
        (Self::Smoothstep, "subsurface_smoothstep.png"),
        (Self::Penner, "subsurface_penner.png"),
    ];

    /// Returns the per-channel kernel weight.
    ///
    /// * `dist`  - Distance between the two cosines.
    /// * `width` - Kernel width.
    pub fn weight(&self, dist: Float, width: Float) -> [Float; 3] {
        match self {
            Self::Gaussian => [gaussian(dist, width); 3],
            Self::Smoothstep => [1.0 - smooth_step(0.2, 0.8, dist / width); 3],
            Self::Penner => SKIN_GAUSSIAN_FIT.iter().fold([0.0; 3], |mut acc, g| {
                let w = gaussian(dist, width * g[3]);
                for c in 0..3 {
                    acc[c] += w * g[c];
                }
                acc
            }),
        }
    }
}

/// Convolves the clamped cosine falloff with the kernel around the given
/// light angle. Returns the weighted sum and the normalizer per channel.
///
/// * `x`      - Light angle as a fraction of π.
/// * `y`      - Curvature; maps to kernel width `0.001 + 0.5y`.
/// * `kernel` - Scattering kernel.
fn integrate_curvature(x: Float, y: Float, kernel: ScatterKernel) -> ([Float; 3], [Float; 3]) {
    let n_dot_l = (x * PI).cos();
    let width = 0.001 + y * 0.5;

    let mut sum = [0.0; 3];
    let mut norm = [0.0; 3];
    for i in 0..SUBSURFACE_SAMPLE_COUNT {
        let theta = i as Float / (SUBSURFACE_SAMPLE_COUNT - 1) as Float * PI;
        let n_dot_l2 = theta.cos();

        let dist = abs(n_dot_l2 - n_dot_l);
        let weight = kernel.weight(dist, width);
        for c in 0..3 {
            sum[c] += weight[c] * saturate(n_dot_l2);
            norm[c] += weight[c];
        }
    }

    (sum, norm)
}

/// Normalizes and gamma encodes the integrated channels. A channel with a
/// zero normalizer is 0.
///
/// * `sum`  - Weighted sums.
/// * `norm` - Normalizers.
fn resolve(sum: &[Float; 3], norm: &[Float; 3]) -> Rgba {
    let mut rgb = [0.0; 3];
    for c in 0..3 {
        if norm[c] > 0.0 {
            rgb[c] = (sum[c] / norm[c]).powf(1.0 / 2.2);
        }
    }
    Rgba::opaque(rgb)
}

/// Grid function for a curvature table.
///
/// * `x`      - Light angle as a fraction of π.
/// * `y`      - Curvature.
/// * `kernel` - Scattering kernel.
pub fn bake_curvature_table(x: Float, y: Float, kernel: ScatterKernel) -> Rgba {
    let (sum, norm) = integrate_curvature(x, y, kernel);
    resolve(&sum, &norm)
}

/// Bake a curvature table for each kernel.
///
/// * `baker` - The bake driver.
pub fn bake_subsurface(baker: &Baker) -> Result<(), BakeError> {
    for (kernel, file_name) in ScatterKernel::TABLES {
        let mut underflows = 0;
        baker.image_2d(file_name, SUBSURFACE_RESOLUTION, |x, y| {
            let (sum, norm) = integrate_curvature(x, y, kernel);
            underflows += norm.iter().filter(|v| **v <= 0.0).count();
            resolve(&sum, &norm)
        })?;

        if underflows > 0 {
            warn!("{file_name}: {underflows} channels had a zero kernel normalizer and were set to 0");
        }
    }
    Ok(())
}
