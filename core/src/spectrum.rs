//! Spectral helpers

use crate::math::*;

/// Returns the emitted spectral radiance of a blackbody at the given
/// wavelength and temperature. Constants are pre-scaled so wavelengths are in
/// nanometres and the result is in a display friendly range.
///
/// * `lambda` - Wavelength in nanometres.
/// * `t`      - Temperature in Kelvin.
pub fn planck(lambda: f64, t: f64) -> f64 {
    const H: f64 = 6.626070040e-16;
    const KB: f64 = 1.38064852e-5;
    const C: f64 = 299792458.0e9;

    const O0: f64 = 2e-3 * H * (C * C);
    const O1: f64 = H * C / KB * 1.442695;

    let lambda5 = (lambda * lambda) * (lambda * lambda) * lambda;
    O0 / (lambda5 * ((O1 / (lambda * t)).exp2() - 1.0))
}

/// Returns the CIE 1964 10° XYZ colour matching functions at the given
/// wavelength using the multi-lobe analytic fit by Wyman, Sloan and Shirley.
///
/// * `lambda` - Wavelength in nanometres.
pub fn cie_xyz_10(lambda: f64) -> [f64; 3] {
    let sq = |v: f64| v * v;

    let x = 0.4 * (-866.433976 * sq((lambda * 0.000986 + 0.56213).log2())).exp2()
        + 1.13 * (-162.19644 * sq((lambda * -0.001345 + 1.799597).log2())).exp2();
    let y = 1.011 * (-1.442695 * sq(lambda * 0.015325 - 8.522368)).exp2();
    let z = 2.06 * (-22.18071 * sq((lambda * 0.005543 - 1.474501).log2())).exp2();

    [x, y, z]
}

/// Converts the given XYZ coefficients to linear sRGB coefficients.
///
/// * `xyz` - The XYZ coefficients.
#[rustfmt::skip]
pub fn xyz_to_rgb(xyz: &[Float; 3]) -> [Float; 3] {
    [
         3.2406 * xyz[0] - 1.5372 * xyz[1] - 0.4986 * xyz[2],
        -0.9689 * xyz[0] + 1.8758 * xyz[1] + 0.0415 * xyz[2],
         0.0557 * xyz[0] - 0.2040 * xyz[1] + 1.0570 * xyz[2],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn planck_is_positive_in_visible_range() {
        for lambda in [380.0, 450.0, 550.0, 650.0, 720.0] {
            assert!(planck(lambda, 5000.0) > 0.0);
        }
    }

    #[test]
    fn planck_increases_with_temperature() {
        assert!(planck(550.0, 6000.0) > planck(550.0, 5000.0));
        assert!(planck(550.0, 20000.0) > planck(550.0, 1000.0));
    }

    #[test]
    fn planck_peak_follows_wien() {
        // Wien's displacement law puts the 5000K peak near 580nm.
        let peak = (380..=720)
            .map(|l| l as f64)
            .max_by(|a, b| planck(*a, 5000.0).total_cmp(&planck(*b, 5000.0)))
            .unwrap();
        assert!((peak - 579.5).abs() < 5.0);
    }

    #[test]
    fn cie_y_peaks_near_555nm() {
        let [_, y, _] = cie_xyz_10(556.0);
        assert!(approx_eq!(f64, y, 1.011, epsilon = 0.01));
        assert!(cie_xyz_10(450.0)[1] < y);
        assert!(cie_xyz_10(650.0)[1] < y);
    }

    #[test]
    fn xyz_white_is_near_grey() {
        // D65 white point.
        let rgb = xyz_to_rgb(&[0.95047, 1.0, 1.08883]);
        for c in rgb {
            assert!(approx_eq!(f32, c, 1.0, epsilon = 0.01));
        }
    }
}
