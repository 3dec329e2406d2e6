//! Blackbody Colours

use baker_core::bake::Baker;
use baker_core::color::Rgba;
use baker_core::error::BakeError;
use baker_core::math::*;
use baker_core::spectrum::*;
use ordered_float::OrderedFloat;
use std::collections::HashMap;

/// Number of wavelengths sampled when integrating a blackbody spectrum.
pub const BLACKBODY_SAMPLE_COUNT: usize = 10000;

/// Shortest sampled wavelength in nanometres.
pub const BLACKBODY_LAMBDA_MIN: f64 = 380.0;

/// Longest sampled wavelength in nanometres.
pub const BLACKBODY_LAMBDA_MAX: f64 = 720.0;

/// Coldest temperature in the blackbody table.
pub const BLACKBODY_TEMPERATURE_MIN: Float = 1000.0;

/// Hottest temperature in the blackbody table.
pub const BLACKBODY_TEMPERATURE_MAX: Float = 20000.0;

/// Resolution of the blackbody colour table.
pub const BLACKBODY_RESOLUTION: usize = 256;

/// Number of temperatures written to the sRGB curve CSV.
pub const BLACKBODY_CURVE_SAMPLES: usize = 1024;

/// Temperature of the sampled Planck curve.
const PLANCK_CURVE_TEMPERATURE: f64 = 5000.0;

/// Returns the `i`-th sampled wavelength in nanometres.
///
/// * `i` - Sample index in `[0, BLACKBODY_SAMPLE_COUNT)`.
#[inline]
fn sample_wavelength(i: usize) -> f64 {
    let t = i as f64 / (BLACKBODY_SAMPLE_COUNT - 1) as f64;
    lerp_f64(t, BLACKBODY_LAMBDA_MIN, BLACKBODY_LAMBDA_MAX)
}

/// Integrates blackbody emission to linear sRGB and memoizes the results by
/// temperature.
#[derive(Clone, Default)]
pub struct BlackbodyIntegrator {
    /// Colours keyed by the exact temperature value.
    cache: HashMap<OrderedFloat<Float>, Rgba>,

    /// Number of spectral integrations performed.
    integrations: usize,
}

impl BlackbodyIntegrator {
    /// Create a new `BlackbodyIntegrator` with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of spectral integrations performed so far. Cache
    /// hits do not count.
    pub fn integrations(&self) -> usize {
        self.integrations
    }

    /// Returns the unclamped linear sRGB colour of a blackbody at the given
    /// temperature with alpha 1.
    ///
    /// * `kelvin` - Temperature in Kelvin.
    pub fn color_for_temperature(&mut self, kelvin: Float) -> Rgba {
        let key = OrderedFloat(kelvin);
        if let Some(c) = self.cache.get(&key) {
            return *c;
        }

        let c = self.integrate(kelvin);
        self.integrations += 1;
        self.cache.insert(key, c);
        c
    }

    /// Integrate Planck's law weighted by the colour matching functions over
    /// the visible range.
    ///
    /// * `kelvin` - Temperature in Kelvin.
    fn integrate(&self, kelvin: Float) -> Rgba {
        let t = kelvin as f64;

        let mut xyz = [0.0_f64; 3];
        for i in 0..BLACKBODY_SAMPLE_COUNT {
            let lambda = sample_wavelength(i);
            let radiance = planck(lambda, t);
            let cmf = cie_xyz_10(lambda);
            for (acc, w) in xyz.iter_mut().zip(cmf) {
                *acc += w * radiance;
            }
        }

        let n = BLACKBODY_SAMPLE_COUNT as f64;
        let xyz = xyz.map(|v| (v / n) as Float);
        let c = Rgba::opaque(xyz_to_rgb(&xyz));

        debug!(
            "temperature {kelvin:.0}K RGB = {:.6} {:.6} {:.6} XYZ = {:.6} {:.6} {:.6}",
            c.r, c.g, c.b, xyz[0], xyz[1], xyz[2]
        );

        c
    }
}

/// Reinhard tonemap followed by a 1/2.2 gamma applied to RGB. Negative
/// channels become zero; alpha is unchanged.
///
/// * `c` - Linear colour.
pub fn tonemap_unclamped(c: &Rgba) -> Rgba {
    c.map_rgb(|v| {
        let v = max(0.0, v);
        (v / (1.0 + v)).powf(1.0 / 2.2)
    })
}

/// Same as `tonemap_unclamped` with all four channels clamped to [0, 1].
///
/// * `c` - Linear colour.
pub fn tonemap(c: &Rgba) -> Rgba {
    tonemap_unclamped(c).saturate()
}

/// Maps a normalized coordinate to a temperature in the table range.
///
/// * `y` - Normalized coordinate in [0, 1].
pub fn temperature_for(y: Float) -> Float {
    lerp(y, BLACKBODY_TEMPERATURE_MIN, BLACKBODY_TEMPERATURE_MAX)
}

/// Grid function for the blackbody table; `y` selects the temperature.
///
/// * `y`          - Normalized temperature coordinate.
/// * `integrator` - Blackbody integrator and cache.
pub fn blackbody_sample(y: Float, integrator: &mut BlackbodyIntegrator) -> Rgba {
    tonemap(&integrator.color_for_temperature(temperature_for(y)))
}

/// Sixth degree polynomial fit of the integrated blackbody colour in a fifth
/// root encoded sRGB-D60 space.
///
/// * `kelvin` - Temperature in Kelvin; clamped to the table range.
#[rustfmt::skip]
pub fn fit_srgb_polynomial(kelvin: Float) -> [Float; 3] {
    let x = clamp((kelvin - 1000.0) / 19000.0, 0.0, 1.0);
    let x2 = x * x;
    let x3 = x2 * x;
    let x4 = x2 * x2;
    let x5 = x3 * x2;
    let x6 = x3 * x3;

    [
        -0.029972778695974256 + 7.669083294646621 * x +  2.214401294577103 * x2 - 49.42474372087125  * x3 + 103.53915061107702 * x4 - 89.5574774811751   * x5 + 28.588440157789307 * x6,
        -0.0374521902577345   + 5.613905742381423 * x + 16.608160380839113 * x2 - 88.52816707661721  * x3 + 157.8362751079448  * x4 - 127.4927963970656  * x5 + 39.14505232781722  * x6,
        -0.21282402472640047  + 5.342342069940462 * x + 23.583032531526992 * x2 - 106.91106640514953 * x3 + 181.48860203094765 * x4 - 143.00625735899658 * x5 + 43.27750211769455  * x6,
    ]
}

/// Returns the fitted linear blackbody colour.
///
/// * `kelvin` - Temperature in Kelvin; clamped to the table range.
pub fn fit_srgb(kelvin: Float) -> [Float; 3] {
    fit_srgb_polynomial(kelvin).map(pow5)
}

/// Returns `sign(v) * |v|^0.2`.
#[inline]
fn signed_fifth_root(v: Float) -> Float {
    sign(v) * abs(v).powf(0.2)
}

/// Bake the Planck curve, the sRGB curve with its polynomial fit and the
/// tonemapped blackbody colour table.
///
/// * `baker`      - The bake driver.
/// * `integrator` - Blackbody integrator and cache.
pub fn bake_blackbody(baker: &Baker, integrator: &mut BlackbodyIntegrator) -> Result<(), BakeError> {
    info!("Baking Planck curve at {PLANCK_CURVE_TEMPERATURE}K");
    let planck_rows = (0..BLACKBODY_SAMPLE_COUNT).map(|i| {
        let intensity = planck(sample_wavelength(i), PLANCK_CURVE_TEMPERATURE) as Float;
        vec![i.to_string(), format!("{intensity:.6}")]
    });
    baker.write_csv("planck_5k.csv", planck_rows)?;

    info!("Baking blackbody sRGB curve");
    let mut srgb_rows = Vec::with_capacity(BLACKBODY_CURVE_SAMPLES);
    for i in 0..BLACKBODY_CURVE_SAMPLES {
        let y = i as Float / (BLACKBODY_CURVE_SAMPLES - 1) as Float;
        let kelvin = temperature_for(y);

        let c = integrator.color_for_temperature(kelvin).rgb().map(signed_fifth_root);
        let fit = fit_srgb(kelvin);

        let mut row = vec![format!("{y:.6}")];
        row.extend(c.iter().chain(fit.iter()).map(|v| format!("{v:.6}")));
        srgb_rows.push(row);
    }
    baker.write_csv("planck_srgb.csv", srgb_rows)?;

    baker.image_2d("planck_blackbody.png", BLACKBODY_RESOLUTION, |_x, y| {
        blackbody_sample(y, integrator)
    })?;

    info!("Blackbody integrations performed: {}", integrator.integrations());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn cached_temperature_is_integrated_once() {
        let mut integrator = BlackbodyIntegrator::new();
        let a = integrator.color_for_temperature(5000.0);
        let b = integrator.color_for_temperature(5000.0);
        assert_eq!(integrator.integrations(), 1);
        assert_eq!(a.r.to_bits(), b.r.to_bits());
        assert_eq!(a.g.to_bits(), b.g.to_bits());
        assert_eq!(a.b.to_bits(), b.b.to_bits());
        assert_eq!(a.a, 1.0);

        integrator.color_for_temperature(6500.0);
        assert_eq!(integrator.integrations(), 2);
    }

    #[test]
    fn hot_is_bluer_than_cold() {
        let mut integrator = BlackbodyIntegrator::new();
        let cold = tonemap(&integrator.color_for_temperature(1000.0));
        let hot = tonemap(&integrator.color_for_temperature(20000.0));
        assert!(cold.r > cold.b);
        assert!(hot.b > hot.r);
    }

    #[test]
    fn tonemap_black_stays_black() {
        assert_eq!(tonemap(&Rgba::new(0.0, 0.0, 0.0, 1.0)), Rgba::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn tonemap_clamps_negative_channels() {
        let c = tonemap_unclamped(&Rgba::new(-2.0, 1.0, 0.0, 0.5));
        assert_eq!(c.r, 0.0);
        assert!(approx_eq!(Float, c.g, Float::powf(0.5, 1.0 / 2.2)));
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn temperature_range() {
        assert_eq!(temperature_for(0.0), 1000.0);
        assert_eq!(temperature_for(1.0), 20000.0);
    }

    #[test]
    fn fit_at_coldest_temperature_is_constant_term() {
        let p = fit_srgb_polynomial(1000.0);
        assert_eq!(p, [-0.029972778695974256, -0.0374521902577345, -0.21282402472640047]);
        assert_eq!(fit_srgb_polynomial(500.0), p);
        assert!(approx_eq!(Float, fit_srgb(1000.0)[0], pow5(p[0])));
    }

    #[test]
    fn signed_fifth_root_keeps_sign() {
        assert!(approx_eq!(Float, signed_fifth_root(32.0), 2.0, epsilon = 1e-5));
        assert!(approx_eq!(Float, signed_fifth_root(-32.0), -2.0, epsilon = 1e-5));
        assert_eq!(signed_fifth_root(0.0), 0.0);
    }

    proptest! {
        #[test]
        fn tonemap_is_in_unit_range(r in -10.0..100.0f32, g in -10.0..100.0f32, b in -10.0..100.0f32, a in -1.0..2.0f32) {
            let c = tonemap(&Rgba::new(r, g, b, a));
            for v in [c.r, c.g, c.b, c.a] {
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
