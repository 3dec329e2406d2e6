//! Noise Textures

use baker_core::bake::Baker;
use baker_core::color::Rgba;
use baker_core::error::BakeError;
use baker_core::rng::RNG;

/// Resolution of the white noise texture.
pub const WHITE_NOISE_RESOLUTION: usize = 128;

/// Sequence used to seed the white noise generator.
const WHITE_NOISE_SEQUENCE: u64 = 0;

/// Returns a white noise sample with uniformly distributed RGB channels and an
/// opaque alpha.
///
/// * `rng` - The random number generator.
pub fn white_noise(rng: &mut RNG) -> Rgba {
    let r = rng.uniform_float();
    let g = rng.uniform_float();
    let b = rng.uniform_float();
    Rgba::new(r, g, b, 1.0)
}

/// Bake a white noise texture to `whiteNoise.png`.
///
/// * `baker` - The bake driver.
pub fn bake_noise(baker: &Baker) -> Result<(), BakeError> {
    let mut rng = RNG::new(WHITE_NOISE_SEQUENCE);
    baker.image_2d("whiteNoise.png", WHITE_NOISE_RESOLUTION, |_x, _y| white_noise(&mut rng))?;
    Ok(())
}
