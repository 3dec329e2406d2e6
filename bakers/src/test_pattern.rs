//! Test Pattern

use baker_core::bake::Baker;
use baker_core::color::Rgba;
use baker_core::error::BakeError;
use baker_core::math::*;

/// Resolution of the test pattern.
pub const TEST_PATTERN_RESOLUTION: usize = 64;

/// Returns the constant test pattern colour regardless of coordinates.
pub fn test_pattern(_x: Float, _y: Float) -> Rgba {
    Rgba::new(1.0, 0.5, 0.2, 1.0)
}

/// Bake the test pattern to `test_output.png`.
///
/// * `baker` - The bake driver.
pub fn bake_test_pattern(baker: &Baker) -> Result<(), BakeError> {
    baker.image_2d("test_output.png", TEST_PATTERN_RESOLUTION, test_pattern)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_quantizes_to_known_bytes() {
        let baker = Baker::new(std::env::temp_dir().join("bakers-test-pattern"), true).unwrap();
        let img = baker
            .image_2d("test_output.png", TEST_PATTERN_RESOLUTION, test_pattern)
            .unwrap();
        assert_eq!(img.pixels().len(), 64 * 64);
        assert!(img.pixels().iter().all(|c| c.to_rgba8() == [255, 127, 51, 255]));
    }
}
