//! Image I/O

use crate::bake::ImageBuffer;
use crate::error::BakeError;
use image::codecs::hdr::HdrEncoder;
use image::{ImageFormat, Rgb, RgbaImage};
use regex::Regex;
use std::fs::File;
use std::io::BufWriter;
use std::result::Result;
use std::sync::OnceLock;

/// Output image formats selected by file extension.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// 8-bit RGBA PNG.
    Png,

    /// 8-bit RGBA BMP.
    Bmp,

    /// 8-bit RGBA TGA.
    Tga,

    /// Radiance RGBE; alpha is dropped.
    Hdr,

    /// Floating point RGBA OpenEXR.
    Exr,
}

impl OutputFormat {
    /// Returns the output format for a file path based on its extension. The
    /// match is exact so ".PNG" is not accepted.
    ///
    /// * `path` - Output file path.
    pub fn from_path(path: &str) -> Result<Self, BakeError> {
        match get_extension_from_filename(path) {
            Some(".png") => Ok(Self::Png),
            Some(".bmp") => Ok(Self::Bmp),
            Some(".tga") => Ok(Self::Tga),
            Some(".hdr") => Ok(Self::Hdr),
            Some(".exr") => Ok(Self::Exr),
            Some(extension) => Err(BakeError::UnsupportedFormat {
                path: path.to_string(),
                extension: extension.to_string(),
            }),
            None => Err(BakeError::MissingExtension(path.to_string())),
        }
    }
}

/// Write the image to given path. The format is chosen by the extension.
///
/// * `path`  - Output file path.
/// * `image` - The image.
pub fn write_image(path: &str, image: &ImageBuffer) -> Result<(), BakeError> {
    match OutputFormat::from_path(path)? {
        OutputFormat::Png => write_8_bit(path, image, ImageFormat::Png),
        OutputFormat::Bmp => write_8_bit(path, image, ImageFormat::Bmp),
        OutputFormat::Tga => write_8_bit(path, image, ImageFormat::Tga),
        OutputFormat::Hdr => write_hdr(path, image),
        OutputFormat::Exr => write_exr(path, image),
    }
}

/// Returns regular expression for extracting the file extension. This will match the last occurrence of a period
/// followed by no periods or slashes.
fn regex_file_ext() -> &'static Regex {
    static DATA: OnceLock<Regex> = OnceLock::new();
    DATA.get_or_init(|| Regex::new(r"(\.[^./\\]+)$").unwrap())
}

/// Retrieve the extension from a file path.
///
/// * `path` - The file path.
fn get_extension_from_filename(path: &str) -> Option<&str> {
    regex_file_ext()
        .captures(path)
        .and_then(|c| c.get(1).map(|m| m.as_str()))
}

/// Writes the image in an 8-bit image format.
///
/// * `path`         - Output file path.
/// * `image`        - The image.
/// * `image_format` - Image format.
fn write_8_bit(path: &str, image: &ImageBuffer, image_format: ImageFormat) -> Result<(), BakeError> {
    let res = image.resolution() as u32;
    info!("Writing image {path} with resolution {res}x{res}");

    let imgbuf = RgbaImage::from_raw(res, res, image.to_rgba8())
        .ok_or_else(|| BakeError::encode(path, "pixel buffer does not match resolution"))?;

    imgbuf
        .save_with_format(path, image_format)
        .map_err(|err| BakeError::encode(path, err))
}

/// Writes the image in Radiance HDR format.
///
/// * `path`  - Output file path.
/// * `image` - The image.
fn write_hdr(path: &str, image: &ImageBuffer) -> Result<(), BakeError> {
    let res = image.resolution();
    info!("Writing image {path} with resolution {res}x{res}");

    let rgb: Vec<Rgb<f32>> = image.pixels().iter().map(|c| Rgb([c.r, c.g, c.b])).collect();

    let file = BufWriter::new(File::create(path)?);
    HdrEncoder::new(file)
        .encode(&rgb, res, res)
        .map_err(|err| BakeError::encode(path, err))
}

/// Writes the image in OpenEXR format.
///
/// * `path`  - Output file path.
/// * `image` - The image.
fn write_exr(path: &str, image: &ImageBuffer) -> Result<(), BakeError> {
    use exr::prelude::*;

    let res = image.resolution();
    info!("Writing image {path} with resolution {res}x{res}");

    let size = Vec2(res, res);
    let pixels = image.pixels();

    let layer = Layer::new(
        size,
        LayerAttributes::named("bake"),
        Encoding::SMALL_LOSSLESS,
        SpecificChannels::rgba(|pos: Vec2<usize>| {
            let c = pixels[pos.1 * res + pos.0];
            (c.r, c.g, c.b, c.a)
        }),
    );

    let attributes = ImageAttributes::new(IntegerBounds::from_dimensions(size));
    Image::empty(attributes)
        .with_layer(layer)
        .write()
        .to_file(path)
        .map_err(|err| BakeError::encode(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bake::evaluate;
    use crate::color::Rgba;
    use float_cmp::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("baker-core-image-io");
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    fn gradient() -> ImageBuffer {
        evaluate(|x, y| Rgba::new(x, y, 2.0, 1.0), 4).unwrap()
    }

    #[test]
    fn extension_dispatch() {
        assert_eq!(OutputFormat::from_path("output/a.png").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path("a.b/c.bmp").unwrap(), OutputFormat::Bmp);
        assert_eq!(OutputFormat::from_path("c.tga").unwrap(), OutputFormat::Tga);
        assert_eq!(OutputFormat::from_path("c.hdr").unwrap(), OutputFormat::Hdr);
        assert_eq!(OutputFormat::from_path("c.exr").unwrap(), OutputFormat::Exr);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        match OutputFormat::from_path("output/table.jpg") {
            Err(BakeError::UnsupportedFormat { extension, .. }) => assert_eq!(extension, ".jpg"),
            _ => panic!("expected UnsupportedFormat"),
        }
        for path in ["output/table.PNG", "output/table.pfm"] {
            assert!(matches!(
                OutputFormat::from_path(path),
                Err(BakeError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert!(matches!(
            OutputFormat::from_path("output.d/table"),
            Err(BakeError::MissingExtension(_))
        ));
    }

    #[test]
    fn png_round_trip_quantizes() {
        let path = temp_path("gradient.png");
        let path = path.to_str().unwrap();
        let img = gradient();
        write_image(path, &img).unwrap();

        let read = image::open(path).unwrap().into_rgba8();
        assert_eq!(read.width(), 4);
        assert_eq!(read.height(), 4);
        assert_eq!(read.into_raw(), img.to_rgba8());
    }

    #[test]
    fn hdr_keeps_values_above_one() {
        let path = temp_path("gradient.hdr");
        let path = path.to_str().unwrap();
        write_image(path, &gradient()).unwrap();

        let read = image::open(path).unwrap().into_rgb32f();
        assert_eq!(read.width(), 4);
        assert_eq!(read.height(), 4);
        for p in read.pixels() {
            assert!(approx_eq!(f32, p.0[2], 2.0, epsilon = 0.02), "blue = {}", p.0[2]);
        }
        assert!(approx_eq!(f32, read.get_pixel(0, 0).0[0], 0.0, epsilon = 0.02));
        assert!(approx_eq!(f32, read.get_pixel(0, 3).0[0], 1.0, epsilon = 0.02));
    }

    #[test]
    fn exr_is_written() {
        let path = temp_path("gradient.exr");
        write_image(path.to_str().unwrap(), &gradient()).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
