//! Sample grid evaluation and the bake driver.

use crate::app::create_progress_reporter;
use crate::color::Rgba;
use crate::error::BakeError;
use crate::image_io::{write_image, OutputFormat};
use crate::math::*;
use indicatif::ProgressBar;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// A square grid of floating point RGBA pixels. Pixel `(i, j)` is stored at
/// `i * resolution + j` where `i` is the row.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBuffer {
    /// The pixels.
    pixels: Vec<Rgba>,

    /// Number of pixels along each side.
    resolution: usize,
}

impl ImageBuffer {
    /// Returns the number of pixels along each side.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Returns the raw pixels.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Returns the pixels quantized to 8-bits per channel.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba8()).collect()
    }
}

/// Evaluate a function over a `resolution` x `resolution` grid of normalized
/// coordinates. The outer loop index `i` maps to `x = i / (resolution - 1)`
/// and the inner loop index `j` to `y = j / (resolution - 1)`. The values are
/// not clamped.
///
/// * `func`       - The function to sample.
/// * `resolution` - Number of samples along each axis; at least 2.
pub fn evaluate<F>(func: F, resolution: usize) -> Result<ImageBuffer, BakeError>
where
    F: FnMut(Float, Float) -> Rgba,
{
    evaluate_with_progress(func, resolution, &ProgressBar::hidden())
}

/// Same as `evaluate` but ticks `progress` once per row.
///
/// * `func`       - The function to sample.
/// * `resolution` - Number of samples along each axis; at least 2.
/// * `progress`   - Progress reporter.
pub fn evaluate_with_progress<F>(mut func: F, resolution: usize, progress: &ProgressBar) -> Result<ImageBuffer, BakeError>
where
    F: FnMut(Float, Float) -> Rgba,
{
    if resolution < 2 {
        return Err(BakeError::InvalidResolution(resolution));
    }

    let last = (resolution - 1) as Float;
    let mut pixels = Vec::with_capacity(resolution * resolution);
    for i in 0..resolution {
        let x = i as Float / last;
        for j in 0..resolution {
            let y = j as Float / last;
            pixels.push(func(x, y));
        }
        progress.inc(1);
    }

    Ok(ImageBuffer { pixels, resolution })
}

/// Drives bakes: evaluates tables and writes them to files in an output
/// directory.
pub struct Baker {
    /// Output directory.
    out_dir: PathBuf,

    /// Hide progress bars.
    quiet: bool,
}

impl Baker {
    /// Create a new `Baker`. The output directory is created if it does not
    /// exist.
    ///
    /// * `out_dir` - Output directory.
    /// * `quiet`   - Hide progress bars.
    pub fn new<P: AsRef<Path>>(out_dir: P, quiet: bool) -> Result<Self, BakeError> {
        let out_dir = out_dir.as_ref().to_path_buf();
        fs::create_dir_all(&out_dir)?;
        Ok(Self { out_dir, quiet })
    }

    /// Returns the output path for a file name.
    ///
    /// * `file_name` - The file name.
    pub fn output_path(&self, file_name: &str) -> String {
        self.out_dir.join(file_name).to_string_lossy().into_owned()
    }

    /// Evaluate a function over a grid and write the result to a file in the
    /// output directory. The file extension is checked before evaluation.
    /// Returns the evaluated image so it can be written in other formats.
    ///
    /// * `file_name`  - Output file name; the extension selects the format.
    /// * `resolution` - Number of samples along each axis.
    /// * `func`       - The function to sample.
    pub fn image_2d<F>(&self, file_name: &str, resolution: usize, func: F) -> Result<ImageBuffer, BakeError>
    where
        F: FnMut(Float, Float) -> Rgba,
    {
        let path = self.output_path(file_name);
        OutputFormat::from_path(&path)?;

        info!("Baking 2D image table {path}");
        let progress = create_progress_reporter(resolution as u64, self.quiet);
        progress.set_message(file_name.to_string());

        let image = evaluate_with_progress(func, resolution, &progress)?;
        let nans = image.pixels().iter().filter(|c| c.has_nans()).count();
        if nans > 0 {
            warn!("{path}: {nans} pixels have NaN values");
        }
        write_image(&path, &image)?;

        progress.finish();
        info!("Output to {path} OK");
        Ok(image)
    }

    /// Write an already evaluated image to a file in the output directory.
    ///
    /// * `file_name` - Output file name; the extension selects the format.
    /// * `image`     - The image.
    pub fn save_image(&self, file_name: &str, image: &ImageBuffer) -> Result<(), BakeError> {
        let path = self.output_path(file_name);
        write_image(&path, image)?;
        info!("Output to {path} OK");
        Ok(())
    }

    /// Write comma separated rows to a file in the output directory.
    ///
    /// * `file_name` - Output file name.
    /// * `rows`      - Rows of already formatted fields.
    pub fn write_csv<I>(&self, file_name: &str, rows: I) -> Result<(), BakeError>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let path = self.output_path(file_name);
        info!("Writing {path}");

        let mut file = BufWriter::new(File::create(&path)?);
        for row in rows {
            writeln!(file, "{}", row.join(","))?;
        }
        file.flush()?;
        Ok(())
    }

    /// Write text to a file in the output directory.
    ///
    /// * `file_name` - Output file name.
    /// * `contents`  - The text.
    pub fn write_text(&self, file_name: &str, contents: &str) -> Result<(), BakeError> {
        let path = self.output_path(file_name);
        info!("Writing {path}");
        fs::write(&path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn temp_baker(name: &str) -> Baker {
        Baker::new(std::env::temp_dir().join("baker-core-bake").join(name), true).unwrap()
    }

    #[test]
    fn resolution_below_two_is_rejected() {
        for res in [0, 1] {
            assert!(matches!(
                evaluate(|_, _| Rgba::default(), res),
                Err(BakeError::InvalidResolution(r)) if r == res
            ));
        }
    }

    #[test]
    fn corners_are_evaluated_once_at_exact_coordinates() {
        let mut corners = [0; 4];
        evaluate(
            |x, y| {
                // Index 0: (0, 0), 1: (0, 1), 2: (1, 0), 3: (1, 1).
                let on_edge = |v: Float| v == 0.0 || v == 1.0;
                if on_edge(x) && on_edge(y) {
                    corners[2 * (x as usize) + y as usize] += 1;
                }
                Rgba::default()
            },
            7,
        )
        .unwrap();
        assert_eq!(corners, [1, 1, 1, 1]);
    }

    #[test]
    fn x_follows_rows_and_y_follows_columns() {
        let img = evaluate(|x, y| Rgba::new(x, y, 0.0, 1.0), 3).unwrap();
        assert_eq!(img.pixels()[2 * 3], Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(img.pixels()[2], Rgba::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(img.pixels()[1 * 3 + 2], Rgba::new(0.5, 1.0, 0.0, 1.0));
    }

    #[test]
    fn values_are_not_clamped() {
        let img = evaluate(|_, _| Rgba::new(-1.0, 4.0, 0.5, 1.0), 2).unwrap();
        assert!(img.pixels().iter().all(|c| *c == Rgba::new(-1.0, 4.0, 0.5, 1.0)));
        assert_eq!(&img.to_rgba8()[0..4], &[0, 255, 127, 255]);
    }

    #[test]
    fn unsupported_format_fails_before_evaluation() {
        let baker = temp_baker("unsupported");
        let mut calls = 0;
        let result = baker.image_2d("table.gif", 4, |_, _| {
            calls += 1;
            Rgba::default()
        });
        assert!(matches!(result, Err(BakeError::UnsupportedFormat { .. })));
        assert_eq!(calls, 0);
    }

    #[test]
    fn image_2d_writes_file() {
        let baker = temp_baker("image");
        let img = baker.image_2d("const.png", 8, |_, _| Rgba::new(1.0, 0.5, 0.2, 1.0)).unwrap();
        assert_eq!(img.resolution(), 8);
        assert!(Path::new(&baker.output_path("const.png")).exists());
    }

    #[test]
    fn image_2d_still_writes_nan_pixels() {
        let baker = temp_baker("nan");
        let img = baker
            .image_2d("nan.png", 2, |x, _| Rgba::new(if x > 0.5 { Float::NAN } else { x }, 0.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(img.pixels().iter().filter(|c| c.has_nans()).count(), 2);
        assert!(Path::new(&baker.output_path("nan.png")).exists());
    }

    #[test]
    fn csv_rows_are_joined() {
        let baker = temp_baker("csv");
        baker
            .write_csv("rows.csv", vec![vec!["0".to_string(), "1.5".to_string()], vec!["1".to_string(), "2.5".to_string()]])
            .unwrap();
        let text = fs::read_to_string(baker.output_path("rows.csv")).unwrap();
        assert_eq!(text, "0,1.5\n1,2.5\n");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn evaluates_every_cell_once(res in 2usize..40) {
            let mut calls = 0;
            let img = evaluate(|x, y| {
                calls += 1;
                Rgba::new(x, y, 0.0, 1.0)
            }, res).unwrap();
            prop_assert_eq!(calls, res * res);
            prop_assert_eq!(img.pixels().len(), res * res);
            prop_assert!(img.pixels().iter().all(|c| (0.0..=1.0).contains(&c.r) && (0.0..=1.0).contains(&c.g)));
        }
    }
}
