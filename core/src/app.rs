//! Application related stuff

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;

/// Bake operations that can be selected from the command line. They run in
/// the order they are declared.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BakeOperation {
    /// Constant colour test pattern.
    TestPattern,

    /// Multiscatter diffuse BRDF terms.
    MultiscatterBrdf,

    /// GGX environment BRDF tables.
    EnvBrdf,

    /// White noise texture.
    Noise,

    /// Blackbody colour tables and curves.
    Blackbody,

    /// Gloss to average normal length table and gloss combination table.
    GlossNormal,

    /// Pre-integrated subsurface scattering curvature tables.
    Subsurface,
}

impl BakeOperation {
    /// All operations in execution order.
    pub const ALL: [BakeOperation; 7] = [
        Self::TestPattern,
        Self::MultiscatterBrdf,
        Self::EnvBrdf,
        Self::Noise,
        Self::Blackbody,
        Self::GlossNormal,
        Self::Subsurface,
    ];
}

impl fmt::Display for BakeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TestPattern => "test pattern",
            Self::MultiscatterBrdf => "multiscatter BRDF",
            Self::EnvBrdf => "environment BRDF",
            Self::Noise => "noise",
            Self::Blackbody => "blackbody",
            Self::GlossNormal => "gloss/normal",
            Self::Subsurface => "subsurface",
        };
        write!(f, "{name}")
    }
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(name = "pbr-baker", author, version, about = "Bakes PBR lookup tables.", long_about = None)]
pub struct Options {
    /// Bake the multiscatter diffuse BRDF terms.
    #[arg(long = "multiscatter", help = "Bake multiscatter diffuse BRDF terms.")]
    pub multiscatter_brdf: bool,

    /// Bake the GGX environment BRDF tables.
    #[arg(long = "envbrdf", help = "Bake GGX environment BRDF tables.")]
    pub env_brdf: bool,

    /// Bake the white noise texture.
    #[arg(long, help = "Bake a white noise texture.")]
    pub noise: bool,

    /// Bake blackbody colours.
    #[arg(long, help = "Bake blackbody colour table and curves.")]
    pub blackbody: bool,

    /// Bake gloss to normal length tables.
    #[arg(long = "glossnormal", help = "Bake gloss to average normal length and gloss combine tables.")]
    pub gloss_normal: bool,

    /// Bake subsurface curvature tables.
    #[arg(long, help = "Bake pre-integrated subsurface scattering tables.")]
    pub subsurface: bool,

    /// Bake the test pattern.
    #[arg(long, help = "Bake a constant colour test pattern.")]
    pub test: bool,

    /// Bake everything.
    #[arg(long, help = "Run all bake operations.")]
    pub all: bool,

    /// Output directory.
    #[arg(
        long = "outdir",
        short = 'o',
        value_name = "DIR",
        default_value = "output",
        help = "Write baked files to the given directory."
    )]
    pub out_dir: String,

    /// Suppress progress bars.
    #[arg(long, help = "Suppress progress bars.")]
    pub quiet: bool,
}

impl Options {
    /// Parses the command line. Returns `None` when no operation is selected
    /// or an unknown flag is given; the caller prints usage in that case.
    /// Help, version and malformed values are returned as errors for clap
    /// to report.
    ///
    /// * `args` - Command line arguments including the program name.
    pub fn parse_selection<I, T>(args: I) -> Result<Option<Self>, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(options) if options.operations().is_empty() => Ok(None),
            Ok(options) => Ok(Some(options)),
            Err(err) if err.kind() == ErrorKind::UnknownArgument => {
                warn!("{}", err.render().to_string().trim_end());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Returns the selected operations in execution order.
    pub fn operations(&self) -> Vec<BakeOperation> {
        BakeOperation::ALL
            .into_iter()
            .filter(|op| self.all || self.is_selected(*op))
            .collect()
    }

    /// Returns true if the operation was requested explicitly.
    ///
    /// * `op` - The operation.
    fn is_selected(&self, op: BakeOperation) -> bool {
        match op {
            BakeOperation::TestPattern => self.test,
            BakeOperation::MultiscatterBrdf => self.multiscatter_brdf,
            BakeOperation::EnvBrdf => self.env_brdf,
            BakeOperation::Noise => self.noise,
            BakeOperation::Blackbody => self.blackbody,
            BakeOperation::GlossNormal => self.gloss_normal,
            BakeOperation::Subsurface => self.subsurface,
        }
    }
}

/// Create a progress bar.
///
/// * `len`   - Number of steps.
/// * `quiet` - Return a hidden progress bar.
pub fn create_progress_reporter(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::with_template("{msg:32} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4}")
    {
        progress.set_style(style.progress_chars("=>-"));
    }
    progress
}
