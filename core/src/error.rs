//! Errors

use thiserror::Error;

/// Errors raised while baking lookup tables.
#[derive(Error, Debug)]
pub enum BakeError {
    /// The sample grid needs at least 2 samples per axis to normalize
    /// coordinates by `resolution - 1`.
    #[error("invalid sample grid resolution {0}; at least 2 is required")]
    InvalidResolution(usize),

    #[error("can't determine file type from suffix of filename {0}")]
    MissingExtension(String),

    #[error("extension {extension} is not supported for {path}")]
    UnsupportedFormat { path: String, extension: String },

    #[error("error saving output image {path}: {message}")]
    Encode { path: String, message: String },

    /// The gloss/normal table must be built before it is queried.
    #[error("gloss to normal length table has not been built")]
    MissingGlossTable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BakeError {
    /// Returns an `Encode` error.
    ///
    /// * `path`    - The output path.
    /// * `message` - The error message from the encoder.
    pub fn encode<T: ToString>(path: &str, message: T) -> Self {
        Self::Encode {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}
