use std::path::PathBuf;

use thiserror::Error;

/// Failure converting a single texture. Recovered into the report; never
/// aborts a batch.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Cannot write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("No encoder for target format '{0}'")]
    UnsupportedFormat(String),

    #[error("Cannot list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
