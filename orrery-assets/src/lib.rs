//! Texture preparation for the renderer.
//!
//! Each directory under the data root is one planetary system; its source
//! images are converted in place to the format the renderer loads. A broken
//! image is reported and skipped, never fatal.

pub mod error;
pub mod pipeline;

pub use error::ConversionError;
pub use pipeline::{convert_all, AssetPipeline, ConversionFailure, ConversionReport};
