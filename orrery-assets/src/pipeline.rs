// Standard library
use std::fs;
use std::path::{Path, PathBuf};

// External crates
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, warn};

// Internal imports
use crate::error::ConversionError;
use orrery_config::AssetSettings;
use orrery_core::file_system::{
    dir_exists, files_with_extension_sorted, sibling_with_extension, subdirectories_sorted,
};

/// A source texture that could not be converted.
#[derive(Debug)]
pub struct ConversionFailure {
    pub source: PathBuf,
    pub error: ConversionError,
}

/// Outcome of one pass over a data root.
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Outputs written during this pass
    pub converted: Vec<PathBuf>,
    /// Sources whose output already existed
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<ConversionFailure>,
}

impl ConversionReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    fn fail(&mut self, source: PathBuf, error: ConversionError) {
        warn!(source = %source.display(), %error, "texture conversion failed");
        self.failed.push(ConversionFailure { source, error });
    }
}

/// Converts every source-format texture in each system directory to the
/// target format, next to the source.
#[derive(Debug, Clone)]
pub struct AssetPipeline {
    source_extension: String,
    target_extension: String,
}

impl AssetPipeline {
    pub fn new(source_extension: impl Into<String>, target_extension: impl Into<String>) -> Self {
        Self {
            source_extension: source_extension.into(),
            target_extension: target_extension.into(),
        }
    }

    pub fn from_settings(settings: &AssetSettings) -> Self {
        Self::new(&settings.source_extension, &settings.target_extension)
    }

    /// Convert everything under `data_root`. Only immediate subdirectories
    /// are visited; a texture with an existing output is left alone.
    pub fn convert_all(&self, data_root: &Path) -> ConversionReport {
        let mut report = ConversionReport::default();

        if !dir_exists(data_root) {
            warn!(root = %data_root.display(), "data root missing, nothing to convert");
            return report;
        }

        let systems = match subdirectories_sorted(data_root) {
            Ok(systems) => systems,
            Err(source) => {
                let path = data_root.to_path_buf();
                report.fail(path.clone(), ConversionError::Io { path, source });
                return report;
            }
        };

        for system in systems {
            self.convert_system(&system, &mut report);
        }

        info!(
            converted = report.converted.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "texture conversion pass finished"
        );
        report
    }

    fn convert_system(&self, system: &Path, report: &mut ConversionReport) {
        let sources = match files_with_extension_sorted(system, &self.source_extension) {
            Ok(sources) => sources,
            Err(source) => {
                let path = system.to_path_buf();
                report.fail(path.clone(), ConversionError::Io { path, source });
                return;
            }
        };

        for source in sources {
            let target = sibling_with_extension(&source, &self.target_extension);
            if target.exists() {
                debug!(target = %target.display(), "already converted");
                report.skipped.push(source);
                continue;
            }
            match self.convert_file(&source, &target) {
                Ok(()) => report.converted.push(target),
                Err(error) => report.fail(source, error),
            }
        }
    }

    /// Decode `source` and write it to `target` in the target format. A
    /// partially written `target` is removed on failure.
    pub fn convert_file(&self, source: &Path, target: &Path) -> Result<(), ConversionError> {
        let format = ImageFormat::from_extension(&self.target_extension)
            .filter(|format| format.writing_enabled())
            .ok_or_else(|| ConversionError::UnsupportedFormat(self.target_extension.clone()))?;

        let decoded = image::open(source).map_err(|e| ConversionError::Decode {
            path: source.to_path_buf(),
            source: e,
        })?;

        // 8-bit RGB(A) is the common denominator of the texture encoders.
        let normalized = if decoded.color().has_alpha() {
            DynamicImage::ImageRgba8(decoded.to_rgba8())
        } else {
            DynamicImage::ImageRgb8(decoded.to_rgb8())
        };

        if let Err(e) = normalized.save_with_format(target, format) {
            if target.exists() {
                if let Err(cleanup) = fs::remove_file(target) {
                    warn!(target = %target.display(), error = %cleanup, "could not remove partial output");
                }
            }
            return Err(ConversionError::Encode {
                path: target.to_path_buf(),
                source: e,
            });
        }

        debug!(source = %source.display(), target = %target.display(), "converted");
        Ok(())
    }
}

/// Convert with the configured formats.
pub fn convert_all(data_root: &Path, settings: &AssetSettings) -> ConversionReport {
    AssetPipeline::from_settings(settings).convert_all(data_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn write_jpeg(path: &Path) {
        RgbImage::from_pixel(8, 4, Rgb([200, 80, 40]))
            .save_with_format(path, ImageFormat::Jpeg)
            .unwrap();
    }

    fn pipeline() -> AssetPipeline {
        AssetPipeline::from_settings(&AssetSettings::default())
    }

    #[test]
    fn test_converts_each_system() {
        let temp = tempdir().unwrap();
        let sol = temp.path().join("sol");
        let trappist = temp.path().join("trappist");
        fs::create_dir_all(&sol).unwrap();
        fs::create_dir_all(&trappist).unwrap();
        write_jpeg(&sol.join("mars.jpg"));
        write_jpeg(&sol.join("earth.jpg"));
        write_jpeg(&trappist.join("e.jpg"));

        let report = pipeline().convert_all(temp.path());

        assert!(report.is_clean());
        assert_eq!(
            report.converted,
            vec![
                sol.join("earth.bmp"),
                sol.join("mars.bmp"),
                trappist.join("e.bmp")
            ]
        );
        let output = image::open(sol.join("mars.bmp")).unwrap();
        assert_eq!((output.width(), output.height()), (8, 4));
        assert_eq!(
            ImageFormat::from_path(sol.join("mars.bmp")).unwrap(),
            ImageFormat::Bmp
        );
    }

    #[test]
    fn test_second_pass_converts_nothing() {
        let temp = tempdir().unwrap();
        let sol = temp.path().join("sol");
        fs::create_dir_all(&sol).unwrap();
        write_jpeg(&sol.join("venus.jpg"));

        let first = pipeline().convert_all(temp.path());
        let second = pipeline().convert_all(temp.path());

        assert_eq!(first.converted.len(), 1);
        assert!(second.converted.is_empty());
        assert_eq!(second.skipped, vec![sol.join("venus.jpg")]);
    }

    #[test]
    fn test_existing_output_is_not_refreshed() {
        let temp = tempdir().unwrap();
        let sol = temp.path().join("sol");
        fs::create_dir_all(&sol).unwrap();
        write_jpeg(&sol.join("moon.jpg"));
        fs::write(sol.join("moon.bmp"), b"stale").unwrap();

        let report = pipeline().convert_all(temp.path());

        assert!(report.converted.is_empty());
        assert_eq!(fs::read(sol.join("moon.bmp")).unwrap(), b"stale");
    }

    #[test]
    fn test_corrupt_source_does_not_stop_batch() {
        let temp = tempdir().unwrap();
        let sol = temp.path().join("sol");
        fs::create_dir_all(&sol).unwrap();
        write_jpeg(&sol.join("earth.jpg"));
        fs::write(sol.join("jupiter.jpg"), b"definitely not a jpeg").unwrap();
        write_jpeg(&sol.join("saturn.jpg"));

        let report = pipeline().convert_all(temp.path());

        assert_eq!(report.converted.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].source, sol.join("jupiter.jpg"));
        assert!(matches!(
            report.failed[0].error,
            ConversionError::Decode { .. }
        ));
        assert!(!sol.join("jupiter.bmp").exists());
        assert!(sol.join("saturn.bmp").exists());
    }

    #[test]
    fn test_missing_data_root_yields_empty_report() {
        let temp = tempdir().unwrap();
        let report = pipeline().convert_all(&temp.path().join("data"));
        assert!(report.converted.is_empty());
        assert!(report.skipped.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_only_one_level_deep() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("sol").join("moons");
        fs::create_dir_all(&nested).unwrap();
        write_jpeg(&nested.join("phobos.jpg"));
        write_jpeg(&temp.path().join("stray.jpg"));

        let report = pipeline().convert_all(temp.path());

        assert!(report.converted.is_empty());
        assert!(!nested.join("phobos.bmp").exists());
        assert!(!temp.path().join("stray.bmp").exists());
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let temp = tempdir().unwrap();
        let sol = temp.path().join("sol");
        fs::create_dir_all(&sol).unwrap();
        write_jpeg(&sol.join("SUN.JPG"));

        let report = pipeline().convert_all(temp.path());

        assert_eq!(report.converted, vec![sol.join("SUN.bmp")]);
    }

    #[test]
    fn test_unsupported_target_format() {
        let temp = tempdir().unwrap();
        let sol = temp.path().join("sol");
        fs::create_dir_all(&sol).unwrap();
        write_jpeg(&sol.join("pluto.jpg"));

        let report = AssetPipeline::new("jpg", "xyz").convert_all(temp.path());

        assert_eq!(report.failed.len(), 1);
        assert!(matches!(
            report.failed[0].error,
            ConversionError::UnsupportedFormat(ref ext) if ext == "xyz"
        ));
    }
}
