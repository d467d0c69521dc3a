//! Returning the workspace to its checked-out state.

// Standard library
use std::io;
use std::path::{Path, PathBuf};

// External crates
use thiserror::Error;
use tracing::{debug, info};

// Internal imports
use orrery_config::{AssetSettings, WorkspacePaths};
use orrery_core::file_system::{
    files_with_extension_sorted, remove_path_protected, sibling_with_extension,
    subdirectories_sorted,
};

/// Which generated artifacts a reset removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetScope {
    pub dependencies: bool,
    pub editor: bool,
    pub build: bool,
    pub textures: bool,
}

impl ResetScope {
    pub fn all() -> Self {
        Self {
            dependencies: true,
            editor: true,
            build: true,
            textures: true,
        }
    }

    pub fn none() -> Self {
        Self {
            dependencies: false,
            editor: false,
            build: false,
            textures: false,
        }
    }

    /// Comma separated names of the selected parts, for progress output.
    pub fn describe(&self) -> String {
        let parts = [
            (self.dependencies, "dependencies"),
            (self.editor, "editor settings"),
            (self.build, "build output"),
            (self.textures, "generated textures"),
        ];
        parts
            .iter()
            .filter(|(selected, _)| *selected)
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for ResetScope {
    fn default() -> Self {
        Self::all()
    }
}

/// Whether the pipeline stops after the reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// `-clear` / `-cleanse`
    ClearAndExit,
    /// `-reset`
    ResetThenContinue,
}

impl ResetMode {
    pub fn continues(self) -> bool {
        matches!(self, ResetMode::ResetThenContinue)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResetReport {
    /// Directories removed
    pub removed: Vec<PathBuf>,
    pub textures_removed: Vec<PathBuf>,
}

/// A removal that failed even after the permission repair.
#[derive(Error, Debug)]
#[error("Failed to remove {path}: {source}")]
pub struct ResetError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Remove the parts of the workspace selected by `scope`. Parts that do not
/// exist are skipped. The first failure stops the reset.
pub fn reset(
    paths: &WorkspacePaths,
    assets: &AssetSettings,
    scope: ResetScope,
) -> Result<ResetReport, ResetError> {
    let mut report = ResetReport::default();

    let directories = [
        (scope.dependencies, &paths.dependencies),
        (scope.editor, &paths.editor),
        (scope.build, &paths.build),
    ];
    for (selected, dir) in directories {
        if selected && remove_if_present(dir)? {
            report.removed.push(dir.clone());
        }
    }

    if scope.textures {
        let generated = generated_textures(
            &paths.data,
            &assets.source_extension,
            &assets.target_extension,
        )
        .map_err(|source| ResetError {
            path: paths.data.clone(),
            source,
        })?;
        for texture in generated {
            remove_if_present(&texture)?;
            report.textures_removed.push(texture);
        }
    }

    info!(
        directories = report.removed.len(),
        textures = report.textures_removed.len(),
        "workspace reset"
    );
    Ok(report)
}

fn remove_if_present(path: &Path) -> Result<bool, ResetError> {
    if std::fs::symlink_metadata(path).is_err() {
        debug!(path = %path.display(), "not present");
        return Ok(false);
    }
    remove_path_protected(path).map_err(|source| ResetError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Target-format files under each system directory that have a same-named
/// source image next to them. Anything else is left alone.
pub fn generated_textures(
    data_root: &Path,
    source_extension: &str,
    target_extension: &str,
) -> io::Result<Vec<PathBuf>> {
    if !data_root.is_dir() {
        return Ok(Vec::new());
    }

    let mut generated = Vec::new();
    for system in subdirectories_sorted(data_root)? {
        for candidate in files_with_extension_sorted(&system, target_extension)? {
            if has_source_sibling(&candidate, source_extension)? {
                generated.push(candidate);
            }
        }
    }
    Ok(generated)
}

/// Source files may differ in extension case from the configured suffix, so
/// the directory is listed rather than probing one spelling.
fn has_source_sibling(candidate: &Path, source_extension: &str) -> io::Result<bool> {
    if sibling_with_extension(candidate, source_extension).is_file() {
        return Ok(true);
    }
    let (Some(dir), Some(stem)) = (candidate.parent(), candidate.file_stem()) else {
        return Ok(false);
    };
    Ok(files_with_extension_sorted(dir, source_extension)?
        .iter()
        .any(|source| source.file_stem() == Some(stem)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_config::WorkspaceConfig;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        _temp: TempDir,
        paths: WorkspacePaths,
        assets: AssetSettings,
    }

    fn populated() -> Fixture {
        let temp = tempdir().unwrap();
        let config = WorkspaceConfig::default();
        let paths = WorkspacePaths::new(temp.path(), &config);

        fs::create_dir_all(paths.dependency_build_dir("freeglut")).unwrap();
        fs::write(paths.dependencies.join(".orrery-state.json"), "{}").unwrap();
        fs::create_dir_all(paths.build.join("Release")).unwrap();
        fs::create_dir_all(&paths.editor).unwrap();
        fs::write(paths.editor.join("settings.json"), "{}").unwrap();

        let sol = paths.system_dir("sol");
        fs::create_dir_all(&sol).unwrap();
        fs::write(sol.join("mars.jpg"), "jpg").unwrap();
        fs::write(sol.join("mars.bmp"), "bmp").unwrap();
        fs::write(sol.join("EARTH.JPG"), "jpg").unwrap();
        fs::write(sol.join("EARTH.bmp"), "bmp").unwrap();
        fs::write(sol.join("skybox.bmp"), "hand made").unwrap();
        fs::write(&paths.constants, "{}").unwrap();

        Fixture {
            _temp: temp,
            paths,
            assets: config.assets,
        }
    }

    #[test]
    fn test_full_reset() {
        let fx = populated();
        let report = reset(&fx.paths, &fx.assets, ResetScope::all()).unwrap();

        assert!(!fx.paths.dependencies.exists());
        assert!(!fx.paths.build.exists());
        assert!(!fx.paths.editor.exists());
        assert_eq!(report.removed.len(), 3);

        let sol = fx.paths.system_dir("sol");
        assert!(!sol.join("mars.bmp").exists());
        assert!(!sol.join("EARTH.bmp").exists());
        assert!(sol.join("mars.jpg").exists());
        assert!(sol.join("EARTH.JPG").exists());
        assert!(sol.join("skybox.bmp").exists());
        assert!(fx.paths.constants.exists());
        assert_eq!(report.textures_removed.len(), 2);
    }

    #[test]
    fn test_narrow_scope_leaves_the_rest() {
        let fx = populated();
        let scope = ResetScope {
            build: true,
            ..ResetScope::none()
        };

        let report = reset(&fx.paths, &fx.assets, scope).unwrap();

        assert_eq!(report.removed, vec![fx.paths.build.clone()]);
        assert!(fx.paths.dependencies.exists());
        assert!(fx.paths.editor.exists());
        assert!(fx.paths.system_dir("sol").join("mars.bmp").exists());
    }

    #[test]
    fn test_reset_of_clean_workspace_is_a_no_op() {
        let temp = tempdir().unwrap();
        let config = WorkspaceConfig::default();
        let paths = WorkspacePaths::new(temp.path(), &config);

        let report = reset(&paths, &config.assets, ResetScope::all()).unwrap();

        assert_eq!(report, ResetReport::default());
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_tree_is_removed() {
        use std::os::unix::fs::PermissionsExt;

        let fx = populated();
        let pack = fx
            .paths
            .dependency_dir("freeglut")
            .join(".git")
            .join("objects")
            .join("pack");
        fs::create_dir_all(&pack).unwrap();
        let object = pack.join("pack-1234.idx");
        fs::write(&object, "idx").unwrap();
        fs::set_permissions(&object, fs::Permissions::from_mode(0o444)).unwrap();
        fs::set_permissions(&pack, fs::Permissions::from_mode(0o555)).unwrap();

        reset(&fx.paths, &fx.assets, ResetScope::all()).unwrap();

        assert!(!fx.paths.dependencies.exists());
    }

    #[test]
    fn test_generated_textures_need_a_source_sibling() {
        let fx = populated();
        let generated = generated_textures(&fx.paths.data, "jpg", "bmp").unwrap();
        let sol = fx.paths.system_dir("sol");
        assert_eq!(generated, vec![sol.join("EARTH.bmp"), sol.join("mars.bmp")]);
    }

    #[test]
    fn test_scope_description() {
        assert_eq!(
            ResetScope::all().describe(),
            "dependencies, editor settings, build output, generated textures"
        );
        let scope = ResetScope {
            textures: true,
            ..ResetScope::none()
        };
        assert_eq!(scope.describe(), "generated textures");
    }

    #[test]
    fn test_modes() {
        assert!(ResetMode::ResetThenContinue.continues());
        assert!(!ResetMode::ClearAndExit.continues());
    }
}
