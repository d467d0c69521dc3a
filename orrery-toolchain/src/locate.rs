// Standard library
use std::fs;
use std::path::{Path, PathBuf};

// External crates
use tracing::{debug, info};

// Internal imports
use crate::error::BuildError;
use crate::version::ToolchainVersion;
use orrery_config::ToolchainSettings;

/// Location of the environment script inside an edition directory.
pub const INIT_SCRIPT_RELATIVE: [&str; 4] = ["VC", "Auxiliary", "Build", "vcvarsall.bat"];

/// An installed toolchain, identified by its environment script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub version: ToolchainVersion,
    pub init_script: PathBuf,
}

impl Toolchain {
    /// Use an explicitly configured script, bypassing discovery.
    pub fn from_init_script(script: &Path) -> Result<Self, BuildError> {
        if !script.is_file() {
            return Err(BuildError::InitScriptMissing(script.to_path_buf()));
        }
        Ok(Self {
            version: ToolchainVersion::parse("configured"),
            init_script: script.to_path_buf(),
        })
    }
}

/// Resolve the toolchain from settings: the configured script if any,
/// otherwise the newest installed version.
pub fn locate(settings: &ToolchainSettings) -> Result<Toolchain, BuildError> {
    match &settings.init_script {
        Some(script) => Toolchain::from_init_script(script),
        None => discover(&settings.install_root, &settings.editions),
    }
}

/// Pick the greatest version directory under `install_root` that contains
/// an environment script for one of `editions` (tried in order).
pub fn discover(install_root: &Path, editions: &[String]) -> Result<Toolchain, BuildError> {
    let not_found = || BuildError::ToolchainNotFound {
        root: install_root.to_path_buf(),
    };

    if !install_root.is_dir() {
        return Err(not_found());
    }

    let entries = fs::read_dir(install_root).map_err(|source| BuildError::Io {
        path: install_root.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        candidates.push((ToolchainVersion::parse(&name), entry.path()));
    }
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    for (version, dir) in candidates {
        for edition in editions {
            let script = INIT_SCRIPT_RELATIVE
                .iter()
                .fold(dir.join(edition), |path, part| path.join(part));
            if script.is_file() {
                info!(version = %version, script = %script.display(), "selected toolchain");
                return Ok(Toolchain {
                    version,
                    init_script: script,
                });
            }
        }
        debug!(version = %version, "no environment script in any edition, skipping");
    }

    Err(not_found())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn install(root: &Path, version: &str, edition: &str) -> PathBuf {
        let dir = INIT_SCRIPT_RELATIVE[..3]
            .iter()
            .fold(root.join(version).join(edition), |p, part| p.join(part));
        fs::create_dir_all(&dir).unwrap();
        let script = dir.join(INIT_SCRIPT_RELATIVE[3]);
        fs::write(&script, "@echo off").unwrap();
        script
    }

    fn editions() -> Vec<String> {
        ToolchainSettings::default().editions
    }

    #[test]
    fn test_picks_numerically_greatest_version() {
        let temp = tempdir().unwrap();
        install(temp.path(), "9", "Community");
        let newest = install(temp.path(), "10", "Community");

        let toolchain = discover(temp.path(), &editions()).unwrap();
        assert_eq!(toolchain.version.as_str(), "10");
        assert_eq!(toolchain.init_script, newest);
    }

    #[test]
    fn test_skips_versions_without_script() {
        let temp = tempdir().unwrap();
        let usable = install(temp.path(), "2019", "Professional");
        fs::create_dir_all(temp.path().join("2022").join("Community")).unwrap();
        fs::create_dir_all(temp.path().join("Installer")).unwrap();

        let toolchain = discover(temp.path(), &editions()).unwrap();
        assert_eq!(toolchain.version.as_str(), "2019");
        assert_eq!(toolchain.init_script, usable);
    }

    #[test]
    fn test_edition_preference_order() {
        let temp = tempdir().unwrap();
        install(temp.path(), "2022", "BuildTools");
        let community = install(temp.path(), "2022", "Community");

        let toolchain = discover(temp.path(), &editions()).unwrap();
        assert_eq!(toolchain.init_script, community);
    }

    #[test]
    fn test_missing_install_root() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("Microsoft Visual Studio");
        assert!(matches!(
            discover(&root, &editions()),
            Err(BuildError::ToolchainNotFound { root: r }) if r == root
        ));
    }

    #[test]
    fn test_configured_script_bypasses_discovery() {
        let temp = tempdir().unwrap();
        let script = temp.path().join("vcvarsall.bat");
        fs::write(&script, "").unwrap();

        let settings = ToolchainSettings {
            install_root: temp.path().join("does-not-exist"),
            init_script: Some(script.clone()),
            ..ToolchainSettings::default()
        };
        let toolchain = locate(&settings).unwrap();
        assert_eq!(toolchain.init_script, script);
        assert_eq!(toolchain.version.as_str(), "configured");
    }

    #[test]
    fn test_configured_script_must_exist() {
        let settings = ToolchainSettings {
            init_script: Some(PathBuf::from("/nowhere/vcvarsall.bat")),
            ..ToolchainSettings::default()
        };
        assert!(matches!(
            locate(&settings),
            Err(BuildError::InitScriptMissing(_))
        ));
    }
}
