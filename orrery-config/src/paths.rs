use std::path::PathBuf;

use crate::config::WorkspaceConfig;

/// File name of the provisioning status record inside the dependency root.
pub const STATE_FILE_NAME: &str = ".orrery-state.json";

/// Name of the nested build-output directory inside each dependency.
pub const DEPENDENCY_BUILD_DIR: &str = "build";

/// Every location the tool reads or writes, derived once from the workspace
/// root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub dependencies: PathBuf,
    pub build: PathBuf,
    pub editor: PathBuf,
    pub data: PathBuf,
    pub constants: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: impl Into<PathBuf>, config: &WorkspaceConfig) -> Self {
        let root = root.into();
        let data = root.join(&config.layout.data_dir);
        Self {
            dependencies: root.join(&config.layout.dependencies_dir),
            build: root.join(&config.layout.build_dir),
            editor: root.join(&config.layout.editor_dir),
            constants: data.join(&config.assets.constants_file),
            data,
            root,
        }
    }

    pub fn dependency_dir(&self, name: &str) -> PathBuf {
        self.dependencies.join(name)
    }

    pub fn dependency_build_dir(&self, name: &str) -> PathBuf {
        self.dependency_dir(name).join(DEPENDENCY_BUILD_DIR)
    }

    pub fn state_file(&self) -> PathBuf {
        self.dependencies.join(STATE_FILE_NAME)
    }

    /// Directory of one planetary system under the data root.
    pub fn system_dir(&self, system: &str) -> PathBuf {
        self.data.join(system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let paths = WorkspacePaths::new("/work/solar", &WorkspaceConfig::default());
        assert_eq!(paths.dependencies, PathBuf::from("/work/solar/dependencies"));
        assert_eq!(paths.build, PathBuf::from("/work/solar/build"));
        assert_eq!(paths.editor, PathBuf::from("/work/solar/.vscode"));
        assert_eq!(paths.data, PathBuf::from("/work/solar/data"));
        assert_eq!(
            paths.constants,
            PathBuf::from("/work/solar/data/constants.json")
        );
        assert_eq!(
            paths.dependency_build_dir("freeglut"),
            PathBuf::from("/work/solar/dependencies/freeglut/build")
        );
        assert_eq!(
            paths.state_file(),
            PathBuf::from("/work/solar/dependencies/.orrery-state.json")
        );
        assert_eq!(paths.system_dir("sol"), PathBuf::from("/work/solar/data/sol"));
    }

    #[test]
    fn test_custom_layout() {
        let mut config = WorkspaceConfig::default();
        config.layout.dependencies_dir = "third_party".to_string();
        config.layout.data_dir = "assets".to_string();
        config.assets.constants_file = "physics.json".to_string();

        let paths = WorkspacePaths::new("/w", &config);
        assert_eq!(paths.dependency_dir("cjson"), PathBuf::from("/w/third_party/cjson"));
        assert_eq!(paths.constants, PathBuf::from("/w/assets/physics.json"));
    }
}
