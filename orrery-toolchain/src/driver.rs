// Standard library
use std::fs;
use std::path::{Path, PathBuf};

// External crates
use tracing::{debug, info};

// Internal imports
use crate::error::BuildError;
use crate::locate::Toolchain;
use orrery_config::{ProjectSettings, ToolchainSettings};
use orrery_core::file_system::has_file;
use orrery_core::{CommandError, CommandRunner, CommandSpec};
use orrery_platform::PlatformProvider;

/// Batch file written into the build directory for each compile.
pub const BUILD_SCRIPT_NAME: &str = "orrery-build.cmd";

/// One thing to compile: a generated project inside a build directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub name: String,
    pub build_dir: PathBuf,
    pub configuration: String,
    pub arch: String,
}

impl BuildTarget {
    pub fn new(
        name: impl Into<String>,
        build_dir: impl Into<PathBuf>,
        project: &ProjectSettings,
    ) -> Self {
        Self {
            name: name.into(),
            build_dir: build_dir.into(),
            configuration: project.configuration.clone(),
            arch: project.arch.clone(),
        }
    }
}

/// Runs project generation and compilation against a located toolchain.
pub struct BuildDriver<'a> {
    runner: &'a dyn CommandRunner,
    platform: &'a dyn PlatformProvider,
    settings: &'a ToolchainSettings,
    toolchain: Toolchain,
}

impl<'a> BuildDriver<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        platform: &'a dyn PlatformProvider,
        settings: &'a ToolchainSettings,
        toolchain: Toolchain,
    ) -> Self {
        Self {
            runner,
            platform,
            settings,
            toolchain,
        }
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Create `build_dir` and run the project generator against its parent.
    pub fn generate(&self, build_dir: &Path) -> Result<(), BuildError> {
        fs::create_dir_all(build_dir).map_err(|source| BuildError::Io {
            path: build_dir.to_path_buf(),
            source,
        })?;

        let spec = CommandSpec::new(self.settings.generator.as_str())
            .arg("..")
            .current_dir(build_dir);
        let generate_failed = |source: CommandError| BuildError::Generate {
            dir: build_dir.to_path_buf(),
            source,
        };
        self.runner
            .run(&spec)
            .and_then(|outcome| outcome.check())
            .map_err(generate_failed)?;

        debug!(dir = %build_dir.display(), "project generated");
        Ok(())
    }

    /// Compile `target`, generating its project first when the project file
    /// is missing. Returns once the build process has exited.
    pub fn build(&self, target: &BuildTarget) -> Result<(), BuildError> {
        let project_file = self.platform.project_file_name(&target.name);
        if !has_file(&target.build_dir, &project_file) {
            info!(target = %target.name, "project file missing, generating");
            self.generate(&target.build_dir)?;
        }
        self.compile(target)
    }

    /// Compile an already generated project.
    pub fn compile(&self, target: &BuildTarget) -> Result<(), BuildError> {
        let project_file = self.platform.project_file_name(&target.name);
        let script_path = target.build_dir.join(BUILD_SCRIPT_NAME);
        fs::write(&script_path, self.render_script(target, &project_file)).map_err(|source| {
            BuildError::Io {
                path: script_path.clone(),
                source,
            }
        })?;

        let (shell, shell_args) = self.platform.shell_command();
        let spec = CommandSpec::new(shell)
            .args(shell_args)
            .arg(BUILD_SCRIPT_NAME)
            .current_dir(&target.build_dir);
        let compile_failed = |source: CommandError| BuildError::Compile {
            target: target.name.clone(),
            source,
        };
        self.runner
            .run(&spec)
            .and_then(|outcome| outcome.check())
            .map_err(compile_failed)?;

        info!(target = %target.name, configuration = %target.configuration, "build finished");
        Ok(())
    }

    /// The environment script and the build tool have to share one shell
    /// session, so both go in a single batch file.
    fn render_script(&self, target: &BuildTarget, project_file: &str) -> String {
        let lines = [
            "@echo off".to_string(),
            format!(
                "call \"{}\" {} || exit /b 1",
                self.toolchain.init_script.display(),
                target.arch
            ),
            // vcvarsall may leave the shell somewhere else.
            format!("cd /d \"{}\" || exit /b 1", target.build_dir.display()),
            format!(
                "{} {} /p:Configuration={} /p:Platform={} /t:{}",
                self.settings.builder, project_file, target.configuration, target.arch, target.name
            ),
            "exit /b %ERRORLEVEL%".to_string(),
        ];
        let mut script = lines.join("\r\n");
        script.push_str("\r\n");
        script
    }
}
