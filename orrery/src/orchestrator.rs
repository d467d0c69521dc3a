//! The fixed pipeline: reset, texture conversion, dependency provisioning,
//! platform detection, then build and run on platforms that support them.

// Standard library
use std::path::PathBuf;
use std::sync::Arc;

// External crates
use tracing::{debug, info};

// Internal imports
use crate::error::{AppError, AppResult};
use orrery_assets::{AssetPipeline, ConversionReport};
use orrery_config::{DependencySpec, WorkspaceConfig, WorkspacePaths};
use orrery_core::command_stream::is_tool_installed;
use orrery_core::file_system::subdirectories_sorted;
use orrery_core::{
    orrery_error, orrery_error_hint, orrery_info, orrery_println, orrery_progress, orrery_success,
    orrery_warning, CommandRunner, CommandSpec,
};
use orrery_messages::{messages::MESSAGES, msg};
use orrery_platform::{PlatformError, PlatformProvider, PlatformRegistry};
use orrery_provision::{DependencyStatus, ProvisionOutcome, Provisioner};
use orrery_toolchain::{locate, BuildDriver, BuildTarget};
use orrery_workspace::{ResetMode, ResetReport, ResetScope};

/// What a single invocation asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actions {
    pub reset: Option<ResetMode>,
    pub scope: ResetScope,
    pub build_dependencies: bool,
    pub build_project: bool,
    pub run: bool,
    /// System directory under the data root handed to the renderer
    pub system: Option<String>,
}

impl Actions {
    fn wants_native_steps(&self) -> bool {
        self.build_dependencies || self.build_project || self.run
    }
}

/// What a pipeline run did, step by step.
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    pub reset: Option<ResetReport>,
    /// The run stopped after the reset (`-clear`)
    pub stopped_after_reset: bool,
    pub conversion: ConversionReport,
    pub provisioned: Vec<ProvisionOutcome>,
    pub platform: Option<&'static str>,
    /// Build and run steps were attempted
    pub native_steps: bool,
}

pub type PlatformDetector = fn() -> Result<Arc<dyn PlatformProvider>, PlatformError>;

pub struct Pipeline<'a> {
    runner: &'a dyn CommandRunner,
    config: WorkspaceConfig,
    paths: WorkspacePaths,
    detect: PlatformDetector,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        root: impl Into<PathBuf>,
        config: WorkspaceConfig,
    ) -> Self {
        let paths = WorkspacePaths::new(root, &config);
        Self {
            runner,
            config,
            paths,
            detect: PlatformRegistry::detect,
        }
    }

    /// Replace host detection, e.g. to exercise another platform's dispatch.
    pub fn with_platform_detector(mut self, detect: PlatformDetector) -> Self {
        self.detect = detect;
        self
    }

    pub fn paths(&self) -> &WorkspacePaths {
        &self.paths
    }

    pub fn execute(&self, actions: &Actions) -> AppResult<PipelineOutcome> {
        let mut outcome = PipelineOutcome::default();

        if let Some(mode) = actions.reset {
            outcome.reset = Some(self.reset(actions.scope)?);
            if !mode.continues() {
                outcome.stopped_after_reset = true;
                return Ok(outcome);
            }
        }

        outcome.conversion = self.convert_textures();
        outcome.provisioned = self.provision()?;

        let platform = self.detect_platform()?;
        outcome.platform = Some(platform.name());

        if !platform.supports_native_build() {
            if actions.wants_native_steps() {
                orrery_info!(
                    "{}",
                    msg!(MESSAGES.common.platform_no_build, platform = platform.name())
                );
            }
            return Ok(outcome);
        }
        outcome.native_steps = true;

        if actions.build_dependencies || actions.build_project {
            let toolchain = locate(&self.config.toolchain)?;
            let driver =
                BuildDriver::new(self.runner, &*platform, &self.config.toolchain, toolchain);
            orrery_info!(
                "{}",
                msg!(
                    MESSAGES.build.toolchain_found,
                    version = &driver.toolchain().version,
                    script = driver.toolchain().init_script.display()
                )
            );

            if actions.build_dependencies {
                self.build_dependencies(&driver)?;
            }
            if actions.build_project {
                self.build_project(&driver)?;
            }
        }

        if actions.run {
            self.run_renderer(&*platform, actions.system.as_deref())?;
        }

        orrery_success!("{}", MESSAGES.common.pipeline_complete);
        Ok(outcome)
    }

    fn reset(&self, scope: ResetScope) -> AppResult<ResetReport> {
        orrery_progress!("{}", msg!(MESSAGES.reset.clearing, scope = scope.describe()));
        let report = orrery_workspace::reset(&self.paths, &self.config.assets, scope)?;

        for dir in &report.removed {
            orrery_println!("{}", msg!(MESSAGES.reset.removed, path = dir.display()));
        }
        if !report.textures_removed.is_empty() {
            orrery_println!(
                "{}",
                msg!(
                    MESSAGES.reset.textures_removed,
                    count = report.textures_removed.len()
                )
            );
        }
        orrery_success!("{}", MESSAGES.reset.complete);
        Ok(report)
    }

    fn convert_textures(&self) -> ConversionReport {
        if !self.paths.data.is_dir() {
            orrery_warning!(
                "{}",
                msg!(MESSAGES.assets.data_root_missing, root = self.paths.data.display())
            );
            return ConversionReport::default();
        }

        orrery_progress!(
            "{}",
            msg!(MESSAGES.assets.converting, root = self.paths.data.display())
        );
        let report =
            AssetPipeline::from_settings(&self.config.assets).convert_all(&self.paths.data);

        for target in &report.converted {
            orrery_println!("{}", msg!(MESSAGES.assets.converted, target = target.display()));
        }
        for failure in &report.failed {
            orrery_warning!(
                "{}",
                msg!(
                    MESSAGES.assets.failed,
                    source = failure.source.display(),
                    error = &failure.error
                )
            );
        }
        let summary = msg!(
            MESSAGES.assets.summary,
            converted = report.converted.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len()
        );
        if report.is_clean() {
            orrery_info!("{}", summary);
        } else {
            orrery_warning!("{}", summary);
        }
        report
    }

    fn provisioner(&self) -> Provisioner<'_> {
        Provisioner::new(self.runner, &self.paths, &self.config.toolchain.generator)
    }

    fn provision(&self) -> AppResult<Vec<ProvisionOutcome>> {
        let provisioner = self.provisioner();
        let mut outcomes = Vec::with_capacity(self.config.dependencies.len());

        for spec in &self.config.dependencies {
            let status = provisioner.status(spec)?;
            match status {
                DependencyStatus::Absent => {
                    orrery_progress!(
                        "{}",
                        msg!(
                            MESSAGES.provision.fetching,
                            name = &spec.name,
                            revision = &spec.revision
                        )
                    );
                }
                status if !status.is_provisioned() => {
                    orrery_progress!(
                        "{}",
                        msg!(MESSAGES.provision.resuming, name = &spec.name, status = status)
                    );
                }
                _ => {}
            }
            if !status.is_provisioned() {
                self.check_tools(spec);
            }

            let outcome = provisioner.ensure(spec)?;
            self.report_provisioning(spec, &outcome);
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Hint at missing tools up front; the spawn failure itself still ends
    /// the run.
    fn check_tools(&self, spec: &DependencySpec) {
        for tool in ["git", self.config.toolchain.generator.as_str()] {
            if !is_tool_installed(tool) {
                orrery_error_hint!(
                    "{}",
                    msg!(MESSAGES.provision.tool_missing, tool = tool, name = &spec.name)
                );
            }
        }
    }

    fn report_provisioning(&self, spec: &DependencySpec, outcome: &ProvisionOutcome) {
        match outcome {
            ProvisionOutcome::Provisioned { .. } => {
                orrery_success!("{}", msg!(MESSAGES.provision.ready, name = &spec.name));
            }
            ProvisionOutcome::Skipped { status, .. } => {
                debug!(
                    "{}",
                    msg!(MESSAGES.provision.already, name = &spec.name, status = status)
                );
                if let Some(recorded) = outcome.revision_drift(spec) {
                    orrery_warning!(
                        "{}",
                        msg!(
                            MESSAGES.provision.revision_drift,
                            name = &spec.name,
                            recorded = recorded,
                            revision = &spec.revision
                        )
                    );
                }
            }
        }
    }

    /// Print the detected family before acting on it, recognised or not.
    fn detect_platform(&self) -> AppResult<Arc<dyn PlatformProvider>> {
        match (self.detect)() {
            Ok(platform) => {
                orrery_println!(
                    "{}",
                    msg!(MESSAGES.common.platform_detected, platform = platform.name())
                );
                Ok(platform)
            }
            Err(err) => {
                orrery_println!(
                    "{}",
                    msg!(MESSAGES.common.platform_detected, platform = &err.0)
                );
                Err(err.into())
            }
        }
    }

    fn build_dependencies(&self, driver: &BuildDriver<'_>) -> AppResult<()> {
        let provisioner = self.provisioner();
        for spec in &self.config.dependencies {
            orrery_progress!(
                "{}",
                msg!(MESSAGES.build.dependency_building, name = &spec.name)
            );
            let target = BuildTarget::new(
                &spec.name,
                self.paths.dependency_build_dir(&spec.name),
                &self.config.project,
            );
            if let Err(e) = driver.build(&target) {
                orrery_error!(
                    "{}",
                    msg!(MESSAGES.build.dependency_failed, name = &spec.name)
                );
                return Err(e.into());
            }
            provisioner.mark_built(spec)?;
            orrery_success!("{}", msg!(MESSAGES.build.dependency_built, name = &spec.name));
        }
        Ok(())
    }

    /// The project is regenerated on every build so new sources are picked up.
    fn build_project(&self, driver: &BuildDriver<'_>) -> AppResult<()> {
        let project = &self.config.project;
        orrery_progress!("{}", msg!(MESSAGES.build.project_building, name = &project.name));

        let target = BuildTarget::new(&project.name, &self.paths.build, project);
        if let Err(e) = driver
            .generate(&self.paths.build)
            .and_then(|()| driver.compile(&target))
        {
            orrery_error!("{}", msg!(MESSAGES.build.project_failed, name = &project.name));
            return Err(e.into());
        }

        orrery_success!("{}", msg!(MESSAGES.build.project_built, name = &project.name));
        Ok(())
    }

    fn run_renderer(
        &self,
        platform: &dyn PlatformProvider,
        system: Option<&str>,
    ) -> AppResult<()> {
        let project = &self.config.project;
        let binary = self
            .paths
            .build
            .join(&project.configuration)
            .join(platform.executable_name(&project.name));
        if !binary.is_file() {
            orrery_error!("{}", msg!(MESSAGES.run.binary_missing, path = binary.display()));
            return Err(AppError::BinaryMissing(binary));
        }

        let system = match system {
            Some(name) => name.to_string(),
            None => self.default_system()?,
        };
        let system_dir = self.paths.system_dir(&system);
        if !system_dir.is_dir() {
            return Err(AppError::NoSystem(system_dir));
        }

        orrery_progress!(
            "{}",
            msg!(MESSAGES.run.launching, binary = binary.display(), system = &system)
        );
        let spec = CommandSpec::new(&binary)
            .arg(&self.paths.constants)
            .arg(&system_dir)
            .current_dir(&self.paths.root)
            .inherit_stdio();
        self.runner
            .run(&spec)
            .and_then(|outcome| outcome.check())
            .map_err(AppError::Run)?;

        info!(system = %system, "renderer exited");
        Ok(())
    }

    /// First system directory under the data root, by name.
    fn default_system(&self) -> AppResult<String> {
        let no_system = || {
            orrery_error!(
                "{}",
                msg!(MESSAGES.run.no_system, root = self.paths.data.display())
            );
            AppError::NoSystem(self.paths.data.clone())
        };
        let systems = subdirectories_sorted(&self.paths.data).map_err(|_| no_system())?;
        systems
            .first()
            .and_then(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(no_system)
    }
}
