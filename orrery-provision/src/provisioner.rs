// Standard library
use std::fs;
use std::path::Path;

// External crates
use tracing::{debug, info, warn};

// Internal imports
use crate::error::ProvisionError;
use crate::state::{DependencyStatus, StateRecord};
use orrery_config::{DependencySpec, WorkspacePaths};
use orrery_core::file_system::{dir_exists, remove_path_protected};
use orrery_core::{CommandError, CommandRunner, CommandSpec};

/// What `ensure` did for one dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// Already provisioned; nothing ran and nothing was written.
    Skipped {
        status: DependencyStatus,
        /// Revision stored in the status record, if any
        recorded_revision: Option<String>,
    },
    /// Provisioning ran, starting from `resumed_from`.
    Provisioned { resumed_from: DependencyStatus },
}

impl ProvisionOutcome {
    /// Recorded revision differing from the requested one, for skipped
    /// dependencies.
    pub fn revision_drift<'a>(&'a self, spec: &DependencySpec) -> Option<&'a str> {
        match self {
            ProvisionOutcome::Skipped {
                recorded_revision: Some(recorded),
                ..
            } if *recorded != spec.revision => Some(recorded),
            _ => None,
        }
    }
}

/// Brings pinned source dependencies to the `Configured` state with git and
/// the project generator, resuming from the recorded status.
pub struct Provisioner<'a> {
    runner: &'a dyn CommandRunner,
    paths: &'a WorkspacePaths,
    generator: &'a str,
}

impl<'a> Provisioner<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        paths: &'a WorkspacePaths,
        generator: &'a str,
    ) -> Self {
        Self {
            runner,
            paths,
            generator,
        }
    }

    /// Current status of `spec`, derived from its directory and the record.
    pub fn status(&self, spec: &DependencySpec) -> Result<DependencyStatus, ProvisionError> {
        let record = StateRecord::load(&self.paths.state_file())?;
        Ok(self.derive_status(&record, spec))
    }

    fn derive_status(&self, record: &StateRecord, spec: &DependencySpec) -> DependencyStatus {
        if !dir_exists(&self.paths.dependency_dir(&spec.name)) {
            return DependencyStatus::Absent;
        }
        match record.entry(&spec.name) {
            Some(entry) => entry.status,
            // Left behind by an earlier tool run without a record.
            None => DependencyStatus::Configured,
        }
    }

    /// Provision one dependency. Does nothing when it is already configured
    /// or built. Failures leave directories in place; the record lets the
    /// next call resume at the failed step.
    pub fn ensure(&self, spec: &DependencySpec) -> Result<ProvisionOutcome, ProvisionError> {
        fs::create_dir_all(&self.paths.dependencies)
            .map_err(|e| ProvisionError::io(&self.paths.dependencies, e))?;

        let state_file = self.paths.state_file();
        let mut record = StateRecord::load(&state_file)?;
        let status = self.derive_status(&record, spec);

        if status.is_provisioned() {
            debug!(dependency = %spec.name, %status, "already provisioned");
            return Ok(ProvisionOutcome::Skipped {
                status,
                recorded_revision: record.entry(&spec.name).map(|e| e.revision.clone()),
            });
        }

        info!(dependency = %spec.name, from = %status, "provisioning");
        let dependency_dir = self.paths.dependency_dir(&spec.name);

        if status == DependencyStatus::Absent {
            record.set(&spec.name, DependencyStatus::Absent, &spec.revision);
            record.save(&state_file)?;

            if dependency_dir.exists() {
                warn!(dependency = %spec.name, "removing partial clone");
                remove_path_protected(&dependency_dir)
                    .map_err(|e| ProvisionError::io(&dependency_dir, e))?;
            }

            self.clone_repository(spec)?;
            record.set(&spec.name, DependencyStatus::Cloned, &spec.revision);
            record.save(&state_file)?;
        }

        self.checkout(spec, &dependency_dir)?;
        self.configure(spec)?;
        record.set(&spec.name, DependencyStatus::Configured, &spec.revision);
        record.save(&state_file)?;

        Ok(ProvisionOutcome::Provisioned {
            resumed_from: status,
        })
    }

    /// `ensure` each spec in order, stopping at the first failure.
    pub fn ensure_all(
        &self,
        specs: &[DependencySpec],
    ) -> Result<Vec<ProvisionOutcome>, ProvisionError> {
        specs.iter().map(|spec| self.ensure(spec)).collect()
    }

    /// Record a successful build of `spec`.
    pub fn mark_built(&self, spec: &DependencySpec) -> Result<(), ProvisionError> {
        let state_file = self.paths.state_file();
        let mut record = StateRecord::load(&state_file)?;
        record.set(&spec.name, DependencyStatus::Built, &spec.revision);
        record.save(&state_file)
    }

    fn clone_repository(&self, spec: &DependencySpec) -> Result<(), ProvisionError> {
        let mut command = CommandSpec::new("git").arg("clone");
        if let Some(branch) = &spec.branch {
            command = command.args(["--branch", branch.as_str()]);
        }
        let command = command
            .args([spec.repository.as_str(), spec.name.as_str()])
            .current_dir(&self.paths.dependencies);

        self.run_checked(&command)
            .map_err(|source| ProvisionError::Clone {
                name: spec.name.clone(),
                source,
            })
    }

    fn checkout(&self, spec: &DependencySpec, dependency_dir: &Path) -> Result<(), ProvisionError> {
        let command = CommandSpec::new("git")
            .args(["checkout", spec.revision.as_str()])
            .current_dir(dependency_dir);

        self.run_checked(&command)
            .map_err(|source| ProvisionError::Checkout {
                name: spec.name.clone(),
                revision: spec.revision.clone(),
                source,
            })
    }

    fn configure(&self, spec: &DependencySpec) -> Result<(), ProvisionError> {
        let build_dir = self.paths.dependency_build_dir(&spec.name);
        fs::create_dir_all(&build_dir).map_err(|e| ProvisionError::io(&build_dir, e))?;

        let command = CommandSpec::new(self.generator)
            .arg("..")
            .args(&spec.generator_args)
            .current_dir(&build_dir);

        self.run_checked(&command)
            .map_err(|source| ProvisionError::Configure {
                name: spec.name.clone(),
                source,
            })
    }

    fn run_checked(&self, command: &CommandSpec) -> Result<(), CommandError> {
        self.runner.run(command)?.check()?;
        Ok(())
    }
}
