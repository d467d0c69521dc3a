//! Per-dependency provisioning status, persisted next to the dependencies.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProvisionError;

/// Progress of one dependency through provisioning and building.
///
/// Ordered: a dependency only ever moves forward unless its directory
/// disappears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    Absent,
    Cloned,
    Configured,
    Built,
}

impl DependencyStatus {
    /// Generation has run; nothing left for provisioning to do.
    pub fn is_provisioned(self) -> bool {
        self >= DependencyStatus::Configured
    }
}

impl fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DependencyStatus::Absent => "absent",
            DependencyStatus::Cloned => "cloned",
            DependencyStatus::Configured => "configured",
            DependencyStatus::Built => "built",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEntry {
    pub status: DependencyStatus,
    /// Revision the status was reached with
    pub revision: String,
}

/// Contents of `.orrery-state.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    #[serde(default)]
    dependencies: BTreeMap<String, DependencyEntry>,
}

impl StateRecord {
    /// Read the record; a missing file is an empty record.
    pub fn load(path: &Path) -> Result<Self, ProvisionError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ProvisionError::io(path, e)),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).map_err(|source| ProvisionError::StateParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the record through a temporary file in the same directory so a
    /// crash never leaves a truncated record behind.
    pub fn save(&self, path: &Path) -> Result<(), ProvisionError> {
        let write_failed = |source: std::io::Error| ProvisionError::StateWrite {
            path: path.to_path_buf(),
            source,
        };
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| write_failed(std::io::Error::new(ErrorKind::InvalidData, e)))?;

        let mut temp_file = tempfile::Builder::new()
            .prefix(".orrery-state-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(write_failed)?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(write_failed)?;
        temp_file.persist(path).map_err(|e| write_failed(e.error))?;
        Ok(())
    }

    pub fn entry(&self, name: &str) -> Option<&DependencyEntry> {
        self.dependencies.get(name)
    }

    pub fn set(&mut self, name: &str, status: DependencyStatus, revision: &str) {
        self.dependencies.insert(
            name.to_string(),
            DependencyEntry {
                status,
                revision: revision.to_string(),
            },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}
