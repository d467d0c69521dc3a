//! Dependency provisioning for orrery.
//!
//! Each dependency is cloned, pinned to its revision and configured with the
//! project generator. Progress is kept per dependency in a status record so an
//! interrupted run picks up where it stopped.

pub mod error;
pub mod provisioner;
pub mod state;

pub use error::ProvisionError;
pub use provisioner::{ProvisionOutcome, Provisioner};
pub use state::{DependencyEntry, DependencyStatus, StateRecord};
