//! Platform detection and dispatch for orrery.
//!
//! All platform differences live in [`PlatformProvider`] implementations;
//! the registry maps an operating system family name to one of them or fails
//! with a [`PlatformError`] naming the unrecognized platform.

pub mod providers;
pub mod registry;
pub mod traits;

pub use registry::{PlatformError, PlatformRegistry, PLATFORM_ENV};
pub use traits::PlatformProvider;
