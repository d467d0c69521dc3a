//! Platform-specific provider implementations.
//!
//! Providers are compiled on every host so the dispatch logic can be
//! exercised for any platform name.

pub mod java;
pub mod linux;
pub mod macos;
pub mod windows;

pub use java::JavaPlatform;
pub use linux::LinuxPlatform;
pub use macos::MacOSPlatform;
pub use windows::WindowsPlatform;
