//! Platform registry for detecting and providing platform implementations.

use std::env;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::providers::{JavaPlatform, LinuxPlatform, MacOSPlatform, WindowsPlatform};
use crate::traits::PlatformProvider;

/// Environment variable overriding the detected operating system family.
pub const PLATFORM_ENV: &str = "ORRERY_PLATFORM";

/// The platform string matched none of the recognized families.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognised System Platform: {0}")]
pub struct PlatformError(pub String);

/// Platform registry for detecting the current platform and creating providers.
pub struct PlatformRegistry;

impl PlatformRegistry {
    /// Get a platform provider by family name (case-insensitive).
    ///
    /// # Arguments
    /// * `name` - Platform name ("Windows", "Linux", "Darwin", "Java", or an alias)
    pub fn for_name(name: &str) -> Result<Arc<dyn PlatformProvider>, PlatformError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "windows" | "win32" => Ok(Arc::new(WindowsPlatform)),
            "linux" => Ok(Arc::new(LinuxPlatform)),
            "darwin" | "macos" | "osx" => Ok(Arc::new(MacOSPlatform)),
            "java" => Ok(Arc::new(JavaPlatform)),
            _ => Err(PlatformError(name.to_string())),
        }
    }

    /// Operating system family of the host, spelled the way `for_name`
    /// expects. Unknown hosts come back verbatim so the error can name them.
    pub fn host_system_name() -> String {
        system_name_for(env::consts::OS)
    }

    /// Detect the platform, honouring the `ORRERY_PLATFORM` override.
    pub fn detect() -> Result<Arc<dyn PlatformProvider>, PlatformError> {
        let name = match env::var(PLATFORM_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                debug!("Platform overridden by {}={}", PLATFORM_ENV, value);
                value
            }
            _ => Self::host_system_name(),
        };
        Self::for_name(&name)
    }

    /// Names accepted by `for_name`, canonical spelling first.
    pub fn supported_platforms() -> &'static [&'static str] {
        &["Windows", "Linux", "Darwin", "Java"]
    }
}

fn system_name_for(os: &str) -> String {
    match os {
        "windows" => "Windows".to_string(),
        "linux" => "Linux".to_string(),
        "macos" => "Darwin".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_for_name_recognizes_families() {
        assert_eq!(PlatformRegistry::for_name("Windows").unwrap().name(), "Windows");
        assert_eq!(PlatformRegistry::for_name("win32").unwrap().name(), "Windows");
        assert_eq!(PlatformRegistry::for_name("linux").unwrap().name(), "Linux");
        assert_eq!(PlatformRegistry::for_name("Darwin").unwrap().name(), "Darwin");
        assert_eq!(PlatformRegistry::for_name("macos").unwrap().name(), "Darwin");
        assert_eq!(PlatformRegistry::for_name("Java").unwrap().name(), "Java");
    }

    #[test]
    fn test_unrecognized_platform_names_itself() {
        let Err(err) = PlatformRegistry::for_name("Plan9") else {
            panic!("Plan9 should not be recognized");
        };
        assert_eq!(err, PlatformError("Plan9".to_string()));
        assert_eq!(err.to_string(), "Unrecognised System Platform: Plan9");
    }

    #[test]
    fn test_only_windows_builds_natively() {
        for name in PlatformRegistry::supported_platforms() {
            let provider = PlatformRegistry::for_name(name).unwrap();
            assert_eq!(provider.supports_native_build(), *name == "Windows");
        }
    }

    #[test]
    fn test_host_system_mapping() {
        assert_eq!(system_name_for("windows"), "Windows");
        assert_eq!(system_name_for("macos"), "Darwin");
        assert_eq!(system_name_for("freebsd"), "freebsd");
    }

    #[test]
    #[serial]
    fn test_detect_honours_override() {
        env::set_var(PLATFORM_ENV, "Darwin");
        let detected = PlatformRegistry::detect();
        env::remove_var(PLATFORM_ENV);
        assert_eq!(detected.unwrap().name(), "Darwin");
    }

    #[test]
    #[serial]
    fn test_detect_override_can_be_unrecognized() {
        env::set_var(PLATFORM_ENV, "Haiku");
        let detected = PlatformRegistry::detect();
        env::remove_var(PLATFORM_ENV);
        assert!(matches!(detected, Err(PlatformError(name)) if name == "Haiku"));
    }

    #[test]
    #[serial]
    fn test_detect_host() {
        env::remove_var(PLATFORM_ENV);
        if let Ok(provider) = PlatformRegistry::detect() {
            assert!(PlatformRegistry::supported_platforms().contains(&provider.name()));
        }
    }
}
