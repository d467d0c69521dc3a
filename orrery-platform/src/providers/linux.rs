//! Linux platform provider. Recognized, but the native build is not wired up.

use crate::traits::PlatformProvider;

pub struct LinuxPlatform;

impl PlatformProvider for LinuxPlatform {
    fn name(&self) -> &'static str {
        "Linux"
    }

    fn supports_native_build(&self) -> bool {
        false
    }

    fn executable_name(&self, base: &str) -> String {
        base.to_string()
    }

    fn shell_command(&self) -> (&'static str, Vec<&'static str>) {
        ("sh", vec!["-c"])
    }

    fn project_file_name(&self, _target: &str) -> String {
        "Makefile".to_string()
    }
}
