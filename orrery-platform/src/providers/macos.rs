//! macOS platform provider. Recognized, but the native build is not wired up.

use crate::traits::PlatformProvider;

pub struct MacOSPlatform;

impl PlatformProvider for MacOSPlatform {
    fn name(&self) -> &'static str {
        "Darwin"
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

    fn project_file_name(&self, target: &str) -> String {
        format!("{}.xcodeproj", target)
    }
}
