//! Windows platform provider implementation.

use crate::traits::PlatformProvider;

/// Windows platform provider. The only platform with a native build.
pub struct WindowsPlatform;

impl PlatformProvider for WindowsPlatform {
    fn name(&self) -> &'static str {
        "Windows"
    }

    fn supports_native_build(&self) -> bool {
        true
    }

    fn executable_name(&self, base: &str) -> String {
        if base.ends_with(".exe") {
            base.to_string()
        } else {
            format!("{}.exe", base)
        }
    }

    fn shell_command(&self) -> (&'static str, Vec<&'static str>) {
        ("cmd.exe", vec!["/c"])
    }

    fn project_file_name(&self, target: &str) -> String {
        format!("{}.sln", target)
    }
}
