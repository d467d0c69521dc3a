//! Provider for hosts that report their family as "Java" (JVM-hosted
//! interpreters). Recognized so the run completes, with no native build.

use crate::traits::PlatformProvider;

pub struct JavaPlatform;

impl PlatformProvider for JavaPlatform {
    fn name(&self) -> &'static str {
        "Java"
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
