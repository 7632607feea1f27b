//! Launch-type inference for manifest action targets

use crate::cave::LaunchType;
use crate::launch::operations::BinaryProbe;
use crate::platform::Platform;

use std::path::Path;

use super::target::is_url;

const NATIVE_EXTENSIONS: &[&str] = &["app", "exe", "bat", "sh"];
const HTML_EXTENSIONS: &[&str] = &["htm", "html"];

/// Infer how to run `target`. First match wins:
/// 1. native extension
/// 2. html extension
/// 3. http(s) URL
/// 4. binary probe says it's an executable for this platform
/// 5. shell script fallback
pub fn classify_target(target: &str, platform: Platform, probe: &dyn BinaryProbe) -> LaunchType {
    let extension = Path::new(target)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if NATIVE_EXTENSIONS.contains(&extension.as_str()) {
        return LaunchType::Native;
    }
    if HTML_EXTENSIONS.contains(&extension.as_str()) {
        return LaunchType::Html;
    }
    if is_url(target) {
        return LaunchType::External;
    }

    let probed = probe.probe(Path::new(target));
    match platform {
        Platform::Linux if probed.is_linux_executable => LaunchType::Native,
        Platform::MacOs if probed.is_mac_executable => LaunchType::Native,
        _ => LaunchType::Shell,
    }
}
