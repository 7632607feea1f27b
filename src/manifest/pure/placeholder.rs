// Path placeholder expansion (pure, no I/O)

use crate::platform::Platform;

pub const EXT_PLACEHOLDER: &str = "{{EXT}}";

/// Replace `{{EXT}}` with the platform's executable extension
pub fn expand_placeholders(path: &str, platform: Platform) -> String {
    path.replace(EXT_PLACEHOLDER, platform.executable_extension())
}
