use std::path::{Path, PathBuf};

use anyhow::Context;
use classpatch::classfile::ConstantPoolPatcher;

/// Read a class file into a patcher.
pub fn load_class(path: &Path) -> anyhow::Result<ConstantPoolPatcher> {
    ConstantPoolPatcher::from_file(path)
        .with_context(|| format!("failed to read class file: {}", path.display()))
}

/// `<FILE>.patched`, next to the input.
pub fn default_output_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".patched");
    PathBuf::from(name)
}

/// Quote a literal for display, escaping control characters.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text.escape_debug())
}
