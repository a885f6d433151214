//! Config path resolution helpers.

use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "pkgdock.json";

/// Config file living next to the given executable.
pub fn config_path_for_exe(exe: &Path) -> Option<PathBuf> {
    exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Resolve the default config location.
///
/// Prefers the directory of the running executable so the config travels with
/// the tool; falls back to the user's config directory.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    if let Some(path) = std::env::current_exe()
        .ok()
        .as_deref()
        .and_then(config_path_for_exe)
    {
        return Ok(path);
    }

    let global_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("pkgdock");
    Ok(global_dir.join(CONFIG_FILE_NAME))
}
