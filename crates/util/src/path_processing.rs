use std::env;
use std::path::{Path, PathBuf};

use dirs_next::home_dir;

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Resolve a user-supplied file path: expand `~`, then anchor relative paths
/// at the current working directory.
///
/// The file is not required to exist; reading it reports that.
pub fn resolve_input_path(path: &str) -> PathBuf {
    match env::current_dir() {
        Ok(cwd) => resolve_input_path_from(&cwd, path),
        Err(_) => expand_tilde(path),
    }
}

/// Resolve `path` against an explicit base directory instead of the process
/// working directory.
pub fn resolve_input_path_from(base: &Path, path: &str) -> PathBuf {
    let expanded = expand_tilde(path);
    if expanded.is_absolute() { expanded } else { base.join(expanded) }
}
