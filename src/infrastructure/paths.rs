//! Platform locations for the configuration file and span exports.
//!
//! Resolved through `directories`, so Linux gets XDG paths
//! (`~/.config/marquee`, `~/.local/share/marquee`), macOS gets
//! `~/Library/Application Support/marquee`, and so on.

use directories::ProjectDirs;
use std::path::PathBuf;

/// File name looked up in the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// File name of the span export in the data directory.
pub const TRACE_FILE_NAME: &str = "spans.jsonl";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "marquee")
}

/// Per-user data directory, or `None` when no home directory is known.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Per-user configuration directory.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Where `config.toml` is looked up when `--config` is not given.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Where spans go when export is requested without an explicit path.
#[must_use]
pub fn default_trace_file() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(TRACE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_live_under_project_dirs() {
        if let (Some(config), Some(dir)) = (default_config_file(), config_dir()) {
            assert_eq!(config, dir.join("config.toml"));
        }
        if let Some(trace) = default_trace_file() {
            assert!(trace.ends_with("spans.jsonl"));
        }
    }
}
