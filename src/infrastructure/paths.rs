//! Filesystem locations for persisted client state.
//!
//! This module owns every path the client touches: the per-platform data
//! directory, the session vault file, and the optional configuration file.
//! Keeping them in one place means the rest of the crate never builds paths
//! by hand.

use std::path::{Path, PathBuf};

/// Directory name under the platform data directory.
const APP_DIR: &str = "libroteca";

/// Returns the default data directory for client storage.
///
/// Resolves to `<platform data dir>/libroteca` (e.g.
/// `~/.local/share/libroteca` on Linux), falling back to a relative
/// `.libroteca` in the working directory when the platform directory cannot
/// be determined.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map_or_else(|| PathBuf::from(".libroteca"), |dir| dir.join(APP_DIR))
}

/// Path of the session vault file inside a data directory.
#[must_use]
pub fn session_file(data_dir: &Path) -> PathBuf {
    data_dir.join("session.json")
}

/// Path of the optional TOML configuration file inside a data directory.
#[must_use]
pub fn config_file(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_paths_live_under_the_data_dir() {
        let dir = PathBuf::from("/tmp/x");
        assert_eq!(session_file(&dir), PathBuf::from("/tmp/x/session.json"));
        assert_eq!(config_file(&dir), PathBuf::from("/tmp/x/config.toml"));
    }
}
