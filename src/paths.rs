//! Centralized path definitions for geopush
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.config/geopush/
//! └── config.toml               # User configuration
//!
//! ~/.local/share/geopush/       # Default JSON file store
//! ├── messages.json
//! └── profiles.json
//! ```
//!
//! Platform directories come from the `dirs` crate; when a platform has no
//! such directory the paths fall back to `~/.geopush`.

use std::path::PathBuf;

/// Application directory name
const APP_DIR: &str = "geopush";

/// Fallback directory name under the home directory
const FALLBACK_DIR: &str = ".geopush";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

fn fallback_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(FALLBACK_DIR)
}

/// Get the configuration directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir().map_or_else(fallback_dir, |d| d.join(APP_DIR))
}

/// Get path to the configuration file.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Get the default data directory of the JSON file store.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(fallback_dir, |d| d.join(APP_DIR))
}
