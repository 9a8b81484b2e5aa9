//! Command implementations

mod exists;
mod push;
mod serve;

pub use exists::exists;
pub use push::push;
pub use serve::serve;

use std::fs;
use std::io::Read as _;
use std::path::Path;

use anyhow::Context;

use geopush::adapters::JsonFileStore;
use geopush::config::GeopushConfig;

/// Read a payload from a file, or from stdin for `-`
fn read_payload(file: &Path) -> anyhow::Result<String> {
    if file == Path::new("-") {
        let mut payload = String::new();
        std::io::stdin()
            .read_to_string(&mut payload)
            .context("Failed to read payload from stdin")?;
        return Ok(payload);
    }
    fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// Open the configured message store
fn open_store(config: &GeopushConfig) -> anyhow::Result<JsonFileStore> {
    JsonFileStore::open(config.store_dir())
}
