//! Integration tests for the geopush CLI
//!
//! These tests run the binary against a temporary store directory, covering
//! the cycle of: push -> re-push -> exists


use assert_cmd::cargo;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper function to create a geopush command
fn geopush() -> assert_cmd::Command {
    assert_cmd::Command::new(cargo::cargo_bin!("geopush"))
}

/// A temporary workspace with a config file pointing at its own store
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = dir.path().join("store");
        fs::write(
            dir.path().join("config.toml"),
            format!("[store]\npath = {:?}\n", store.display().to_string()),
        )
        .unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn config(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    fn store(&self) -> PathBuf {
        self.path().join("store")
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// A geopush command using this workspace's config
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = geopush();
        cmd.arg("--config").arg(self.config()).current_dir(self.path());
        cmd
    }
}

const BATCH: &str = r#"[
  {"id": 1, "location_point": [52.52, 13.405], "mtime": 1450000000, "text": "Alexanderplatz"},
  {"id": 2, "location_point": [48.137, 11.575], "mtime": 1450000100, "text": "Marienplatz"}
]"#;
