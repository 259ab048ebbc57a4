//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get a path to a specific fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Get the valid config fixture path
pub fn valid_config_fixture() -> PathBuf {
    fixture_path("valid_config.toml")
}

/// Get the invalid config fixture path
pub fn invalid_config_fixture() -> PathBuf {
    fixture_path("invalid_config.toml")
}

/// A raid-roster command with no config or environment leaking in
pub fn bare_cmd() -> Command {
    let mut cmd = Command::cargo_bin("raid-roster").unwrap();
    for var in [
        "RAID_ROSTER_CONFIG",
        "RAID_ROSTER_DATA_DIR",
        "RAID_ROSTER_LOG_LEVEL",
        "RAID_ROSTER_LOG_FILE",
        "RAID_ROSTER_LOG_JSON",
        "RAID_ROSTER_DEFAULT_CLASS",
        "RAID_ROSTER_DEFAULT_ICON",
        "RAID_ROSTER_COLOR",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Scratch data directory for one test
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.temp_dir.path().join("data")
    }

    /// A command pointed at this workspace with the fixture config
    pub fn cmd(&self) -> Command {
        let mut cmd = bare_cmd();
        cmd.arg("--config")
            .arg(valid_config_fixture())
            .arg("--data-dir")
            .arg(self.data_dir())
            .arg("--no-color");
        cmd
    }

    /// Run a command that is expected to succeed, returning its stdout
    pub fn run(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).assert().success().get_output().stdout.clone();
        String::from_utf8(output).unwrap()
    }

    /// Contents of a snapshot file, if written
    pub fn snapshot(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.data_dir().join(format!("{}.json", key))).ok()
    }

    pub fn write_snapshot(&self, key: &str, content: &str) {
        fs::create_dir_all(self.data_dir()).unwrap();
        fs::write(self.data_dir().join(format!("{}.json", key)), content).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_dir_exists() {
        assert!(fixtures_dir().exists(), "Fixtures directory should exist");
    }

    #[test]
    fn test_valid_config_exists() {
        assert!(
            valid_config_fixture().exists(),
            "Valid config fixture should exist"
        );
    }

    #[test]
    fn test_invalid_config_exists() {
        assert!(
            invalid_config_fixture().exists(),
            "Invalid config fixture should exist"
        );
    }
}
