//! Configuration system tests
//!
//! Tests configuration loading, validation, and environment overrides

mod common;

use std::fs;
use std::path::PathBuf;

use predicates::prelude::*;
use tempfile::TempDir;

use common::{bare_cmd, invalid_config_fixture, valid_config_fixture};

/// Test fixture for configuration testing
struct ConfigFixture {
    temp_dir: TempDir,
    config_path: PathBuf,
}

impl ConfigFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        Self { temp_dir, config_path }
    }

    fn write_config(&self, content: &str) {
        fs::write(&self.config_path, content).unwrap();
    }

    fn path(&self) -> &str {
        self.config_path.to_str().unwrap()
    }

    fn data_dir(&self) -> PathBuf {
        self.temp_dir.path().join("data")
    }

    fn validate(&self) -> assert_cmd::assert::Assert {
        bare_cmd()
            .args(["config", "validate", "--config", self.path()])
            .assert()
    }
}

// ─────────────────────────────────────────────────────────────────
// Valid Configuration Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_valid_fixture() {
    bare_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(valid_config_fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_empty_config_uses_defaults() {
    let fixture = ConfigFixture::new();
    fixture.write_config("");

    fixture.validate().success();

    bare_cmd()
        .args(["config", "show", "--config", fixture.path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("class = \"Warrior\""))
        .stdout(predicate::str::contains("level = \"warn\""));
}

#[test]
fn test_partial_config() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[defaults]
class = "Paladin"
"#,
    );

    fixture.validate().success();
}

#[test]
fn test_config_data_dir_is_used() {
    let fixture = ConfigFixture::new();
    fixture.write_config(&format!(
        "[storage]\ndata_dir = \"{}\"\n",
        fixture.data_dir().display()
    ));

    bare_cmd()
        .args(["roster", "create", "Onyxia", "--config", fixture.path()])
        .assert()
        .success();

    assert!(fixture.data_dir().join("rosters.json").exists());
}

#[test]
fn test_default_class_from_config() {
    let fixture = ConfigFixture::new();
    fixture.write_config(&format!(
        "[storage]\ndata_dir = \"{}\"\n\n[defaults]\nclass = \"Hunter\"\nboss_icon = \"👑\"\n",
        fixture.data_dir().display()
    ));

    bare_cmd()
        .args(["character", "add", "Rexxar", "--config", fixture.path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rexxar (Hunter)"));

    bare_cmd()
        .args(["roster", "create", "Boss", "--config", fixture.path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created roster 👑 Boss"));
}

// ─────────────────────────────────────────────────────────────────
// Invalid Configuration Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_fixture() {
    bare_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(invalid_config_fixture())
        .assert()
        .code(10)
        .stderr(predicate::str::contains("E102"));
}

#[test]
fn test_invalid_log_level() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[logging]
level = "verbose"
"#,
    );

    fixture
        .validate()
        .failure()
        .stderr(predicate::str::contains("Invalid log level"));
}

#[test]
fn test_unknown_default_class() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[defaults]
class = "Necromancer"
"#,
    );

    fixture
        .validate()
        .failure()
        .stderr(predicate::str::contains("Necromancer"));
}

#[test]
fn test_malformed_toml() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[storage\ndata_dir = ");

    fixture
        .validate()
        .code(10)
        .stderr(predicate::str::contains("E101"));
}

#[test]
fn test_wrong_value_type() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[display]
color = "sometimes"
"#,
    );

    fixture.validate().failure();
}

// ─────────────────────────────────────────────────────────────────
// Environment Override Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[logging]
level = "info"
"#,
    );

    bare_cmd()
        .env("RAID_ROSTER_LOG_LEVEL", "nonsense")
        .args(["config", "validate", "--config", fixture.path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonsense"));
}

#[test]
fn test_env_config_path() {
    let fixture = ConfigFixture::new();
    fixture.write_config("");

    bare_cmd()
        .env("RAID_ROSTER_CONFIG", fixture.path())
        .args(["config", "validate"])
        .assert()
        .success();
}

#[test]
fn test_env_data_dir() {
    let fixture = ConfigFixture::new();
    fixture.write_config("");

    bare_cmd()
        .env("RAID_ROSTER_DATA_DIR", fixture.data_dir())
        .args(["character", "add", "Tyrande", "--class", "Priest", "--config", fixture.path()])
        .assert()
        .success();

    let saved = fs::read_to_string(fixture.data_dir().join("characters.json")).unwrap();
    assert!(saved.contains("Tyrande"));
}

// ─────────────────────────────────────────────────────────────────
// Config Init Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_init_writes_valid_file() {
    let fixture = ConfigFixture::new();

    bare_cmd()
        .args(["config", "init", "--path", fixture.path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));

    fixture.validate().success();

    // A second init without --force refuses to overwrite
    bare_cmd()
        .args(["config", "init", "--path", fixture.path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    bare_cmd()
        .args(["config", "init", "--path", fixture.path(), "--force"])
        .assert()
        .success();
}
