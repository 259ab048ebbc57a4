//! CLI integration tests
//!
//! Tests the command-line interface using assert_cmd

mod common;

use predicates::prelude::*;

use common::{bare_cmd, Workspace};

/// Pull the short id out of an "Added Name (Class) [abcd1234]" line
fn short_id(added: &str) -> String {
    let start = added.find('[').unwrap() + 1;
    let end = added.find(']').unwrap();
    added[start..end].to_string()
}

// ─────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    bare_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("raid-roster"))
        .stdout(predicate::str::contains("character"))
        .stdout(predicate::str::contains("roster"))
        .stdout(predicate::str::contains("assign"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    bare_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("raid-roster"))
        .stdout(predicate::str::contains("commit"))
        .stdout(predicate::str::contains("compiler"));
}

#[test]
fn test_short_version_flag() {
    bare_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("raid-roster"));
}

#[test]
fn test_classes_command() {
    let ws = Workspace::new();
    let out = ws.run(&["classes"]);
    assert!(out.contains("Death Knight"));
    assert!(out.contains("Tank, Healer, Melee, Ranged"));
    // Listing writes nothing
    assert!(ws.snapshot("characters").is_none());
}

// ─────────────────────────────────────────────────────────────────
// Planner Scenario Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_thrall_scenario() {
    let ws = Workspace::new();

    let added = ws.run(&["character", "add", "Thrall", "--class", "shaman"]);
    assert!(added.contains("Thrall (Shaman)"));

    ws.run(&["roster", "create", "Heroic Boss"]);

    ws.cmd()
        .args(["assign", "Thrall", "healer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assigned Thrall"));

    // Second assignment in the same roster is refused but not an error
    ws.cmd()
        .args(["assign", "Thrall", "melee"])
        .assert()
        .success()
        .stderr(predicate::str::contains("already assigned to Healer"));

    let table = ws.run(&["roster", "show"]);
    assert!(table.contains("Healer (1)"));
    assert!(table.contains("Melee (0)"));

    ws.run(&["unassign", "Thrall"]);
    let table = ws.run(&["roster", "show", "Heroic Boss"]);
    assert!(table.contains("Healer (0)"));

    let list = ws.run(&["character", "list"]);
    assert!(list.contains("0 fight(s)"));
}

#[test]
fn test_participation_across_rosters() {
    let ws = Workspace::new();
    ws.run(&["character", "add", "Jaina", "--class", "Mage"]);
    ws.run(&["roster", "create", "One", "--icon", "1️⃣"]);
    ws.run(&["roster", "create", "Two", "--icon", "2️⃣"]);

    ws.run(&["assign", "Jaina", "ranged", "--roster", "One"]);
    ws.run(&["assign", "Jaina", "standby", "--roster", "Two"]);

    let list = ws.run(&["character", "list"]);
    assert!(list.contains("2 fight(s)"));
}

#[test]
fn test_duplicate_roster_is_rejected() {
    let ws = Workspace::new();
    ws.run(&["roster", "create", "Ragnaros"]);

    ws.cmd()
        .args(["roster", "create", "Ragnaros"])
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));

    let list = ws.run(&["roster", "list"]);
    assert_eq!(list.matches("Ragnaros").count(), 1);
}

#[test]
fn test_role_outside_class_is_refused() {
    let ws = Workspace::new();
    ws.run(&["character", "add", "Valeera", "--class", "Rogue"]);
    ws.run(&["roster", "create", "Boss"]);

    ws.cmd()
        .args(["assign", "Valeera", "tank"])
        .assert()
        .success()
        .stderr(predicate::str::contains("cannot fill Tank"));

    let table = ws.run(&["roster", "show"]);
    assert!(table.contains("Tank (0)"));
}

#[test]
fn test_assign_without_roster() {
    let ws = Workspace::new();
    ws.run(&["character", "add", "Anduin", "--class", "Priest"]);

    ws.cmd()
        .args(["assign", "Anduin", "healer"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No roster selected"));
    assert!(ws.snapshot("rosters").is_none());
}

#[test]
fn test_select_roster() {
    let ws = Workspace::new();
    ws.run(&["roster", "create", "First"]);
    ws.run(&["roster", "create", "Second"]);

    let list = ws.run(&["roster", "list"]);
    assert!(list.contains("* 💀 Second"));

    ws.run(&["roster", "select", "First"]);
    let list = ws.run(&["roster", "list"]);
    assert!(list.contains("* 💀 First"));

    ws.cmd()
        .args(["roster", "select", "Missing"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no roster named 'Missing'"));
    assert_eq!(ws.snapshot("selected").as_deref(), Some("\"First\""));
}

// ─────────────────────────────────────────────────────────────────
// Persistence Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_snapshots_written_with_field_names() {
    let ws = Workspace::new();
    ws.run(&["character", "add", "Thrall", "--class", "Shaman"]);
    ws.run(&["roster", "create", "Boss", "--icon", "👑"]);
    ws.run(&["assign", "Thrall", "ranged"]);

    let characters = ws.snapshot("characters").unwrap();
    assert!(characters.contains("\"className\":\"Shaman\""));

    let rosters = ws.snapshot("rosters").unwrap();
    assert!(rosters.contains("\"bossName\":\"Boss\""));
    assert!(rosters.contains("\"icon\":\"👑\""));
    assert!(rosters.contains("\"Ranged\":[{"));
}

#[test]
fn test_removed_character_stays_in_roster() {
    let ws = Workspace::new();
    let added = ws.run(&["character", "add", "Varian", "--class", "Warrior"]);
    ws.run(&["roster", "create", "Boss"]);
    ws.run(&["assign", "Varian", "tank"]);

    ws.cmd()
        .args(["character", "remove", "Varian"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Still listed in 1 roster slot(s)"));

    let table = ws.run(&["roster", "show"]);
    assert!(table.contains("Varian Warrior"));

    // Orphans resolve from the roster itself
    ws.run(&["unassign", &short_id(&added)]);
    let table = ws.run(&["roster", "show"]);
    assert!(table.contains("Tank (0)"));
}

#[test]
fn test_unassign_prefers_roster_entry_over_reused_name() {
    let ws = Workspace::new();
    ws.run(&["character", "add", "Varian", "--class", "Warrior"]);
    ws.run(&["roster", "create", "Boss"]);
    ws.run(&["assign", "Varian", "tank"]);
    ws.run(&["character", "remove", "Varian"]);

    // A newer character takes the old name
    ws.run(&["character", "add", "Varian", "--class", "Warrior"]);

    ws.cmd()
        .args(["unassign", "Varian"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Not applied").not());
    let table = ws.run(&["roster", "show"]);
    assert!(table.contains("Tank (0)"));
}

#[test]
fn test_character_name_is_trimmed_on_add() {
    let ws = Workspace::new();
    ws.run(&["character", "add", "  Jaina ", "--class", "Mage"]);

    let characters = ws.snapshot("characters").unwrap();
    assert!(characters.contains("\"name\":\"Jaina\""));
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let ws = Workspace::new();
    ws.write_snapshot("characters", "{not json");

    ws.cmd()
        .args(["character", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No characters yet"));
}

#[test]
fn test_ambiguous_character_is_error() {
    let ws = Workspace::new();
    ws.run(&["character", "add", "Twin", "--class", "Mage"]);
    ws.run(&["character", "add", "Twin", "--class", "Priest"]);
    ws.run(&["roster", "create", "Boss"]);

    ws.cmd()
        .args(["assign", "twin", "ranged"])
        .assert()
        .code(40)
        .stderr(predicate::str::contains("E400"));
}

#[test]
fn test_unknown_character_notice() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["character", "remove", "Nobody"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no character 'Nobody'"));
}

// ─────────────────────────────────────────────────────────────────
// Config Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_with_fixture() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[storage]"))
        .stdout(predicate::str::contains("[logging]"))
        .stdout(predicate::str::contains("[defaults]"))
        .stdout(predicate::str::contains("[display]"));
}

#[test]
fn test_config_validate_nonexistent_file() {
    bare_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg("/nonexistent/path/config.toml")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_config_init_help() {
    bare_cmd()
        .arg("config")
        .arg("init")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialize"))
        .stdout(predicate::str::contains("--path"))
        .stdout(predicate::str::contains("--force"));
}

// ─────────────────────────────────────────────────────────────────
// Verbosity Flag Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_verbose_flag() {
    let ws = Workspace::new();
    ws.cmd().arg("-vv").args(["roster", "list"]).assert().success();
}

#[test]
fn test_quiet_flag() {
    let ws = Workspace::new();
    ws.cmd().arg("--quiet").args(["roster", "list"]).assert().success();
}

// ─────────────────────────────────────────────────────────────────
// Error Handling Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_command() {
    bare_cmd()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_unknown_role() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["assign", "Thrall", "dps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown role"));
}

#[test]
fn test_missing_subcommand() {
    bare_cmd().assert().failure();
}
