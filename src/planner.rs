//! Planner context
//!
//! Owns the character registry, the roster engine and the snapshot store.
//! Every applied command rewrites the affected snapshot; rejected commands
//! write nothing. Store failures are logged and never reach the caller.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::ExtendedRole;
use crate::error::Error;
use crate::registry::{Character, CharacterRegistry};
use crate::roster::{BossRoster, Outcome, Rejection, RosterEngine};
use crate::store::{SnapshotStore, CHARACTERS_KEY, ROSTERS_KEY, SELECTED_KEY};

pub struct Planner {
    registry: CharacterRegistry,
    engine: RosterEngine,
    store: Box<dyn SnapshotStore>,
}

impl Planner {
    /// Load state from `store`. Missing or unreadable snapshots start empty.
    pub fn load(store: Box<dyn SnapshotStore>) -> Self {
        let characters: Vec<Character> =
            read_snapshot(store.as_ref(), CHARACTERS_KEY).unwrap_or_default();
        let rosters: Vec<BossRoster> =
            read_snapshot(store.as_ref(), ROSTERS_KEY).unwrap_or_default();
        let selected: Option<String> =
            read_snapshot(store.as_ref(), SELECTED_KEY).unwrap_or_default();

        debug!(
            characters = characters.len(),
            rosters = rosters.len(),
            selected = ?selected,
            "Planner state loaded"
        );

        Self {
            registry: CharacterRegistry::from_characters(characters),
            engine: RosterEngine::from_snapshot(rosters, selected),
            store,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────

    pub fn add_character(&mut self, name: &str, class_name: &str) -> Outcome<Character> {
        let outcome = self.registry.add_character(name, class_name);
        if outcome.is_applied() {
            self.save_characters();
        }
        outcome
    }

    /// Delete a character from the pool. Roster entries for it survive.
    pub fn remove_character(&mut self, id: &str) -> Outcome<Character> {
        let outcome = self.registry.remove_character(id);
        if outcome.is_applied() {
            self.save_characters();
        }
        outcome
    }

    pub fn create_roster(&mut self, boss_name: &str, icon: &str) -> Outcome<BossRoster> {
        let outcome = self.engine.create_roster(boss_name, icon);
        if outcome.is_applied() {
            self.save_rosters();
            self.save_selected();
        }
        outcome
    }

    /// Assign a registered character. Unknown ids are rejected, so rosters
    /// only ever gain references to characters that exist at that moment.
    pub fn assign(&mut self, boss_name: &str, character_id: &str, role: ExtendedRole) -> Outcome {
        let Some(character) = self.registry.get(character_id) else {
            debug!(character_id, "Assign ignored, character not registered");
            return Outcome::Rejected(Rejection::CharacterNotFound {
                id: character_id.to_string(),
            });
        };

        let outcome = self.engine.assign(boss_name, character, role);
        if outcome.is_applied() {
            self.save_rosters();
        }
        outcome
    }

    pub fn unassign(&mut self, boss_name: &str, character_id: &str, role: ExtendedRole) -> Outcome {
        let outcome = self.engine.unassign(boss_name, character_id, role);
        if outcome.is_applied() {
            self.save_rosters();
        }
        outcome
    }

    pub fn select_roster(&mut self, boss_name: &str) -> Outcome {
        let outcome = self.engine.select_roster(boss_name);
        if outcome.is_applied() {
            self.save_selected();
        }
        outcome
    }

    // ─────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────

    pub fn registry(&self) -> &CharacterRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &RosterEngine {
        &self.engine
    }

    /// Characters in insertion order.
    pub fn characters(&self) -> &[Character] {
        self.registry.characters()
    }

    pub fn rosters_view(&self) -> &[BossRoster] {
        self.engine.rosters_view()
    }

    pub fn selected_roster(&self) -> Option<&BossRoster> {
        self.engine.selected_roster()
    }

    /// (roster, slot) placements of a character across all rosters.
    pub fn participation_count(&self, character_id: &str) -> usize {
        self.engine.participation_count(character_id)
    }

    // ─────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────

    fn save_characters(&self) {
        write_snapshot(self.store.as_ref(), CHARACTERS_KEY, self.registry.characters());
    }

    fn save_rosters(&self) {
        write_snapshot(self.store.as_ref(), ROSTERS_KEY, self.engine.rosters_view());
    }

    fn save_selected(&self) {
        write_snapshot(self.store.as_ref(), SELECTED_KEY, &self.engine.selected_name());
    }
}

/// Decode the snapshot under `key`, logging and discarding any failure.
fn read_snapshot<T: DeserializeOwned>(store: &dyn SnapshotStore, key: &str) -> Option<T> {
    let text = match store.read(key) {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!(key, "No snapshot saved, starting empty");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e.format_for_log(), "Snapshot unreadable, starting empty");
            return None;
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(source) => {
            let e = Error::SnapshotDecode {
                key: key.to_string(),
                source,
            };
            warn!(key, error = %e.format_for_log(), "Snapshot corrupt, starting empty");
            None
        }
    }
}

/// Encode and write a full snapshot. Failures are logged, not returned.
fn write_snapshot<T: Serialize + ?Sized>(store: &dyn SnapshotStore, key: &str, value: &T) {
    let text = match serde_json::to_string(value) {
        Ok(text) => text,
        Err(source) => {
            let e = Error::SnapshotEncode {
                key: key.to_string(),
                source,
            };
            warn!(key, error = %e.format_for_log(), "Snapshot not saved");
            return;
        }
    };

    if let Err(e) = store.write(key, &text) {
        warn!(key, error = %e.format_for_log(), "Snapshot not saved");
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
