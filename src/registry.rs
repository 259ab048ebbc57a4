//! Character registry
//!
//! Owns the pool of characters in insertion order. Roster slots keep their
//! own copies, so removing a character here never touches any roster.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::{self, ExtendedRole, Role};
use crate::roster::{Outcome, Rejection};

/// A player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Opaque unique identifier (UUID v4)
    pub id: String,

    /// Display name, never empty
    pub name: String,

    /// Key into the class catalog
    pub class_name: String,

    /// Roles copied from the catalog when the character was created
    pub roles: Vec<Role>,
}

impl Character {
    /// Display color of this character's class.
    pub fn color(&self) -> Option<&'static str> {
        catalog::color_for(&self.class_name)
    }

    /// Whether this character may take `slot`. Anyone can sit on standby.
    pub fn can_fill(&self, slot: ExtendedRole) -> bool {
        slot.combat_role().map_or(true, |role| self.roles.contains(&role))
    }

    /// First eight characters of the id, for compact listings.
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

/// Result of resolving a user-supplied character reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a Character),
    NotFound,
    Ambiguous(Vec<&'a Character>),
}

/// Resolve `query` against `candidates`: exact id, then case-insensitive
/// name, then unique id prefix.
pub fn resolve_in<'a, I>(candidates: I, query: &str) -> Lookup<'a>
where
    I: IntoIterator<Item = &'a Character>,
{
    let query = query.trim();
    let candidates: Vec<&Character> = candidates.into_iter().collect();
    if query.is_empty() {
        return Lookup::NotFound;
    }

    if let Some(c) = candidates.iter().copied().find(|c| c.id == query) {
        return Lookup::Found(c);
    }

    let by_name: Vec<&Character> = candidates
        .iter()
        .copied()
        .filter(|c| c.name.trim().eq_ignore_ascii_case(query))
        .collect();
    match by_name.len() {
        0 => {}
        1 => return Lookup::Found(by_name[0]),
        _ => return Lookup::Ambiguous(by_name),
    }

    let by_prefix: Vec<&Character> = candidates
        .iter()
        .copied()
        .filter(|c| c.id.starts_with(query))
        .collect();
    match by_prefix.len() {
        0 => Lookup::NotFound,
        1 => Lookup::Found(by_prefix[0]),
        _ => Lookup::Ambiguous(by_prefix),
    }
}

// ─────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────

/// The ordered character pool.
#[derive(Debug, Clone, Default)]
pub struct CharacterRegistry {
    characters: Vec<Character>,
}

impl CharacterRegistry {
    /// Rebuild a registry from a loaded snapshot.
    pub fn from_characters(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    /// Add a character. Roles come from the catalog; unknown classes get none.
    pub fn add_character(&mut self, name: &str, class_name: &str) -> Outcome<Character> {
        if name.trim().is_empty() {
            debug!("Rejected character with empty name");
            return Outcome::Rejected(Rejection::EmptyName);
        }

        let character = Character {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            class_name: class_name.to_string(),
            roles: catalog::roles_for(class_name).to_vec(),
        };

        info!(
            id = %character.id,
            name = %character.name,
            class = %character.class_name,
            "Character added"
        );
        self.characters.push(character.clone());
        Outcome::Applied(character)
    }

    /// Remove a character by id. Roster references are left in place.
    pub fn remove_character(&mut self, id: &str) -> Outcome<Character> {
        match self.characters.iter().position(|c| c.id == id) {
            Some(index) => {
                let removed = self.characters.remove(index);
                info!(id = %removed.id, name = %removed.name, "Character removed");
                Outcome::Applied(removed)
            }
            None => {
                debug!(id, "Remove ignored, character not found");
                Outcome::Rejected(Rejection::CharacterNotFound { id: id.to_string() })
            }
        }
    }

    /// Characters in insertion order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn get(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Resolve an id, id prefix or name.
    pub fn resolve(&self, query: &str) -> Lookup<'_> {
        resolve_in(&self.characters, query)
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
