//! Roster assignment engine
//!
//! Holds the ordered set of boss rosters and places characters into their
//! role slots. Within one roster a character id occupies at most one slot;
//! across rosters there is no exclusivity.
//!
//! Every command returns an [`Outcome`]. A rejected command never mutates
//! state, so callers that ignore the outcome get idempotent no-op behavior.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::ExtendedRole;
use crate::registry::Character;

// ─────────────────────────────────────────────────────────────────
// Command Outcomes
// ─────────────────────────────────────────────────────────────────

/// Result of a command against the registry or the engine.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    /// The command changed state
    Applied(T),
    /// The command was refused and nothing changed
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// The applied value, discarding any rejection.
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Rejected(reason) => Some(reason),
        }
    }
}

/// Broad category of a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// Empty or duplicate name on create
    ValidationRejected,
    /// Character already placed somewhere in the target roster
    AlreadyAssigned,
    /// Referenced roster, character or slot entry is absent
    NotFound,
}

/// Why a command was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    EmptyName,
    DuplicateRoster { boss_name: String },
    AlreadyAssigned { boss_name: String, character_id: String, role: ExtendedRole },
    RosterNotFound { boss_name: String },
    CharacterNotFound { id: String },
    NotInSlot { boss_name: String, character_id: String, role: ExtendedRole },
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::EmptyName | Rejection::DuplicateRoster { .. } => {
                RejectionKind::ValidationRejected
            }
            Rejection::AlreadyAssigned { .. } => RejectionKind::AlreadyAssigned,
            Rejection::RosterNotFound { .. }
            | Rejection::CharacterNotFound { .. }
            | Rejection::NotInSlot { .. } => RejectionKind::NotFound,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyName => write!(f, "name must not be empty"),
            Rejection::DuplicateRoster { boss_name } => {
                write!(f, "a roster named '{}' already exists", boss_name)
            }
            Rejection::AlreadyAssigned { boss_name, role, .. } => {
                write!(f, "already assigned to {} in '{}'", role, boss_name)
            }
            Rejection::RosterNotFound { boss_name } => {
                write!(f, "no roster named '{}'", boss_name)
            }
            Rejection::CharacterNotFound { id } => write!(f, "no character '{}'", id),
            Rejection::NotInSlot { boss_name, role, .. } => {
                write!(f, "not in the {} slot of '{}'", role, boss_name)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Roster Types
// ─────────────────────────────────────────────────────────────────

/// The five role slots of a roster.
///
/// A struct rather than a map so no slot can ever be missing. Slots absent
/// from a saved snapshot load as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Assignments {
    pub tank: Vec<Character>,
    pub healer: Vec<Character>,
    pub melee: Vec<Character>,
    pub ranged: Vec<Character>,
    pub standby: Vec<Character>,
}

impl Assignments {
    pub fn slot(&self, role: ExtendedRole) -> &[Character] {
        match role {
            ExtendedRole::Tank => &self.tank,
            ExtendedRole::Healer => &self.healer,
            ExtendedRole::Melee => &self.melee,
            ExtendedRole::Ranged => &self.ranged,
            ExtendedRole::Standby => &self.standby,
        }
    }

    fn slot_mut(&mut self, role: ExtendedRole) -> &mut Vec<Character> {
        match role {
            ExtendedRole::Tank => &mut self.tank,
            ExtendedRole::Healer => &mut self.healer,
            ExtendedRole::Melee => &mut self.melee,
            ExtendedRole::Ranged => &mut self.ranged,
            ExtendedRole::Standby => &mut self.standby,
        }
    }

    /// Slot holding `character_id`, scanning all five.
    pub fn role_of(&self, character_id: &str) -> Option<ExtendedRole> {
        ExtendedRole::all()
            .iter()
            .copied()
            .find(|role| self.slot(*role).iter().any(|c| c.id == character_id))
    }

    /// Number of slots that contain `character_id`.
    pub fn count_of(&self, character_id: &str) -> usize {
        ExtendedRole::all()
            .iter()
            .filter(|role| self.slot(**role).iter().any(|c| c.id == character_id))
            .count()
    }

    /// Every entry with the slot it sits in, in table order.
    pub fn entries(&self) -> impl Iterator<Item = (ExtendedRole, &Character)> {
        ExtendedRole::all()
            .iter()
            .flat_map(move |role| self.slot(*role).iter().map(move |c| (*role, c)))
    }

    pub fn len(&self) -> usize {
        ExtendedRole::all().iter().map(|r| self.slot(*r).len()).sum()
    }
}

/// A named set of role slots for one planned encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossRoster {
    /// Unique, case-sensitive key
    pub boss_name: String,

    /// Display token; older snapshots may lack one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub assigned: Assignments,
}

impl BossRoster {
    fn new(boss_name: String, icon: String) -> Self {
        Self {
            boss_name,
            icon: Some(icon),
            assigned: Assignments::default(),
        }
    }
}

/// Placement of one character in one roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Unassigned,
    AssignedTo(ExtendedRole),
}

// ─────────────────────────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────────────────────────

/// Owns all rosters plus the currently selected one.
#[derive(Debug, Clone, Default)]
pub struct RosterEngine {
    rosters: Vec<BossRoster>,
    selected: Option<String>,
}

impl RosterEngine {
    /// Rebuild an engine from loaded snapshots. A selection naming a roster
    /// that does not exist is dropped.
    pub fn from_snapshot(rosters: Vec<BossRoster>, selected: Option<String>) -> Self {
        let selected = selected.filter(|name| rosters.iter().any(|r| &r.boss_name == name));
        Self { rosters, selected }
    }

    /// Create a roster with five empty slots and select it.
    pub fn create_roster(&mut self, boss_name: &str, icon: &str) -> Outcome<BossRoster> {
        let name = boss_name.trim();
        if name.is_empty() {
            debug!("Rejected roster with empty name");
            return Outcome::Rejected(Rejection::EmptyName);
        }
        if self.roster(name).is_some() {
            debug!(boss = name, "Rejected duplicate roster");
            return Outcome::Rejected(Rejection::DuplicateRoster {
                boss_name: name.to_string(),
            });
        }

        let roster = BossRoster::new(name.to_string(), icon.to_string());
        self.rosters.push(roster.clone());
        self.selected = Some(name.to_string());
        info!(boss = name, icon, "Roster created");
        Outcome::Applied(roster)
    }

    /// Append `character` to `role` unless it already sits in any slot of
    /// the roster.
    pub fn assign(&mut self, boss_name: &str, character: &Character, role: ExtendedRole) -> Outcome {
        let Some(roster) = self.roster_mut(boss_name) else {
            debug!(boss = boss_name, "Assign ignored, roster not found");
            return Outcome::Rejected(Rejection::RosterNotFound {
                boss_name: boss_name.to_string(),
            });
        };

        if let Some(current) = roster.assigned.role_of(&character.id) {
            debug!(
                boss = boss_name,
                character = %character.name,
                current = %current,
                requested = %role,
                "Assign ignored, already assigned"
            );
            return Outcome::Rejected(Rejection::AlreadyAssigned {
                boss_name: boss_name.to_string(),
                character_id: character.id.clone(),
                role: current,
            });
        }

        roster.assigned.slot_mut(role).push(character.clone());
        info!(boss = boss_name, character = %character.name, role = %role, "Character assigned");
        Outcome::Applied(())
    }

    /// Remove `character_id` from `role`. Matches by id only.
    pub fn unassign(&mut self, boss_name: &str, character_id: &str, role: ExtendedRole) -> Outcome {
        let Some(roster) = self.roster_mut(boss_name) else {
            debug!(boss = boss_name, "Unassign ignored, roster not found");
            return Outcome::Rejected(Rejection::RosterNotFound {
                boss_name: boss_name.to_string(),
            });
        };

        let slot = roster.assigned.slot_mut(role);
        let before = slot.len();
        slot.retain(|c| c.id != character_id);
        if slot.len() == before {
            debug!(boss = boss_name, character_id, role = %role, "Unassign ignored, not in slot");
            return Outcome::Rejected(Rejection::NotInSlot {
                boss_name: boss_name.to_string(),
                character_id: character_id.to_string(),
                role,
            });
        }

        info!(boss = boss_name, character_id, role = %role, "Character unassigned");
        Outcome::Applied(())
    }

    /// Set the roster the presentation layer treats as current.
    pub fn select_roster(&mut self, boss_name: &str) -> Outcome {
        if self.roster(boss_name).is_none() {
            return Outcome::Rejected(Rejection::RosterNotFound {
                boss_name: boss_name.to_string(),
            });
        }
        self.selected = Some(boss_name.to_string());
        debug!(boss = boss_name, "Roster selected");
        Outcome::Applied(())
    }

    /// Rosters in creation order.
    pub fn rosters_view(&self) -> &[BossRoster] {
        &self.rosters
    }

    pub fn roster(&self, boss_name: &str) -> Option<&BossRoster> {
        self.rosters.iter().find(|r| r.boss_name == boss_name)
    }

    fn roster_mut(&mut self, boss_name: &str) -> Option<&mut BossRoster> {
        self.rosters.iter_mut().find(|r| r.boss_name == boss_name)
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_roster(&self) -> Option<&BossRoster> {
        self.selected.as_deref().and_then(|name| self.roster(name))
    }

    /// Where a character sits in a roster, or `None` if the roster is unknown.
    pub fn slot_of(&self, boss_name: &str, character_id: &str) -> Option<SlotState> {
        self.roster(boss_name).map(|r| match r.assigned.role_of(character_id) {
            Some(role) => SlotState::AssignedTo(role),
            None => SlotState::Unassigned,
        })
    }

    /// Number of (roster, slot) pairs holding `character_id`, recomputed on
    /// every call.
    pub fn participation_count(&self, character_id: &str) -> usize {
        self.rosters
            .iter()
            .map(|r| r.assigned.count_of(character_id))
            .sum()
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
