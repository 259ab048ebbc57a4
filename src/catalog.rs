//! Static class catalog
//!
//! Maps each playable class to the roles it can fill and its display color,
//! and defines the fixed role enumerations used by rosters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Roles
// ─────────────────────────────────────────────────────────────────

/// A functional slot in a group composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Tank,
    Healer,
    Melee,
    Ranged,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Tank => "Tank",
            Role::Healer => "Healer",
            Role::Melee => "Melee",
            Role::Ranged => "Ranged",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A roster slot: one of the combat roles, or standby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtendedRole {
    Tank,
    Healer,
    Melee,
    Ranged,
    /// Available but not actively slotted
    Standby,
}

impl ExtendedRole {
    /// All five slots in table order.
    pub fn all() -> &'static [ExtendedRole] {
        &[
            ExtendedRole::Tank,
            ExtendedRole::Healer,
            ExtendedRole::Melee,
            ExtendedRole::Ranged,
            ExtendedRole::Standby,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExtendedRole::Tank => "Tank",
            ExtendedRole::Healer => "Healer",
            ExtendedRole::Melee => "Melee",
            ExtendedRole::Ranged => "Ranged",
            ExtendedRole::Standby => "Standby",
        }
    }

    /// Icon shown in roster table headers and assign buttons.
    pub fn icon(&self) -> &'static str {
        match self {
            ExtendedRole::Tank => "🛡️",
            ExtendedRole::Healer => "➕",
            ExtendedRole::Melee => "⚔️",
            ExtendedRole::Ranged => "🏹",
            ExtendedRole::Standby => "💤",
        }
    }

    /// The combat role behind this slot; standby has none.
    pub fn combat_role(&self) -> Option<Role> {
        match self {
            ExtendedRole::Tank => Some(Role::Tank),
            ExtendedRole::Healer => Some(Role::Healer),
            ExtendedRole::Melee => Some(Role::Melee),
            ExtendedRole::Ranged => Some(Role::Ranged),
            ExtendedRole::Standby => None,
        }
    }
}

impl From<Role> for ExtendedRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Tank => ExtendedRole::Tank,
            Role::Healer => ExtendedRole::Healer,
            Role::Melee => ExtendedRole::Melee,
            Role::Ranged => ExtendedRole::Ranged,
        }
    }
}

impl fmt::Display for ExtendedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ExtendedRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tank" => Ok(ExtendedRole::Tank),
            "healer" | "heal" => Ok(ExtendedRole::Healer),
            "melee" => Ok(ExtendedRole::Melee),
            "ranged" => Ok(ExtendedRole::Ranged),
            "standby" | "bench" => Ok(ExtendedRole::Standby),
            _ => Err(format!(
                "Unknown role '{}'. Valid: tank, healer, melee, ranged, standby",
                s
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Class Table
// ─────────────────────────────────────────────────────────────────

/// One row of the class table.
#[derive(Debug, Clone, Copy)]
pub struct ClassEntry {
    pub name: &'static str,
    pub roles: &'static [Role],
    /// Hex color, `#RRGGBB`
    pub color: &'static str,
}

use Role::{Healer, Melee, Ranged, Tank};

const CLASSES: &[ClassEntry] = &[
    ClassEntry { name: "Death Knight", roles: &[Tank, Melee], color: "#C41E3A" },
    ClassEntry { name: "Demon Hunter", roles: &[Tank, Melee], color: "#A330C9" },
    ClassEntry { name: "Druid", roles: &[Tank, Healer, Melee, Ranged], color: "#FF7C0A" },
    ClassEntry { name: "Evoker", roles: &[Healer, Ranged], color: "#33937F" },
    ClassEntry { name: "Hunter", roles: &[Ranged], color: "#AAD372" },
    ClassEntry { name: "Mage", roles: &[Ranged], color: "#3FC7EB" },
    ClassEntry { name: "Monk", roles: &[Tank, Healer, Melee], color: "#00FF98" },
    ClassEntry { name: "Paladin", roles: &[Tank, Healer, Melee], color: "#F48CBA" },
    ClassEntry { name: "Priest", roles: &[Healer, Ranged], color: "#FFFFFF" },
    ClassEntry { name: "Rogue", roles: &[Melee], color: "#FFF468" },
    ClassEntry { name: "Shaman", roles: &[Healer, Melee, Ranged], color: "#0070DD" },
    ClassEntry { name: "Warlock", roles: &[Ranged], color: "#8788EE" },
    ClassEntry { name: "Warrior", roles: &[Tank, Melee], color: "#C69B6D" },
];

/// Icons offered when creating a roster.
pub const BOSS_ICONS: &[&str] = &["💀", "🅰️", "🅱️", "1️⃣", "2️⃣", "3️⃣", "👑", "❤️", "🍆"];

/// Shown for rosters saved without an icon.
pub const MISSING_ICON: &str = "❓";

/// All classes in table order.
pub fn classes() -> &'static [ClassEntry] {
    CLASSES
}

/// Exact, case-sensitive lookup of a class entry.
pub fn class(name: &str) -> Option<&'static ClassEntry> {
    CLASSES.iter().find(|c| c.name == name)
}

/// Roles a class can fill. Unknown classes fill none.
pub fn roles_for(class_name: &str) -> &'static [Role] {
    class(class_name).map(|c| c.roles).unwrap_or(&[])
}

/// Display color for a class, if it is known.
pub fn color_for(class_name: &str) -> Option<&'static str> {
    class(class_name).map(|c| c.color)
}

/// Map user input to a catalog key, ignoring case and surrounding whitespace.
///
/// Returns the input unchanged when no class matches.
pub fn normalize_class(input: &str) -> String {
    let trimmed = input.trim();
    CLASSES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(trimmed))
        .map(|c| c.name.to_string())
        .unwrap_or_else(|| input.to_string())
}

/// Whether an icon is one of the stock roster icons.
pub fn is_stock_icon(icon: &str) -> bool {
    BOSS_ICONS.contains(&icon)
}
