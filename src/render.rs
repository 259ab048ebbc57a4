//! Terminal rendering of characters, rosters and the class table
//!
//! Everything writes to a caller-supplied writer so output can be captured
//! in tests. Class colors become 24-bit ANSI escapes only when enabled.

use std::io::{self, Write};

use crate::catalog::{self, ExtendedRole, MISSING_ICON};
use crate::planner::Planner;
use crate::roster::BossRoster;

/// Applies class colors, or not.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Wrap `text` in a foreground escape for `hex` ("#RRGGBB").
    pub fn paint(&self, text: &str, hex: Option<&str>) -> String {
        match (self.color, hex.and_then(hex_to_rgb)) {
            (true, Some((r, g, b))) => format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text),
            _ => text.to_string(),
        }
    }
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Icon to show for a roster.
pub fn roster_icon(roster: &BossRoster) -> &str {
    roster
        .icon
        .as_deref()
        .filter(|icon| !icon.is_empty())
        .unwrap_or(MISSING_ICON)
}

/// Character pool with class, roles and participation.
pub fn character_list(w: &mut impl Write, planner: &Planner, palette: Palette) -> io::Result<()> {
    let characters = planner.characters();
    if characters.is_empty() {
        writeln!(w, "No characters yet. Add one with 'raid-roster character add <name>'.")?;
        return Ok(());
    }

    writeln!(w, "Characters ({})", characters.len())?;
    for c in characters {
        let roles: Vec<&str> = c.roles.iter().map(|r| r.name()).collect();
        writeln!(
            w,
            "  {}  {}  {:<24}  {} fight(s)  [{}]",
            palette.paint(&format!("{:<16}", c.name), c.color()),
            palette.paint(&format!("{:<13}", c.class_name), c.color()),
            roles.join(", "),
            planner.participation_count(&c.id),
            c.short_id()
        )?;
    }
    Ok(())
}

/// All rosters, marking the selected one.
pub fn roster_list(w: &mut impl Write, rosters: &[BossRoster], selected: Option<&str>) -> io::Result<()> {
    if rosters.is_empty() {
        writeln!(w, "No rosters yet. Create one with 'raid-roster roster create <boss>'.")?;
        return Ok(());
    }

    for roster in rosters {
        let marker = if Some(roster.boss_name.as_str()) == selected { "*" } else { " " };
        writeln!(
            w,
            "{} {} {}  ({} assigned)",
            marker,
            roster_icon(roster),
            roster.boss_name,
            roster.assigned.len()
        )?;
    }
    Ok(())
}

/// One roster laid out slot by slot.
pub fn roster_table(w: &mut impl Write, roster: &BossRoster, palette: Palette) -> io::Result<()> {
    writeln!(w, "{} {}", roster_icon(roster), roster.boss_name)?;
    writeln!(w, "{}", "─".repeat(40))?;

    for &role in ExtendedRole::all() {
        let slot = roster.assigned.slot(role);
        writeln!(w, "{} {} ({})", role.icon(), role.name(), slot.len())?;
        if slot.is_empty() {
            writeln!(w, "    -")?;
        }
        for c in slot {
            writeln!(
                w,
                "    {} {}",
                palette.paint(&c.name, c.color()),
                c.class_name
            )?;
        }
    }
    Ok(())
}

/// The class catalog with roles and colors.
pub fn class_table(w: &mut impl Write, palette: Palette) -> io::Result<()> {
    writeln!(w, "{:<14}{:<30}Color", "Class", "Roles")?;
    for entry in catalog::classes() {
        let roles: Vec<&str> = entry.roles.iter().map(|r| r.name()).collect();
        writeln!(
            w,
            "{}{:<30}{}",
            palette.paint(&format!("{:<14}", entry.name), Some(entry.color)),
            roles.join(", "),
            entry.color
        )?;
    }
    Ok(())
}
