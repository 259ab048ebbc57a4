//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the roster planner.

use clap::{Parser, Subcommand};

use crate::catalog::ExtendedRole;

/// raid-roster - Plan raid rosters per boss
///
/// Keeps a pool of characters and assigns them to Tank, Healer, Melee,
/// Ranged or Standby slots per boss encounter. A character holds at most
/// one slot in any roster.
#[derive(Parser, Debug)]
#[command(name = "raid-roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, env = "RAID_ROSTER_CONFIG", global = true)]
    pub config: Option<String>,

    /// Directory holding the saved snapshots
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Disable class colors
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the character pool
    Character {
        #[command(subcommand)]
        subcommand: CharacterSubcommand,
    },

    /// Manage boss rosters
    Roster {
        #[command(subcommand)]
        subcommand: RosterSubcommand,
    },

    /// Put a character into a roster slot
    Assign {
        /// Character id, id prefix or name
        character: String,

        /// Slot: tank, healer, melee, ranged or standby
        role: ExtendedRole,

        /// Target roster (defaults to the selected one)
        #[arg(short, long)]
        roster: Option<String>,
    },

    /// Take a character out of a roster slot
    Unassign {
        /// Character id, id prefix or name
        character: String,

        /// Slot to clear (defaults to wherever the character is)
        role: Option<ExtendedRole>,

        /// Target roster (defaults to the selected one)
        #[arg(short, long)]
        roster: Option<String>,
    },

    /// List classes with their roles and colors
    Classes,

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Character subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum CharacterSubcommand {
    /// Add a character to the pool
    Add {
        /// Character name
        name: String,

        /// Class (defaults to the configured default class)
        #[arg(long)]
        class: Option<String>,
    },

    /// Delete a character from the pool (roster entries are kept)
    Remove {
        /// Character id, id prefix or name
        character: String,
    },

    /// List characters with roles and participation
    List,
}

/// Roster subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum RosterSubcommand {
    /// Create a roster and select it
    Create {
        /// Boss name
        name: String,

        /// Display icon (defaults to the configured default icon)
        #[arg(long)]
        icon: Option<String>,
    },

    /// Select the roster that commands default to
    Select {
        /// Boss name
        name: String,
    },

    /// List all rosters
    List,

    /// Show a roster slot by slot
    Show {
        /// Boss name (defaults to the selected roster)
        name: Option<String>,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate,
}
