//! raid-roster - Raid roster planner
//!
//! Main entry point. Loads configuration, sets up logging, restores the
//! planner from its data directory and runs one command against it.

mod catalog;
mod cli;
mod config;
mod error;
mod logging;
mod planner;
mod registry;
mod render;
mod roster;
mod store;
mod version;

use std::io::{self, Write};

use clap::Parser;
use tracing::debug;

use crate::cli::{CharacterSubcommand, Cli, Commands, ConfigSubcommand, RosterSubcommand};
use crate::config::PlannerConfig;
use crate::error::{Error, Result};
use crate::planner::Planner;
use crate::registry::{resolve_in, Character, Lookup};
use crate::render::Palette;
use crate::roster::{Outcome, Rejection, SlotState};
use crate::store::FileStore;

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // For commands that don't need the planner, use simple setup
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(subcommand.clone(), cli.config.as_deref());
        }
        _ => {}
    }

    let mut config = PlannerConfig::load(cli.config.as_deref())?;
    if let Some(ref dir) = cli.data_dir {
        config.set_data_dir(dir);
    }
    if cli.no_color {
        config.display.color = false;
    }

    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, config.display.color, cli.verbose, cli.quiet)?;

    let build = version::build_info();
    debug!(
        version = %build.tag(),
        data_dir = %config.storage.data_dir,
        "Starting raid-roster"
    );

    let mut planner = Planner::load(Box::new(FileStore::new(config.data_dir())));
    let palette = Palette::new(config.display.color);
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Character { subcommand } => {
            handle_character_command(&mut planner, subcommand, &config, palette, &mut out)
        }
        Commands::Roster { subcommand } => {
            handle_roster_command(&mut planner, subcommand, &config, palette, &mut out)
        }
        Commands::Assign { character, role, roster } => {
            let Some(boss) = target_roster(&planner, roster) else {
                return Ok(());
            };
            let Some(c) = find_character(lookup_registered(&planner, &character), &character)? else {
                notice(&Rejection::CharacterNotFound { id: character });
                return Ok(());
            };
            if !c.can_fill(role) {
                eprintln!(
                    "Not applied: {} ({}) cannot fill {}",
                    c.name, c.class_name, role
                );
                return Ok(());
            }

            if report(planner.assign(&boss, &c.id, role)).is_some() {
                writeln!(out, "Assigned {} to {} {} in '{}'", c.name, role.icon(), role, boss)?;
            }
            Ok(())
        }
        Commands::Unassign { character, role, roster } => {
            let Some(boss) = target_roster(&planner, roster) else {
                return Ok(());
            };

            // The roster's own entries win, so orphans stay reachable by name
            let in_roster = planner
                .engine()
                .roster(&boss)
                .map(|r| resolve_in(r.assigned.entries().map(|(_, c)| c), &character))
                .unwrap_or(Lookup::NotFound);
            let lookup = match in_roster {
                Lookup::NotFound => lookup_registered(&planner, &character),
                found => found,
            };
            let Some(c) = find_character(lookup, &character)? else {
                notice(&Rejection::CharacterNotFound { id: character });
                return Ok(());
            };

            let role = match role {
                Some(role) => role,
                None => match planner.engine().slot_of(&boss, &c.id) {
                    Some(SlotState::AssignedTo(role)) => role,
                    Some(SlotState::Unassigned) => {
                        eprintln!("Not applied: {} is not assigned in '{}'", c.name, boss);
                        return Ok(());
                    }
                    None => {
                        notice(&Rejection::RosterNotFound { boss_name: boss });
                        return Ok(());
                    }
                },
            };

            if report(planner.unassign(&boss, &c.id, role)).is_some() {
                writeln!(out, "Unassigned {} from {} in '{}'", c.name, role, boss)?;
            }
            Ok(())
        }
        Commands::Classes => {
            render::class_table(&mut out, palette)?;
            Ok(())
        }
        Commands::Version | Commands::Config { .. } => {
            // Already handled above
            unreachable!();
        }
    }
}

fn handle_character_command(
    planner: &mut Planner,
    subcommand: CharacterSubcommand,
    config: &PlannerConfig,
    palette: Palette,
    out: &mut impl Write,
) -> Result<()> {
    match subcommand {
        CharacterSubcommand::Add { name, class } => {
            let class = catalog::normalize_class(class.as_deref().unwrap_or(&config.defaults.class));
            if catalog::class(&class).is_none() {
                debug!(class = %class, "Class not in catalog, character gets no roles");
            }

            if let Some(c) = report(planner.add_character(name.trim(), &class)) {
                writeln!(
                    out,
                    "Added {} ({}) [{}]",
                    palette.paint(&c.name, c.color()),
                    c.class_name,
                    c.short_id()
                )?;
            }
        }
        CharacterSubcommand::Remove { character } => {
            let Some(c) = find_character(lookup_registered(planner, &character), &character)? else {
                notice(&Rejection::CharacterNotFound { id: character });
                return Ok(());
            };
            let fights = planner.participation_count(&c.id);

            if let Some(removed) = report(planner.remove_character(&c.id)) {
                writeln!(out, "Removed {} [{}]", removed.name, removed.short_id())?;
                if fights > 0 {
                    writeln!(out, "Still listed in {} roster slot(s)", fights)?;
                }
            }
        }
        CharacterSubcommand::List => {
            render::character_list(out, planner, palette)?;
        }
    }

    Ok(())
}

fn handle_roster_command(
    planner: &mut Planner,
    subcommand: RosterSubcommand,
    config: &PlannerConfig,
    palette: Palette,
    out: &mut impl Write,
) -> Result<()> {
    match subcommand {
        RosterSubcommand::Create { name, icon } => {
            let icon = icon
                .filter(|i| !i.trim().is_empty())
                .unwrap_or_else(|| config.defaults.boss_icon.clone());
            if !catalog::is_stock_icon(&icon) {
                debug!(icon = %icon, "Using a custom roster icon");
            }

            if let Some(roster) = report(planner.create_roster(&name, &icon)) {
                writeln!(out, "Created roster {} {}", render::roster_icon(&roster), roster.boss_name)?;
            }
        }
        RosterSubcommand::Select { name } => {
            if report(planner.select_roster(&name)).is_some() {
                writeln!(out, "Selected roster '{}'", name)?;
            }
        }
        RosterSubcommand::List => {
            render::roster_list(out, planner.rosters_view(), planner.engine().selected_name())?;
        }
        RosterSubcommand::Show { name } => {
            let roster = match name.as_deref() {
                Some(boss) => planner.engine().roster(boss),
                None => planner.selected_roster(),
            };
            match (roster, name) {
                (Some(roster), _) => render::roster_table(out, roster, palette)?,
                (None, Some(boss)) => notice(&Rejection::RosterNotFound { boss_name: boss }),
                (None, None) => no_selection(),
            }
        }
    }

    Ok(())
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: ConfigSubcommand, config_path: Option<&str>) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            let cfg = PlannerConfig::load(config_path)?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", written.display());
        }
        ConfigSubcommand::Validate => {
            PlannerConfig::load(config_path)?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────

/// Print a rejection as a one-line notice.
fn notice(rejection: &Rejection) {
    eprintln!("Not applied: {}", rejection);
}

/// Unwrap an applied outcome, printing a notice for a rejected one.
fn report<T>(outcome: Outcome<T>) -> Option<T> {
    if let Some(rejection) = outcome.rejection() {
        debug!(kind = ?rejection.kind(), reason = %rejection, "Command not applied");
        notice(rejection);
    }
    outcome.applied()
}

fn lookup_registered<'a>(planner: &'a Planner, query: &str) -> Lookup<'a> {
    planner.registry().resolve(query)
}

/// Turn a lookup into an owned character. Ambiguity is an error.
fn find_character(lookup: Lookup<'_>, query: &str) -> Result<Option<Character>> {
    match lookup {
        Lookup::Found(c) => Ok(Some(c.clone())),
        Lookup::NotFound => Ok(None),
        Lookup::Ambiguous(matches) => Err(Error::AmbiguousCharacter {
            query: query.to_string(),
            count: matches.len(),
        }),
    }
}

/// The explicitly named roster, else the selected one.
fn target_roster(planner: &Planner, explicit: Option<String>) -> Option<String> {
    let boss = explicit.or_else(|| planner.engine().selected_name().map(str::to_string));
    if boss.is_none() {
        no_selection();
    }
    boss
}

fn no_selection() {
    eprintln!("No roster selected. Create one with 'raid-roster roster create <boss>'.");
}
