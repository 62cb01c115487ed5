//! CLI routing and command dispatch.

use crate::core::paths::StorePaths;
use crate::core::settings;
use crate::models::settings::Settings;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod entry;
pub mod generate;
pub mod menu;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub paths: StorePaths,
    pub settings: Settings,
    pub non_interactive: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "passkeep",
    version,
    about = "Local keyword-to-password store backed by a single JSON file"
)]
pub struct Cli {
    /// Path to the database file (default: the platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Run in non-interactive mode (no prompts, suitable for scripts)
    #[arg(long, global = true, env = "PASSKEEP_NON_INTERACTIVE")]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let paths = StorePaths::resolve(self.db);

        // Settings are best-effort: a broken file gets a warning and
        // defaults, it never blocks the store.
        let settings = match settings::load(&paths.settings_file) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("warning: {:#}, using defaults", e);
                Settings::default()
            }
        };

        let ctx = CliContext {
            paths,
            settings,
            non_interactive: self.non_interactive,
        };

        match self.command {
            None | Some(Commands::Menu) => menu::run(&ctx),
            Some(Commands::Add(args)) => entry::run_add(&ctx, args),
            Some(Commands::Generate(args)) => generate::run(&ctx, args),
            Some(Commands::Update(args)) => entry::run_update(&ctx, args),
            Some(Commands::Show(args)) => entry::run_show(&ctx, args),
            Some(Commands::List(args)) => entry::run_list(&ctx, args),
            Some(Commands::Remove(args)) => entry::run_remove(&ctx, args),
            Some(Commands::Wipe(args)) => entry::run_wipe(&ctx, args),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a secret under a new keyword
    Add(entry::AddArgs),
    /// Generate a random password, optionally saving it
    Generate(generate::GenerateArgs),
    /// Replace the secret for an existing keyword
    Update(entry::UpdateArgs),
    /// Show one entry, or every entry with the keyword 'all'
    Show(entry::ShowArgs),
    /// List all entries as a table or JSON
    List(entry::ListArgs),
    /// Remove one entry, or every entry with the keyword 'all'
    Remove(entry::RemoveArgs),
    /// Delete every entry
    Wipe(entry::WipeArgs),
    /// Interactive menu (the default when no subcommand is given)
    Menu,
}
