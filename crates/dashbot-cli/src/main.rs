mod commands;
mod input;
mod prompter;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use dashbot::{BotConfig, OffsetTable, load_offsets};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dashbot")]
#[command(about = "Automated Geometry Dash player")]
#[command(version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Bot configuration (TOML)
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Offset table (JSON); built-in offsets are used when omitted
    #[arg(short, long, global = true, env = "DASHBOT_OFFSETS")]
    offsets: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Attach to the game and play (default)
    Run {
        /// Disable the status display
        #[arg(long)]
        no_overlay: bool,
    },
    /// Attach once and print what the bot sees
    Probe {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactively locate the player Y offset
    Scan,
    /// Write the built-in offset table as JSON
    Offsets {
        /// Output file path
        #[arg(short = 'O', long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "dashbot=debug" } else { "dashbot=info" };
    // Logs go to stderr; stdout belongs to the status display
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let command = args.command.unwrap_or(Command::Run { no_overlay: false });

    match command {
        Command::Offsets { output } => commands::offsets::run(&output),
        Command::Run { no_overlay } => {
            let config = load_config(&args.config);
            let offsets = load_offset_table(args.offsets.as_deref())?;
            commands::run::run(&config, &offsets, !no_overlay)
        }
        Command::Probe { json } => {
            let config = load_config(&args.config);
            let offsets = load_offset_table(args.offsets.as_deref())?;
            commands::probe::run(&config, &offsets, json)
        }
        Command::Scan => commands::scan::run(),
    }
}

/// Load the bot config, falling back to defaults
fn load_config(path: &Path) -> BotConfig {
    match BotConfig::load(path) {
        Ok(config) => {
            info!("Loaded config from {:?}", path);
            config
        }
        Err(e) if e.is_not_found() => {
            warn!("Config {:?} not found, using defaults", path);
            BotConfig::default()
        }
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            BotConfig::default()
        }
    }
}

/// Load offsets from `path`, or the built-in table when no path is given.
///
/// An explicitly requested file that cannot be loaded is an error.
fn load_offset_table(path: Option<&Path>) -> Result<OffsetTable> {
    match path {
        Some(path) => {
            let offsets = load_offsets(path)
                .map_err(|e| anyhow::anyhow!("Failed to load offsets from {:?}: {}", path, e))?;
            info!("Loaded offsets version {} from {:?}", offsets.version, path);
            Ok(offsets)
        }
        None => {
            let offsets = OffsetTable::default();
            info!("Using built-in offsets version {}", offsets.version);
            Ok(offsets)
        }
    }
}
