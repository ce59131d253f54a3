//! Pyre CLI - Command-line interface for Pyre window effects

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{begin, list, presets, settings, Session};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pyre")]
#[command(about = "Inspect and configure window transition effects", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (defaults to <config dir>/pyre/settings.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available effects
    List {
        /// Only effects supported by this host version (e.g. "3.36")
        #[arg(long)]
        host: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Show the settings of an effect
    Settings {
        /// Effect nick
        nick: String,
    },

    /// Set a settings key
    Set {
        /// Settings key (e.g. "flame-scale")
        key: String,

        /// New value (e.g. "1.5", "true", "rgba(255,0,0,0.5)")
        value: String,
    },

    /// Reset a settings key to its default
    Reset {
        /// Settings key
        key: String,
    },

    /// List the presets of an effect
    Presets {
        /// Effect nick
        nick: String,
    },

    /// Apply a preset by its menu index
    ApplyPreset {
        /// Effect nick
        nick: String,

        /// Preset index, as shown by `pyre presets`
        index: usize,
    },

    /// Start an animation against a recording shader and print the uniform writes
    Begin {
        /// Effect nick
        nick: String,

        /// Simulate a closing window instead of an opening one
        #[arg(long)]
        closing: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::List { host, format } => list::run(host.as_deref(), &format),
        Commands::Settings { nick } => {
            let session = Session::open(cli.settings.as_deref())?;
            settings::show(&session, &nick)
        }
        Commands::Set { key, value } => {
            let session = Session::open(cli.settings.as_deref())?;
            settings::set(&session, &key, &value)
        }
        Commands::Reset { key } => {
            let session = Session::open(cli.settings.as_deref())?;
            settings::reset(&session, &key)
        }
        Commands::Presets { nick } => presets::list(&nick),
        Commands::ApplyPreset { nick, index } => {
            let session = Session::open(cli.settings.as_deref())?;
            presets::apply(&session, &nick, index)
        }
        Commands::Begin {
            nick,
            closing,
            format,
        } => {
            let session = Session::open(cli.settings.as_deref())?;
            begin::run(&session, &nick, !closing, &format)
        }
    }
}
