//! blump CLI - batch converter for multi-angle capture trees.
//!
//! blump walks a directory tree of raw captures, packs each capture's two
//! stacked sub-images into one composite texture, and writes a `frame.json`
//! manifest per directory describing how to reassemble the composites into
//! a rotatable billboard.
//!
//! # Usage
//!
//! ```bash
//! # Convert a capture tree in place
//! blump process ./images/dragon
//!
//! # Anchor manifest paths at a different batch root
//! blump process ./images/dragon --batch-root ./images
//!
//! # View configuration
//! blump config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// blump - batch converter for multi-angle capture trees.
#[derive(Parser, Debug)]
#[command(name = "blump")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a capture tree into composites and manifests
    Process(cli::process::ProcessArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match blump_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `blump config path`."
            );
            blump_core::Config::default()
        }
    };
    logging::init(&config.logging, cli.verbose, cli.json_logs);

    tracing::debug!("blump v{}", blump_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Process(args) => cli::process::execute(args),
        Commands::Config(args) => cli::config::execute(args),
    }
}
