//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use aspectweave::output::OutputMode;

/// aspectweave - Analyze interception bindings for component types
#[derive(Parser, Debug)]
#[command(
    name = "aspectweave",
    version,
    about = "Analyze interception bindings for component types",
    long_about = "Load weave manifests describing types, components, bindings and aspects,\n\
                  run component registration, and report which methods are intercepted\n\
                  and by which advice chain."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register every component and print its interception plan
    Analyze {
        /// Manifest files or directories containing *.weave.toml files
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Like analyze, but fail if any warning was produced
    Validate {
        /// Manifest files or directories containing *.weave.toml files
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Analyze { paths }) => commands::analyze(&paths, output_mode),
        Some(Command::Validate { paths }) => commands::validate(&paths, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": aspectweave::VERSION
                    })
                );
            } else {
                println!("aspectweave v{}", aspectweave::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": aspectweave::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("aspectweave v{}", aspectweave::VERSION);
                println!("\nRun 'aspectweave --help' for usage");
                println!("Run 'aspectweave analyze <manifest>' to get started");
            }
            Ok(())
        },
    }
}
