//! CLI parse: clap types for envimix. No behavior; definitions only.

use crate::objective::ValidationMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Envimix - environment-mix variants of TM2020 maps
#[derive(Parser)]
#[command(name = "envimix")]
#[command(about = "Generate environment-mix variants of TM2020 maps", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (envimix.toml, relative output directory)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log progress at debug level
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Generate variants of one or more maps
    Generate {
        /// Map files, or directories searched recursively for maps
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output root; variants land in <out>/Maps/Envimix
        #[arg(long)]
        out: Option<PathBuf>,
        /// List the variants without writing them
        #[arg(long)]
        dry_run: bool,
        /// Objective time policy (none, fake, real)
        #[arg(long)]
        validation: Option<ValidationMode>,
        /// Also generate the vehicle the map is made for
        #[arg(long)]
        include_default: bool,
        /// Variant name template, {0} = map name, {1} = vehicle
        #[arg(long)]
        name_format: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show identity, times and gates of a map
    Inspect {
        /// Map file
        map: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List vehicles, their environments and whether they are included
    Vehicles {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Write the default configuration to <workspace>/envimix.toml instead
        #[arg(long)]
        init: bool,
        /// Overwrite an existing envimix.toml
        #[arg(long, requires = "init")]
        force: bool,
    },
}
