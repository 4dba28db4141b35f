//! Command-line argument parsing for the manifest tool
//!
//! This module defines the CLI structure using clap derive macros,
//! providing listing, lookup, validation and export of test manifests.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::{CaseFilter, ManifestFormat};

/// Moving-penetration regression test manifest
#[derive(Parser, Debug)]
#[command(
    name = "pl_manifest",
    version,
    about = "Inspect, validate and export the 2D moving-penetration regression test manifest",
    long_about = "Lists the simulation input decks of the 2D moving-penetration suite and the
EXODIFF reference outputs each one is compared against. Manifests can be loaded from
TOML, JSON or legacy harness spec files, or taken from the built-in suite."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Manifest file to use instead of the built-in suite
    #[arg(short, long, global = true, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Manifest file format (toml, json, legacy)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<ManifestFormat>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List test cases in declaration order
    List(ListArgs),

    /// Show one test case
    Show(ShowArgs),

    /// Load and validate a manifest file
    Check(CheckArgs),

    /// Write the active manifest in another format
    Export(ExportArgs),

    /// Summarize the active manifest by variant
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the list command
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only cases of this base test number
    #[arg(short, long)]
    pub base: Option<u32>,

    /// Only quadratic (quad8) element variants
    #[arg(long, conflicts_with = "linear")]
    pub quadratic: bool,

    /// Only linear (quad4) element variants
    #[arg(long)]
    pub linear: bool,

    /// Only nonzero tangential tolerance variants
    #[arg(long, conflicts_with = "no_tt")]
    pub tt: bool,

    /// Only zero tangential tolerance variants
    #[arg(long)]
    pub no_tt: bool,

    /// Only cases whose name contains this text
    #[arg(long, value_name = "TEXT")]
    pub contains: Option<String>,

    /// Print names only
    #[arg(long)]
    pub names_only: bool,

    /// Print the selected cases as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the show command
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Test case name (e.g., "pl_test3qtt")
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Resolve file paths under this test directory
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Print the case as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the check command
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Manifest file to validate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the export command
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Output format
    #[arg(short = 't', long = "to", default_value = "toml", value_name = "FORMAT")]
    pub to: ManifestFormat,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level from flags, if any flag chooses one
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl ListArgs {
    /// Build the case filter selected by the flags
    pub fn filter(&self) -> CaseFilter {
        let flag = |on: bool, off: bool| match (on, off) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        CaseFilter {
            base: self.base,
            quadratic: flag(self.quadratic, self.linear),
            tangential_tolerance: flag(self.tt, self.no_tt),
            name_contains: self.contains.clone(),
        }
    }
}
