//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Relia - reliability prediction, allocation and rollup for hardware systems.
#[derive(Debug, Parser)]
#[command(name = "relia")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RELIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Roll up hazard rates, MTBF, reliability and cost for a system file
    Calculate(CalculateArgs),

    /// Apportion a node's goal to its children
    Allocate(AllocateArgs),

    /// Run the stress and overstress analysis for one item
    Derate(DerateArgs),

    /// Compute a Hazard Risk Index
    Hri(HriArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the calculate command.
#[derive(Debug, Parser)]
pub struct CalculateArgs {
    /// System file (TOML, or JSON with a .json extension)
    pub file: PathBuf,

    /// Calculate this node only, using the totals already stored on it
    #[arg(short, long)]
    pub node: Option<u32>,

    /// Write the results back to the system file
    #[arg(short, long)]
    pub write: bool,
}

/// Arguments for the allocate command.
#[derive(Debug, Parser)]
pub struct AllocateArgs {
    /// System file (TOML, or JSON with a .json extension)
    pub file: PathBuf,

    /// Node whose goal is apportioned to its children
    #[arg(short, long)]
    pub parent: u32,

    /// ARINC weights relative to the first child instead of the sibling total
    #[arg(long)]
    pub first_child_reference: bool,

    /// Write the allocated targets back to the system file
    #[arg(short, long)]
    pub write: bool,
}

/// Arguments for the derate command.
#[derive(Debug, Parser)]
pub struct DerateArgs {
    /// System file (TOML, or JSON with a .json extension)
    pub file: PathBuf,

    /// Node to analyse
    #[arg(short, long)]
    pub node: u32,

    /// Write the ratios and verdict back to the system file
    #[arg(short, long)]
    pub write: bool,
}

/// Arguments for the hri command.
#[derive(Debug, Parser)]
pub struct HriArgs {
    /// Probability level, e.g. "Level C - Occasional"
    #[arg(short, long)]
    pub probability: String,

    /// Severity level, e.g. "Medium"
    #[arg(short, long)]
    pub severity: String,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
