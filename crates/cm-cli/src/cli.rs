//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// cassandra-migration - inspect and validate versioned keyspace migrations
#[derive(Parser, Debug)]
#[command(name = "cm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the state of every migration
    Info(InfoArgs),

    /// Check resolved migrations against the schema history
    Validate(ValidateArgs),
}

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Snapshot file with resolved and applied migrations (.yml, .yaml or .json)
    #[arg(short, long, env = "CM_SNAPSHOT")]
    pub snapshot: String,

    /// Which migrations to show
    #[arg(long, value_enum, default_value = "all")]
    pub state: InfoView,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: InfoOutput,
}

/// Filtered views over the reconciled migrations
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoView {
    /// Every migration
    All,
    /// Migrations the next migrate run will execute
    Pending,
    /// Migrations recorded in the schema history
    Applied,
    /// Migrations whose recorded execution failed
    Failed,
    /// The most recently applied migration
    Current,
}

/// Info output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoOutput {
    /// ASCII table
    Table,
    /// JSON output
    Json,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Snapshot file with resolved and applied migrations (.yml, .yaml or .json)
    #[arg(short, long, env = "CM_SNAPSHOT")]
    pub snapshot: String,

    /// Report violations as warnings instead of failing
    #[arg(long)]
    pub lenient: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
