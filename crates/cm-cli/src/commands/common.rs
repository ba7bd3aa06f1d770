//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use cm_core::{MigrationConfig, MigrationSnapshot};
use std::fmt;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that destructors run before the process exits.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) u8);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main.rs prints nothing for it.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the project configuration, honouring `--config` over `--project-dir`.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<MigrationConfig> {
    match &global.config {
        Some(path) => MigrationConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config {path}")),
        None => MigrationConfig::load_from_dir(Path::new(&global.project_dir))
            .context("Failed to load project config"),
    }
}

/// Load a migration snapshot file.
pub(crate) fn load_snapshot(path: &str) -> Result<MigrationSnapshot> {
    MigrationSnapshot::load(Path::new(path))
        .with_context(|| format!("Failed to load snapshot {path}"))
}
