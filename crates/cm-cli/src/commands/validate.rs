//! Validate command implementation

use anyhow::{Context, Result};
use cm_core::ValidationReport;

use crate::cli::{GlobalArgs, ValidateArgs};
use crate::commands::common::{load_config, load_snapshot, ExitCode};

/// Validation result severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Execute the validate command
pub async fn execute(args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let snapshot = load_snapshot(&args.snapshot)?;
    let service = snapshot
        .info_service(&config.reconciliation_settings())
        .context("Failed to reconcile migrations")?;

    if global.verbose {
        eprintln!(
            "[verbose] Validating {} migrations against {}",
            service.all().len(),
            config.history_table()
        );
    }

    let report = service.validate();
    if report.is_valid() {
        println!("Successfully validated {} migrations", service.all().len());
        return Ok(());
    }

    let severity = if config.validation.strict && !args.lenient {
        Severity::Error
    } else {
        Severity::Warning
    };

    print!("{}", render_report(&report, severity));
    println!(
        "\n{} validation {} found",
        report.len(),
        if report.len() == 1 { "issue" } else { "issues" }
    );

    if severity == Severity::Error {
        return Err(ExitCode(1).into());
    }

    for error in report.errors() {
        log::warn!("Ignoring validation issue: {error}");
    }
    Ok(())
}

/// Render every violation, one block per migration
fn render_report(report: &ValidationReport, severity: Severity) -> String {
    report
        .errors()
        .iter()
        .map(|error| format!("[{severity}] {error}\n"))
        .collect()
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
