//! Info command implementation

use anyhow::{Context, Result};
use cm_core::{MigrationInfo, MigrationInfoService};
use serde::Serialize;

use crate::cli::{GlobalArgs, InfoArgs, InfoOutput, InfoView};
use crate::commands::common::{load_config, load_snapshot};

const HEADERS: [&str; 5] = ["Version", "Description", "Type", "Installed On", "State"];

/// Execute the info command
pub async fn execute(args: &InfoArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let snapshot = load_snapshot(&args.snapshot)?;
    let service = snapshot
        .info_service(&config.reconciliation_settings())
        .context("Failed to reconcile migrations")?;

    if global.verbose {
        let ctx = service.context();
        eprintln!("[verbose] Schema history table: {}", config.history_table());
        eprintln!(
            "[verbose] Baseline {}, target {}, last applied {}, last resolved {}",
            ctx.baseline, ctx.target, ctx.last_applied, ctx.last_resolved
        );
    }

    let rows: Vec<InfoRow> = select_view(&service, args.state)
        .into_iter()
        .map(InfoRow::from_info)
        .collect();

    match args.output {
        InfoOutput::Table => print!("{}", render_table(&rows)),
        InfoOutput::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }

    Ok(())
}

fn select_view<'s, 'a>(
    service: &'s MigrationInfoService<'a>,
    view: InfoView,
) -> Vec<&'s MigrationInfo<'a>> {
    match view {
        InfoView::All => service.all().iter().collect(),
        InfoView::Pending => service.pending(),
        InfoView::Applied => service.applied(),
        InfoView::Failed => service.failed(),
        InfoView::Current => service.current().into_iter().collect(),
    }
}

/// One migration as displayed
#[derive(Debug, Serialize)]
struct InfoRow {
    version: String,
    description: String,
    #[serde(rename = "type")]
    migration_type: String,
    script: String,
    checksum: Option<i32>,
    installed_on: Option<String>,
    execution_time_ms: Option<u64>,
    state: String,
}

impl InfoRow {
    fn from_info(info: &MigrationInfo<'_>) -> Self {
        Self {
            version: info.version().to_string(),
            description: info.description().to_string(),
            migration_type: info.migration_type().to_string(),
            script: info.script().to_string(),
            checksum: info.checksum(),
            installed_on: info
                .installed_on()
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string()),
            execution_time_ms: info.execution_time_ms(),
            state: info.state().display_name().to_string(),
        }
    }

    fn cells(&self) -> [&str; 5] {
        [
            self.version.as_str(),
            self.description.as_str(),
            self.migration_type.as_str(),
            self.installed_on.as_deref().unwrap_or(""),
            self.state.as_str(),
        ]
    }
}

/// Render rows as an ASCII table
fn render_table(rows: &[InfoRow]) -> String {
    if rows.is_empty() {
        return "No migrations found.\n".to_string();
    }

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let format_line = |cells: [&str; 5]| -> String {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(widths) {
            line.push_str(&format!(" {:<width$} |", cell, width = width));
        }
        line.push('\n');
        line
    };

    let mut out = String::new();
    out.push_str(&border);
    out.push_str(&format_line(HEADERS));
    out.push_str(&border);
    for row in rows {
        out.push_str(&format_line(row.cells()));
    }
    out.push_str(&border);
    out
}

#[cfg(test)]
#[path = "info_test.rs"]
mod tests;
