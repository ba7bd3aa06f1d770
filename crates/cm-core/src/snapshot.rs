//! Materialized migration state handed over by collaborators.
//!
//! Script discovery and the schema history reader live outside this crate.
//! A snapshot file captures their output so a reconciliation pass can be run
//! offline.

use crate::context::ReconciliationSettings;
use crate::error::{CoreError, CoreResult};
use crate::migration::{AppliedMigration, ResolvedMigration};
use crate::service::MigrationInfoService;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Resolved migrations and schema history rows captured together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationSnapshot {
    /// Migrations discovered locally
    #[serde(default)]
    pub resolved: Vec<ResolvedMigration>,

    /// Rows of the schema history table
    #[serde(default)]
    pub applied: Vec<AppliedMigration>,
}

impl MigrationSnapshot {
    /// Load a snapshot from a `.yml`, `.yaml` or `.json` file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;

        let snapshot: MigrationSnapshot = match extension.as_deref() {
            Some("yml") | Some("yaml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(CoreError::UnsupportedSnapshotFormat {
                    path: path.display().to_string(),
                })
            }
        };

        log::debug!(
            "Loaded snapshot {} ({} resolved, {} applied)",
            path.display(),
            snapshot.resolved.len(),
            snapshot.applied.len()
        );
        Ok(snapshot)
    }

    /// Run a reconciliation pass over this snapshot
    pub fn info_service(
        &self,
        settings: &ReconciliationSettings,
    ) -> CoreResult<MigrationInfoService<'_>> {
        MigrationInfoService::new(&self.resolved, &self.applied, settings)
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
