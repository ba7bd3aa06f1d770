//! Boundary values for one reconciliation pass.

use crate::error::{CoreError, CoreResult};
use crate::migration::{AppliedMigration, ResolvedMigration};
use crate::version::MigrationVersion;
use serde::Serialize;

/// Caller-supplied reconciliation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationSettings {
    /// Versions below this are assumed to pre-exist and are skipped
    pub baseline: MigrationVersion,

    /// Versions above this are not executed in the current run
    pub target: MigrationVersion,

    /// Allow migrations to be pending or missing without reporting them
    pub out_of_order: bool,
}

impl Default for ReconciliationSettings {
    fn default() -> Self {
        Self {
            baseline: MigrationVersion::zero(),
            target: MigrationVersion::latest(),
            out_of_order: false,
        }
    }
}

/// Boundaries every [`MigrationInfo`](crate::MigrationInfo) is classified against.
///
/// Always derived from the complete resolved and applied sets; never updated
/// in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationContext {
    pub baseline: MigrationVersion,
    pub target: MigrationVersion,
    /// Highest applied version, successful or not
    pub last_applied: MigrationVersion,
    /// Highest resolved version
    pub last_resolved: MigrationVersion,
    pub out_of_order: bool,
}

impl ReconciliationContext {
    /// Derive the context for one pass.
    ///
    /// Fails when the baseline lies above the target.
    pub fn derive(
        settings: &ReconciliationSettings,
        resolved: &[ResolvedMigration],
        applied: &[AppliedMigration],
    ) -> CoreResult<Self> {
        if settings.baseline > settings.target {
            return Err(CoreError::BaselineAboveTarget {
                baseline: settings.baseline.to_string(),
                target: settings.target.to_string(),
            });
        }

        Ok(Self {
            baseline: settings.baseline.clone(),
            target: settings.target.clone(),
            last_applied: max_version(applied.iter().map(|a| &a.version)),
            last_resolved: max_version(resolved.iter().map(|r| &r.version)),
            out_of_order: settings.out_of_order,
        })
    }
}

fn max_version<'a>(versions: impl Iterator<Item = &'a MigrationVersion>) -> MigrationVersion {
    versions.max().cloned().unwrap_or_else(MigrationVersion::zero)
}
