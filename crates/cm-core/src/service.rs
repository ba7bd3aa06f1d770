//! Merges resolved and applied migrations into one ordered view.

use crate::context::{ReconciliationContext, ReconciliationSettings};
use crate::error::{CoreError, CoreResult};
use crate::info::MigrationInfo;
use crate::migration::{AppliedMigration, ResolvedMigration};
use crate::state::MigrationState;
use crate::validation::ValidationReport;
use crate::version::MigrationVersion;
use std::collections::BTreeMap;

/// One reconciliation pass over a resolved and an applied migration set.
///
/// The service borrows its inputs; build a new one whenever either set
/// changes, since the context is derived once at construction.
#[derive(Debug, Clone)]
pub struct MigrationInfoService<'a> {
    context: ReconciliationContext,
    infos: Vec<MigrationInfo<'a>>,
}

#[derive(Default)]
struct Slot<'a> {
    resolved: Option<&'a ResolvedMigration>,
    applied: Option<&'a AppliedMigration>,
}

impl<'a> MigrationInfoService<'a> {
    /// Build the merged view.
    ///
    /// Fails on a baseline above the target, or when either input contains
    /// the same version twice.
    pub fn new(
        resolved: &'a [ResolvedMigration],
        applied: &'a [AppliedMigration],
        settings: &ReconciliationSettings,
    ) -> CoreResult<Self> {
        let context = ReconciliationContext::derive(settings, resolved, applied)?;

        let mut slots: BTreeMap<&'a MigrationVersion, Slot<'a>> = BTreeMap::new();
        for migration in resolved {
            reject_latest(&migration.version)?;
            let slot = slots.entry(&migration.version).or_default();
            if slot.resolved.replace(migration).is_some() {
                return Err(CoreError::DuplicateResolvedVersion {
                    version: migration.version.to_string(),
                });
            }
        }
        for migration in applied {
            reject_latest(&migration.version)?;
            let slot = slots.entry(&migration.version).or_default();
            if slot.applied.replace(migration).is_some() {
                return Err(CoreError::DuplicateAppliedVersion {
                    version: migration.version.to_string(),
                });
            }
        }

        let infos: Vec<MigrationInfo<'a>> = slots
            .into_values()
            .filter_map(|slot| MigrationInfo::new(slot.resolved, slot.applied, &context))
            .collect();

        log::debug!(
            "Reconciled {} resolved and {} applied migrations into {} entries \
             (baseline {}, target {}, last applied {}, last resolved {})",
            resolved.len(),
            applied.len(),
            infos.len(),
            context.baseline,
            context.target,
            context.last_applied,
            context.last_resolved,
        );

        Ok(Self { context, infos })
    }

    /// The boundaries this pass was classified against.
    pub fn context(&self) -> &ReconciliationContext {
        &self.context
    }

    /// Every migration, strictly ascending by version.
    pub fn all(&self) -> &[MigrationInfo<'a>] {
        &self.infos
    }

    /// Migrations with a schema history row, successful or not.
    pub fn applied(&self) -> Vec<&MigrationInfo<'a>> {
        self.filter(|state| state.is_applied())
    }

    /// Migrations the next migrate run will execute, in execution order.
    pub fn pending(&self) -> Vec<&MigrationInfo<'a>> {
        self.filter(|state| state == MigrationState::Pending)
    }

    /// Migrations whose recorded execution failed.
    pub fn failed(&self) -> Vec<&MigrationInfo<'a>> {
        self.filter(|state| state.is_failed())
    }

    /// The applied migration with the highest version.
    pub fn current(&self) -> Option<&MigrationInfo<'a>> {
        self.infos
            .iter()
            .rev()
            .find(|info| info.state().is_applied())
    }

    /// Collect every consistency violation, in version order.
    pub fn validate(&self) -> ValidationReport {
        ValidationReport::new(
            self.infos
                .iter()
                .filter_map(MigrationInfo::validate)
                .collect(),
        )
    }

    fn filter(&self, keep: impl Fn(MigrationState) -> bool) -> Vec<&MigrationInfo<'a>> {
        self.infos.iter().filter(|info| keep(info.state())).collect()
    }
}

fn reject_latest(version: &MigrationVersion) -> CoreResult<()> {
    if version.is_latest() {
        return Err(CoreError::InvalidVersion {
            version: version.as_str().to_string(),
            reason: "'latest' is not a migration version".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
