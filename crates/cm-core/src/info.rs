//! Per-version view joining a resolved and an applied migration.

use crate::context::ReconciliationContext;
use crate::migration::{AppliedMigration, MigrationType, ResolvedMigration};
use crate::state::MigrationState;
use crate::validation::ValidationError;
use crate::version::MigrationVersion;
use chrono::{DateTime, Utc};

/// The descriptors known for one version. At least one is always present.
#[derive(Debug, Clone, Copy)]
enum Descriptors<'a> {
    Resolved(&'a ResolvedMigration),
    Applied(&'a AppliedMigration),
    Both(&'a ResolvedMigration, &'a AppliedMigration),
}

/// Everything known about a single migration version in one pass.
///
/// Accessors prefer the applied descriptor when present, since it records
/// what actually ran against the cluster.
#[derive(Debug, Clone, Copy)]
pub struct MigrationInfo<'a> {
    descriptors: Descriptors<'a>,
    state: MigrationState,
    out_of_order: bool,
    above_baseline: bool,
}

impl<'a> MigrationInfo<'a> {
    /// Join the descriptors for one version and classify them.
    ///
    /// The boundaries needed later by [`validate`](Self::validate) are
    /// captured here, so an entry is always checked against the context it
    /// was classified with. Returns `None` when both descriptors are absent.
    pub fn new(
        resolved: Option<&'a ResolvedMigration>,
        applied: Option<&'a AppliedMigration>,
        context: &ReconciliationContext,
    ) -> Option<Self> {
        let descriptors = match (resolved, applied) {
            (Some(r), Some(a)) => Descriptors::Both(r, a),
            (Some(r), None) => Descriptors::Resolved(r),
            (None, Some(a)) => Descriptors::Applied(a),
            (None, None) => return None,
        };
        let version = match descriptors {
            Descriptors::Resolved(r) => &r.version,
            Descriptors::Applied(a) | Descriptors::Both(_, a) => &a.version,
        };
        Some(Self {
            descriptors,
            state: classify(descriptors, context),
            out_of_order: context.out_of_order,
            above_baseline: *version > context.baseline,
        })
    }

    pub fn resolved(&self) -> Option<&'a ResolvedMigration> {
        match self.descriptors {
            Descriptors::Resolved(r) | Descriptors::Both(r, _) => Some(r),
            Descriptors::Applied(_) => None,
        }
    }

    pub fn applied(&self) -> Option<&'a AppliedMigration> {
        match self.descriptors {
            Descriptors::Applied(a) | Descriptors::Both(_, a) => Some(a),
            Descriptors::Resolved(_) => None,
        }
    }

    pub fn version(&self) -> &'a MigrationVersion {
        match self.descriptors {
            Descriptors::Resolved(r) => &r.version,
            Descriptors::Applied(a) | Descriptors::Both(_, a) => &a.version,
        }
    }

    pub fn description(&self) -> &'a str {
        match self.descriptors {
            Descriptors::Resolved(r) => &r.description,
            Descriptors::Applied(a) | Descriptors::Both(_, a) => &a.description,
        }
    }

    pub fn script(&self) -> &'a str {
        match self.descriptors {
            Descriptors::Resolved(r) => &r.script,
            Descriptors::Applied(a) | Descriptors::Both(_, a) => &a.script,
        }
    }

    pub fn checksum(&self) -> Option<i32> {
        match self.descriptors {
            Descriptors::Resolved(r) => r.checksum,
            Descriptors::Applied(a) | Descriptors::Both(_, a) => a.checksum,
        }
    }

    pub fn migration_type(&self) -> MigrationType {
        match self.descriptors {
            Descriptors::Resolved(r) => r.migration_type,
            Descriptors::Applied(a) | Descriptors::Both(_, a) => a.migration_type,
        }
    }

    pub fn state(&self) -> MigrationState {
        self.state
    }

    pub fn installed_on(&self) -> Option<DateTime<Utc>> {
        self.applied().map(|a| a.installed_on)
    }

    /// Execution time in milliseconds, if the migration was applied.
    pub fn execution_time_ms(&self) -> Option<u64> {
        self.applied().map(|a| a.execution_time_ms)
    }

    /// Check this migration for consistency.
    ///
    /// Returns the first violation found, or `None` if the migration is
    /// consistent.
    pub fn validate(&self) -> Option<ValidationError> {
        let version = self.version();

        if !self.out_of_order && matches!(self.descriptors, Descriptors::Applied(_)) {
            return Some(ValidationError::NotResolved {
                version: version.clone(),
            });
        }

        if (!self.out_of_order && self.state == MigrationState::Pending)
            || self.state == MigrationState::Ignored
        {
            return Some(ValidationError::NotApplied {
                version: version.clone(),
            });
        }

        if let Descriptors::Both(resolved, applied) = self.descriptors {
            if self.above_baseline {
                if resolved.checksum != applied.checksum {
                    return Some(ValidationError::ChecksumMismatch {
                        version: version.clone(),
                        applied: applied.checksum,
                        resolved: resolved.checksum,
                    });
                }
                if resolved.description != applied.description {
                    return Some(ValidationError::DescriptionMismatch {
                        version: version.clone(),
                        applied: applied.description.clone(),
                        resolved: resolved.description.clone(),
                    });
                }
            }
        }

        None
    }
}

fn classify(descriptors: Descriptors<'_>, context: &ReconciliationContext) -> MigrationState {
    match descriptors {
        Descriptors::Resolved(resolved) => {
            let version = &resolved.version;
            if *version < context.baseline {
                MigrationState::BelowBaseline
            } else if *version > context.target {
                MigrationState::AboveTarget
            } else if *version < context.last_applied {
                MigrationState::Ignored
            } else {
                MigrationState::Pending
            }
        }
        Descriptors::Applied(applied) => {
            // Equality with last_resolved counts as future.
            let missing = applied.version < context.last_resolved;
            match (missing, applied.success) {
                (true, true) => MigrationState::MissingSuccess,
                (true, false) => MigrationState::MissingFailed,
                (false, true) => MigrationState::FutureSuccess,
                (false, false) => MigrationState::FutureFailed,
            }
        }
        Descriptors::Both(_, applied) => {
            if applied.success {
                MigrationState::Success
            } else {
                MigrationState::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "info_test.rs"]
mod tests;
