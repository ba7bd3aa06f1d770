//! Migration lifecycle states

use serde::{Deserialize, Serialize};

/// Lifecycle state of a single migration version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MigrationState {
    /// Resolved, not applied, eligible for the next migrate run
    Pending,
    /// Resolved, not applied, above the configured target
    AboveTarget,
    /// Resolved, not applied, below the baseline
    BelowBaseline,
    /// Resolved, not applied, older than the last applied migration
    Ignored,
    /// Applied successfully, script no longer resolved, older than the last resolved migration
    MissingSuccess,
    /// Applied with a failure, script no longer resolved, older than the last resolved migration
    MissingFailed,
    /// Resolved and applied successfully
    Success,
    /// Resolved and applied with a failure
    Failed,
    /// Applied successfully, newer than anything resolved locally
    FutureSuccess,
    /// Applied with a failure, newer than anything resolved locally
    FutureFailed,
}

impl MigrationState {
    /// Human readable label used in info tables.
    pub fn display_name(&self) -> &'static str {
        match self {
            MigrationState::Pending => "Pending",
            MigrationState::AboveTarget => "Above Target",
            MigrationState::BelowBaseline => "Below Baseline",
            MigrationState::Ignored => "Ignored",
            MigrationState::MissingSuccess => "Missing",
            MigrationState::MissingFailed => "Failed (Missing)",
            MigrationState::Success => "Success",
            MigrationState::Failed => "Failed",
            MigrationState::FutureSuccess => "Future",
            MigrationState::FutureFailed => "Failed (Future)",
        }
    }

    /// Whether a schema history row exists for this migration.
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            MigrationState::Success
                | MigrationState::Failed
                | MigrationState::MissingSuccess
                | MigrationState::MissingFailed
                | MigrationState::FutureSuccess
                | MigrationState::FutureFailed
        )
    }

    /// Whether the migration is available locally.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            MigrationState::Pending
                | MigrationState::AboveTarget
                | MigrationState::BelowBaseline
                | MigrationState::Ignored
                | MigrationState::Success
                | MigrationState::Failed
        )
    }

    /// Whether the recorded execution failed.
    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            MigrationState::Failed | MigrationState::MissingFailed | MigrationState::FutureFailed
        )
    }
}

impl std::fmt::Display for MigrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
