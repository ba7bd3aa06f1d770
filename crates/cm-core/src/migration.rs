//! Resolved and applied migration descriptors.
//!
//! Both descriptors are produced by collaborators outside this crate: script
//! discovery yields [`ResolvedMigration`]s and the schema history reader
//! yields [`AppliedMigration`]s. They are plain immutable values here.

use crate::version::MigrationVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a migration is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MigrationType {
    /// A CQL script executed statement by statement
    Cql,
    /// A programmatic migration driven through the database driver
    Driver,
}

impl std::fmt::Display for MigrationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MigrationType::Cql => write!(f, "CQL"),
            MigrationType::Driver => write!(f, "DRIVER"),
        }
    }
}

/// A migration discovered locally and available for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMigration {
    /// Version of this migration
    #[serde(deserialize_with = "crate::version::deserialize_numeric")]
    pub version: MigrationVersion,

    /// Human readable description
    pub description: String,

    /// Content checksum, if the migration type supports one
    #[serde(default)]
    pub checksum: Option<i32>,

    /// Script name or programmatic entry point
    pub script: String,

    /// Execution strategy
    #[serde(rename = "type")]
    pub migration_type: MigrationType,
}

/// A row of the schema history table recording one execution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMigration {
    /// Order in which this row was written
    #[serde(default)]
    pub installed_rank: u32,

    /// Version that was executed
    #[serde(deserialize_with = "crate::version::deserialize_numeric")]
    pub version: MigrationVersion,

    /// Description recorded at execution time
    pub description: String,

    /// Execution strategy recorded at execution time
    #[serde(rename = "type")]
    pub migration_type: MigrationType,

    /// Script name recorded at execution time
    pub script: String,

    /// Checksum recorded at execution time
    #[serde(default)]
    pub checksum: Option<i32>,

    /// When the execution finished
    pub installed_on: DateTime<Utc>,

    /// User that ran the migration
    #[serde(default)]
    pub installed_by: Option<String>,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,

    /// Whether the execution succeeded
    pub success: bool,
}
