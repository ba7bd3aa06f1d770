//! Error types for cm-core

use thiserror::Error;

/// Core error type for cassandra-migration
#[derive(Error, Debug)]
pub enum CoreError {
    /// CM001: Configuration file not found
    #[error("[CM001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// CM002: Invalid configuration value
    #[error("[CM002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// CM003: Version string could not be parsed
    #[error("[CM003] Invalid migration version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// CM004: Baseline lies above the target
    #[error("[CM004] Baseline version {baseline} is above target version {target}")]
    BaselineAboveTarget { baseline: String, target: String },

    /// CM005: Two resolved migrations share a version
    #[error("[CM005] Found more than one resolved migration with version {version}")]
    DuplicateResolvedVersion { version: String },

    /// CM006: Two schema history rows share a version
    #[error("[CM006] Found more than one applied migration with version {version}")]
    DuplicateAppliedVersion { version: String },

    /// CM007: Snapshot file has an extension we cannot parse
    #[error("[CM007] Unsupported snapshot format '{path}': expected .yml, .yaml or .json")]
    UnsupportedSnapshotFormat { path: String },

    /// CM008: IO error with file path context
    #[error("[CM008] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// CM009: YAML parse error
    #[error("[CM009] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// CM010: JSON parse error
    #[error("[CM010] JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
