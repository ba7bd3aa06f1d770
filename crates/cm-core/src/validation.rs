//! Consistency violations between resolved and applied migrations.
//!
//! Violations are collected, never raised: a caller running with strict
//! validation aborts on a non-empty [`ValidationReport`], a lenient caller
//! only warns.

use crate::version::MigrationVersion;
use serde::Serialize;
use std::fmt;

/// A single consistency violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// The history table records a migration that is not resolved locally
    NotResolved { version: MigrationVersion },

    /// A resolved migration has not been applied
    NotApplied { version: MigrationVersion },

    /// The checksum recorded at execution time differs from the local one
    ChecksumMismatch {
        version: MigrationVersion,
        applied: Option<i32>,
        resolved: Option<i32>,
    },

    /// The description recorded at execution time differs from the local one
    DescriptionMismatch {
        version: MigrationVersion,
        applied: String,
        resolved: String,
    },
}

impl ValidationError {
    /// Version the violation was found on.
    pub fn version(&self) -> &MigrationVersion {
        match self {
            ValidationError::NotResolved { version }
            | ValidationError::NotApplied { version }
            | ValidationError::ChecksumMismatch { version, .. }
            | ValidationError::DescriptionMismatch { version, .. } => version,
        }
    }
}

fn write_mismatch(
    f: &mut fmt::Formatter<'_>,
    field: &str,
    version: &MigrationVersion,
    applied: &dyn fmt::Display,
    resolved: &dyn fmt::Display,
) -> fmt::Result {
    write!(
        f,
        "Migration {field} mismatch for migration {version}\n\
         -> Applied to database : {applied}\n\
         -> Resolved locally    : {resolved}"
    )
}

struct NullableChecksum(Option<i32>);

impl fmt::Display for NullableChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(checksum) => write!(f, "{checksum}"),
            None => f.write_str("null"),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotResolved { version } => {
                write!(f, "Detected applied migration not resolved locally: {version}")
            }
            ValidationError::NotApplied { version } => {
                write!(f, "Detected resolved migration not applied to database: {version}")
            }
            ValidationError::ChecksumMismatch {
                version,
                applied,
                resolved,
            } => write_mismatch(
                f,
                "Checksum",
                version,
                &NullableChecksum(*applied),
                &NullableChecksum(*resolved),
            ),
            ValidationError::DescriptionMismatch {
                version,
                applied,
                resolved,
            } => write_mismatch(f, "Description", version, applied, resolved),
        }
    }
}

/// Every violation found in one reconciliation pass, in version order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// True when the resolved and applied sets are consistent.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Rendered messages, one per violation.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
