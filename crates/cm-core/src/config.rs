//! Configuration types and parsing for cassandra-migration.yml

use crate::context::ReconciliationSettings;
use crate::error::{CoreError, CoreResult};
use crate::version::MigrationVersion;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding `target.version`
pub const TARGET_VERSION_ENV: &str = "CM_TARGET_VERSION";

/// Environment variable overriding `scripts.allow_out_of_order`
pub const ALLOW_OUT_OF_ORDER_ENV: &str = "CM_ALLOW_OUT_OF_ORDER";

const HISTORY_TABLE: &str = "cassandra_migration_version";

const DEFAULT_BASELINE_DESCRIPTION: &str = "<< Cassandra Baseline >>";

/// Project configuration from cassandra-migration.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationConfig {
    /// Keyspace the migrations are applied to
    pub keyspace: KeyspaceConfig,

    /// Schema history table settings
    #[serde(default)]
    pub table: TableConfig,

    /// Migration script settings
    #[serde(default)]
    pub scripts: ScriptsConfig,

    /// Baseline settings
    #[serde(default)]
    pub baseline: BaselineConfig,

    /// Target settings
    #[serde(default)]
    pub target: TargetConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Keyspace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyspaceConfig {
    /// Keyspace name
    pub name: String,
}

/// Schema history table configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Prefix prepended to the history table name
    #[serde(default)]
    pub prefix: String,
}

/// Migration script configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptsConfig {
    /// Allow migrations older than the last applied one to stay unapplied
    #[serde(default)]
    pub allow_out_of_order: bool,
}

/// Baseline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaselineConfig {
    /// Versions below this are treated as already present (default: none)
    #[serde(default)]
    pub version: Option<MigrationVersion>,

    /// Description recorded for the baseline marker
    #[serde(default = "default_baseline_description")]
    pub description: String,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            version: None,
            description: default_baseline_description(),
        }
    }
}

fn default_baseline_description() -> String {
    DEFAULT_BASELINE_DESCRIPTION.to_string()
}

/// Target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Highest version to migrate to (default: latest)
    #[serde(default = "MigrationVersion::latest")]
    pub version: MigrationVersion,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            version: MigrationVersion::latest(),
        }
    }
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Abort when validation reports any violation (default: true)
    #[serde(default = "default_true")]
    pub strict: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

fn default_true() -> bool {
    true
}

impl MigrationConfig {
    /// Load configuration from a file path, applying environment overrides
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: MigrationConfig = serde_yaml::from_str(&content)?;
        config.apply_env_overrides()?;
        config.validate()?;
        log::debug!("Loaded migration config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for cassandra-migration.yml or cassandra-migration.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("cassandra-migration.yml");
        let yaml_path = dir.join("cassandra-migration.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Override settings from `CM_TARGET_VERSION` and `CM_ALLOW_OUT_OF_ORDER`
    pub fn apply_env_overrides(&mut self) -> CoreResult<()> {
        if let Ok(target) = std::env::var(TARGET_VERSION_ENV) {
            self.target.version =
                MigrationVersion::parse(&target).map_err(|e| CoreError::ConfigInvalid {
                    message: format!("{TARGET_VERSION_ENV}: {e}"),
                })?;
        }

        if let Ok(flag) = std::env::var(ALLOW_OUT_OF_ORDER_ENV) {
            self.scripts.allow_out_of_order =
                flag.trim().parse().map_err(|_| CoreError::ConfigInvalid {
                    message: format!(
                        "{ALLOW_OUT_OF_ORDER_ENV} must be 'true' or 'false', found '{flag}'"
                    ),
                })?;
        }

        Ok(())
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.keyspace.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Keyspace name cannot be empty".to_string(),
            });
        }

        if let Some(baseline) = &self.baseline.version {
            if *baseline > self.target.version {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "Baseline version {} is above target version {}",
                        baseline, self.target.version
                    ),
                });
            }
        }

        Ok(())
    }

    /// Fully qualified name of the schema history table
    pub fn history_table(&self) -> String {
        format!("{}.{}{}", self.keyspace.name, self.table.prefix, HISTORY_TABLE)
    }

    /// Boundary parameters for a reconciliation pass
    pub fn reconciliation_settings(&self) -> ReconciliationSettings {
        ReconciliationSettings {
            baseline: self
                .baseline
                .version
                .clone()
                .unwrap_or_else(MigrationVersion::zero),
            target: self.target.version.clone(),
            out_of_order: self.scripts.allow_out_of_order,
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
