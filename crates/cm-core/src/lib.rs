//! cm-core - Core library for cassandra-migration
//!
//! This crate reconciles the migrations resolved locally with the rows of the
//! schema history table, classifies every version into a lifecycle state and
//! reports inconsistencies that must block a migrate run.

pub mod config;
pub mod context;
pub mod error;
pub mod info;
pub mod migration;
pub mod service;
pub mod snapshot;
pub mod state;
pub mod validation;
pub mod version;

pub use config::MigrationConfig;
pub use context::{ReconciliationContext, ReconciliationSettings};
pub use error::{CoreError, CoreResult};
pub use info::MigrationInfo;
pub use migration::{AppliedMigration, MigrationType, ResolvedMigration};
pub use service::MigrationInfoService;
pub use snapshot::MigrationSnapshot;
pub use state::MigrationState;
pub use validation::{ValidationError, ValidationReport};
pub use version::MigrationVersion;
