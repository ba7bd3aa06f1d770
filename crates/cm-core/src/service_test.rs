use super::*;
use crate::migration::MigrationType;
use crate::validation::ValidationError;
use chrono::{TimeZone, Utc};

fn v(s: &str) -> MigrationVersion {
    MigrationVersion::parse(s).unwrap()
}

fn resolved(version: &str, description: &str, checksum: i32) -> ResolvedMigration {
    ResolvedMigration {
        version: v(version),
        description: description.to_string(),
        checksum: Some(checksum),
        script: format!("V{version}__{description}.cql"),
        migration_type: MigrationType::Cql,
    }
}

fn applied(version: &str, description: &str, checksum: i32, success: bool) -> AppliedMigration {
    AppliedMigration {
        installed_rank: 0,
        version: v(version),
        description: description.to_string(),
        migration_type: MigrationType::Cql,
        script: format!("V{version}__{description}.cql"),
        checksum: Some(checksum),
        installed_on: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        installed_by: None,
        execution_time_ms: 10,
        success,
    }
}

fn settings(baseline: &str, target: &str, out_of_order: bool) -> ReconciliationSettings {
    ReconciliationSettings {
        baseline: v(baseline),
        target: v(target),
        out_of_order,
    }
}

fn states(service: &MigrationInfoService<'_>) -> Vec<(String, MigrationState)> {
    service
        .all()
        .iter()
        .map(|info| (info.version().to_string(), info.state()))
        .collect()
}

fn versions(infos: Vec<&MigrationInfo<'_>>) -> Vec<String> {
    infos.iter().map(|i| i.version().to_string()).collect()
}

#[test]
fn test_scenario_pending_after_applied() {
    let resolved = vec![resolved("1.0", "A", 10), resolved("2.0", "B", 20)];
    let applied = vec![applied("1.0", "A", 10, true)];
    let service =
        MigrationInfoService::new(&resolved, &applied, &settings("0", "2.0", true)).unwrap();

    assert_eq!(
        states(&service),
        vec![
            ("1.0".to_string(), MigrationState::Success),
            ("2.0".to_string(), MigrationState::Pending),
        ]
    );
    assert!(service.validate().is_valid());
}

#[test]
fn test_scenario_checksum_drift() {
    let resolved = vec![resolved("1.0", "A", 10)];
    let applied = vec![applied("1.0", "A", 99, true)];
    let service =
        MigrationInfoService::new(&resolved, &applied, &ReconciliationSettings::default()).unwrap();

    let report = service.validate();
    assert_eq!(report.len(), 1);
    assert_eq!(
        report.errors()[0],
        ValidationError::ChecksumMismatch {
            version: v("1.0"),
            applied: Some(99),
            resolved: Some(10),
        }
    );
}

#[test]
fn test_scenario_applied_with_nothing_resolved_is_future() {
    let applied = vec![applied("1.0", "A", 1, true)];
    let service =
        MigrationInfoService::new(&[], &applied, &ReconciliationSettings::default()).unwrap();

    assert_eq!(service.context().last_resolved, MigrationVersion::zero());
    assert_eq!(service.all()[0].state(), MigrationState::FutureSuccess);
}

#[test]
fn test_scenario_gap_is_ignored() {
    let resolved = vec![
        resolved("1.0", "A", 1),
        resolved("2.0", "B", 2),
        resolved("3.0", "C", 3),
    ];
    let applied = vec![applied("1.0", "A", 1, true), applied("3.0", "C", 3, true)];
    let service =
        MigrationInfoService::new(&resolved, &applied, &ReconciliationSettings::default()).unwrap();

    assert_eq!(service.context().last_applied, v("3.0"));
    assert_eq!(service.all()[1].state(), MigrationState::Ignored);

    let report = service.validate();
    assert_eq!(
        report.errors(),
        &[ValidationError::NotApplied { version: v("2.0") }]
    );
}

#[test]
fn test_scenario_baseline_and_target() {
    let resolved = vec![
        resolved("1.0", "A", 1),
        resolved("2.0", "B", 2),
        resolved("3.0", "C", 3),
    ];

    let lenient = settings("2.0", "3.0", true);
    let service = MigrationInfoService::new(&resolved, &[], &lenient).unwrap();
    assert_eq!(
        states(&service),
        vec![
            ("1.0".to_string(), MigrationState::BelowBaseline),
            ("2.0".to_string(), MigrationState::Pending),
            ("3.0".to_string(), MigrationState::Pending),
        ]
    );
    assert!(service.validate().is_empty());

    let strict = settings("2.0", "3.0", false);
    let service = MigrationInfoService::new(&resolved, &[], &strict).unwrap();
    let report = service.validate();
    let versions: Vec<String> = report.errors().iter().map(|e| e.version().to_string()).collect();
    assert_eq!(versions, vec!["2.0", "3.0"]);
}

#[test]
fn test_all_is_strictly_ascending() {
    let resolved = vec![
        resolved("1.10", "J", 1),
        resolved("1.2", "B", 1),
        resolved("3", "C", 1),
    ];
    let applied = vec![
        applied("2.5", "Gone", 1, true),
        applied("1.2", "B", 1, true),
        applied("0.9", "Old", 1, false),
    ];
    let service =
        MigrationInfoService::new(&resolved, &applied, &ReconciliationSettings::default()).unwrap();

    let versions: Vec<&MigrationVersion> = service.all().iter().map(|i| i.version()).collect();
    assert_eq!(versions.len(), 5);
    assert!(versions.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(versions[0].to_string(), "0.9");
    assert_eq!(versions[4].to_string(), "3");
}

#[test]
fn test_merge_matches_differently_spelled_versions() {
    let resolved = vec![resolved("1", "A", 1)];
    let applied = vec![applied("1.0.0", "A", 1, true)];
    let service =
        MigrationInfoService::new(&resolved, &applied, &ReconciliationSettings::default()).unwrap();

    assert_eq!(service.all().len(), 1);
    assert_eq!(service.all()[0].state(), MigrationState::Success);
}

#[test]
fn test_duplicate_resolved_version_rejected() {
    let resolved = vec![resolved("1", "A", 1), resolved("1.0", "B", 2)];
    let err = MigrationInfoService::new(&resolved, &[], &ReconciliationSettings::default())
        .unwrap_err();
    assert!(matches!(err, CoreError::DuplicateResolvedVersion { .. }));
}

#[test]
fn test_duplicate_applied_version_rejected() {
    let applied = vec![applied("2", "A", 1, false), applied("2", "A", 1, true)];
    let err = MigrationInfoService::new(&[], &applied, &ReconciliationSettings::default())
        .unwrap_err();
    assert!(matches!(err, CoreError::DuplicateAppliedVersion { .. }));
}

#[test]
fn test_latest_descriptor_version_rejected() {
    let resolved = vec![ResolvedMigration {
        version: MigrationVersion::latest(),
        ..resolved("1", "A", 1)
    }];
    let applied = vec![applied("1", "A", 1, true)];
    let err = MigrationInfoService::new(&resolved, &applied, &ReconciliationSettings::default())
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidVersion { .. }));

    let applied = vec![AppliedMigration {
        version: MigrationVersion::latest(),
        ..applied[0].clone()
    }];
    let err =
        MigrationInfoService::new(&[], &applied, &ReconciliationSettings::default()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidVersion { .. }));
}

#[test]
fn test_baseline_above_target_rejected() {
    let err = MigrationInfoService::new(&[], &[], &settings("3", "2", false)).unwrap_err();
    assert!(matches!(err, CoreError::BaselineAboveTarget { .. }));
}

#[test]
fn test_empty_inputs() {
    let service = MigrationInfoService::new(&[], &[], &ReconciliationSettings::default()).unwrap();
    assert!(service.all().is_empty());
    assert!(service.current().is_none());
    assert!(service.validate().is_valid());
    assert_eq!(service.context().last_applied, MigrationVersion::zero());
}

#[test]
fn test_boundaries_include_failed_rows() {
    let resolved = vec![resolved("1", "A", 1), resolved("2", "B", 2)];
    let applied = vec![applied("1", "A", 1, true), applied("3", "C", 3, false)];
    let service =
        MigrationInfoService::new(&resolved, &applied, &ReconciliationSettings::default()).unwrap();

    assert_eq!(service.context().last_applied, v("3"));
    assert_eq!(service.context().last_resolved, v("2"));
    assert_eq!(
        states(&service),
        vec![
            ("1".to_string(), MigrationState::Success),
            ("2".to_string(), MigrationState::Ignored),
            ("3".to_string(), MigrationState::FutureFailed),
        ]
    );
}

#[test]
fn test_views() {
    let resolved = vec![
        resolved("1", "A", 1),
        resolved("2", "B", 2),
        resolved("4", "D", 4),
        resolved("5", "E", 5),
        resolved("9", "Z", 9),
    ];
    let applied = vec![
        applied("1", "A", 1, true),
        applied("2", "B", 2, false),
        applied("3", "C", 3, true),
    ];
    let service =
        MigrationInfoService::new(&resolved, &applied, &settings("0", "5", false)).unwrap();

    assert_eq!(versions(service.applied()), vec!["1", "2", "3"]);
    assert_eq!(versions(service.pending()), vec!["4", "5"]);
    assert_eq!(versions(service.failed()), vec!["2"]);
    assert_eq!(service.current().unwrap().version(), &v("3"));
    assert_eq!(service.current().unwrap().state(), MigrationState::MissingSuccess);
    assert_eq!(service.all()[5].state(), MigrationState::AboveTarget);
}

#[test]
fn test_validate_reports_every_violation_in_order() {
    let resolved = vec![
        resolved("1", "A", 1),
        resolved("2", "B", 2),
        resolved("4", "D", 4),
        resolved("6", "F", 6),
    ];
    let applied = vec![
        applied("1", "A-renamed", 1, true),
        applied("2", "B", 20, true),
        applied("3", "C", 3, true),
        applied("5", "E", 5, true),
    ];
    let service =
        MigrationInfoService::new(&resolved, &applied, &ReconciliationSettings::default()).unwrap();

    let report = service.validate();
    let kinds: Vec<(String, &str)> = report
        .errors()
        .iter()
        .map(|e| {
            let kind = match e {
                ValidationError::NotResolved { .. } => "not_resolved",
                ValidationError::NotApplied { .. } => "not_applied",
                ValidationError::ChecksumMismatch { .. } => "checksum",
                ValidationError::DescriptionMismatch { .. } => "description",
            };
            (e.version().to_string(), kind)
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            ("1".to_string(), "description"),
            ("2".to_string(), "checksum"),
            ("3".to_string(), "not_resolved"),
            ("4".to_string(), "not_applied"),
            ("5".to_string(), "not_resolved"),
            ("6".to_string(), "not_applied"),
        ]
    );
    assert_eq!(report.messages().len(), 6);
}

#[test]
fn test_validate_is_idempotent() {
    let resolved = vec![resolved("1", "A", 1), resolved("2", "B", 2)];
    let applied = vec![applied("1", "A", 5, true)];
    let service =
        MigrationInfoService::new(&resolved, &applied, &ReconciliationSettings::default()).unwrap();

    let first = service.validate();
    let second = service.validate();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_rebuild_recomputes_boundaries() {
    let mut resolved = vec![resolved("1", "A", 1), resolved("2", "B", 2)];
    let applied = vec![applied("2", "B", 2, true)];

    {
        let service =
            MigrationInfoService::new(&resolved, &applied, &ReconciliationSettings::default())
                .unwrap();
        assert_eq!(service.context().last_resolved, v("2"));
        assert_eq!(service.all()[0].state(), MigrationState::Ignored);
    }

    resolved.truncate(1);
    let service =
        MigrationInfoService::new(&resolved, &applied, &ReconciliationSettings::default()).unwrap();
    assert_eq!(service.context().last_resolved, v("1"));
    assert_eq!(service.all()[1].state(), MigrationState::FutureSuccess);
}

#[test]
fn test_service_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MigrationInfoService<'static>>();
}
