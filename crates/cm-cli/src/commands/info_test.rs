use super::*;
use cm_core::{MigrationSnapshot, ReconciliationSettings};

const SNAPSHOT: &str = r#"
resolved:
  - version: "1.0.0"
    description: First
    checksum: 1
    script: V1_0_0__First.cql
    type: CQL
  - version: "2.0"
    description: Second migration
    checksum: 2
    script: V2_0__Second_migration.cql
    type: CQL
applied:
  - installed_rank: 1
    version: "1.0.0"
    description: First
    type: CQL
    script: V1_0_0__First.cql
    checksum: 1
    installed_on: "2024-05-02T08:00:01Z"
    execution_time_ms: 311
    success: true
"#;

fn snapshot() -> MigrationSnapshot {
    serde_yaml::from_str(SNAPSHOT).unwrap()
}

#[test]
fn test_render_table() {
    let snapshot = snapshot();
    let service = snapshot
        .info_service(&ReconciliationSettings::default())
        .unwrap();
    let rows: Vec<InfoRow> = service.all().iter().map(InfoRow::from_info).collect();

    let expected = "\
+---------+------------------+------+---------------------+---------+
| Version | Description      | Type | Installed On        | State   |
+---------+------------------+------+---------------------+---------+
| 1.0.0   | First            | CQL  | 2024-05-02 08:00:01 | Success |
| 2.0     | Second migration | CQL  |                     | Pending |
+---------+------------------+------+---------------------+---------+
";
    assert_eq!(render_table(&rows), expected);
}

#[test]
fn test_render_empty_table() {
    assert_eq!(render_table(&[]), "No migrations found.\n");
}

#[test]
fn test_select_view() {
    let snapshot = snapshot();
    let service = snapshot
        .info_service(&ReconciliationSettings::default())
        .unwrap();

    let versions = |view| -> Vec<String> {
        select_view(&service, view)
            .iter()
            .map(|i| i.version().to_string())
            .collect()
    };

    assert_eq!(versions(InfoView::All), vec!["1.0.0", "2.0"]);
    assert_eq!(versions(InfoView::Pending), vec!["2.0"]);
    assert_eq!(versions(InfoView::Applied), vec!["1.0.0"]);
    assert_eq!(versions(InfoView::Current), vec!["1.0.0"]);
    assert!(versions(InfoView::Failed).is_empty());
}

#[test]
fn test_row_json_shape() {
    let snapshot = snapshot();
    let service = snapshot
        .info_service(&ReconciliationSettings::default())
        .unwrap();
    let row = InfoRow::from_info(&service.all()[0]);

    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(json["type"], "CQL");
    assert_eq!(json["state"], "Success");
    assert_eq!(json["execution_time_ms"], 311);
    assert_eq!(json["installed_on"], "2024-05-02 08:00:01");
}
