use std::io::Write;

use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;

use oceanconf::catalog::{Catalog, CellValue, EntityKind, SortDirection};

const CATALOG: &str = r#"{
    "loggers": [
        {"id": 1, "name": "MLOG-1", "serial_number": "ML-001", "firmware_version": "2.0", "notes": null},
        {"id": 2, "name": "MLOG-2", "serial_number": "ML-002", "firmware_version": null, "notes": "bench spare"}
    ],
    "sensors": [
        {"id": 10, "sensor_type_id": 1, "name": "CTD", "serial_number": "S-010", "notes": null}
    ],
    "sensor_types": [
        {"id": 1, "name": "Conductivity", "manufacturer": "Sea-Bird", "description": null}
    ],
    "platforms": [
        {"id": 5, "name": "Mooring A", "platform_type": "mooring", "latitude": 54.1, "longitude": 7.9, "notes": null}
    ],
    "deck_units": [
        {"id": 7, "name": "DU-7", "serial_number": "DU-2020-07", "notes": null}
    ],
    "calibration_coefficients": [
        {"id": 1, "sensor_id": 10, "name": "offset", "value": -0.012, "calibrated_at": "2024-03-01T09:00:00Z"},
        {"id": 2, "sensor_id": 10, "name": "slope", "value": 1.003, "calibrated_at": null}
    ],
    "vessels": [
        {"id": 1, "name": "RV Meteor", "call_sign": "DBBH", "home_port": "Hamburg"}
    ],
    "contacts": [
        {"id": 1, "name": "M. Jansen", "email": "jansen@example.org", "phone": null, "organisation": null}
    ],
    "devices": [
        {"id": 1, "name": "Winch", "serial_number": null, "description": null}
    ],
    "units": [
        {"id": 1, "name": "decibar", "symbol": "dbar", "description": null}
    ],
    "platform_contains_logger": [
        {"platform_id": 5, "logger_id": 1, "valid_from": "2023-05-01T00:00:00Z", "valid_until": "2024-05-01T00:00:00Z"},
        {"platform_id": 5, "logger_id": 2, "valid_from": "2024-05-01T00:00:00Z", "valid_until": null}
    ],
    "platform_contains_deck_unit": [
        {"platform_id": 5, "deck_unit_id": 7, "valid_from": "2023-05-01T00:00:00Z", "valid_until": null}
    ],
    "logger_contains_sensor": [
        {"logger_id": 1, "sensor_id": 10, "valid_from": "2023-05-01T00:00:00Z", "valid_until": null}
    ],
    "logger_allocates_deck_unit": [
        {"logger_id": 1, "deck_unit_id": 7, "valid_from": "2023-05-01T00:00:00Z", "valid_until": null}
    ]
}"#;

fn write_catalog() -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!(
        "oceanconf-catalog-{}.json",
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();
    path
}

#[test]
fn test_load_full_catalog() {
    let path = write_catalog();
    let catalog = Catalog::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    for kind in EntityKind::iter() {
        assert!(
            catalog.row_count(kind) > 0,
            "expected rows in table {kind}"
        );
    }
    assert_eq!(catalog.row_count(EntityKind::Logger), 2);
    assert_eq!(catalog.loggers[1].notes.as_deref(), Some("bench spare"));
}

#[test]
fn test_load_missing_file_reports_path() {
    let err = Catalog::load("/nonexistent/catalog.json").unwrap_err();
    assert!(format!("{err}").contains("/nonexistent/catalog.json"));
}

#[test]
fn test_load_malformed_document_fails() {
    let path = std::env::temp_dir().join(format!(
        "oceanconf-malformed-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, "{ not json").unwrap();
    let result = Catalog::load(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[test]
fn test_every_table_projects_consistent_rows() {
    let catalog: Catalog = serde_json::from_str(CATALOG).unwrap();
    for kind in EntityKind::iter() {
        let table = catalog.table(kind);
        assert_eq!(table.kind, kind);
        assert_eq!(table.rows.len(), catalog.row_count(kind));
        for row in &table.rows {
            assert_eq!(row.len(), table.columns.len(), "ragged row in {kind}");
        }
    }
}

#[test]
fn test_timestamp_columns_sort_chronologically() {
    let catalog: Catalog = serde_json::from_str(CATALOG).unwrap();
    let mut table = catalog.table(EntityKind::PlatformContainsLogger);
    table.sort_by("valid_from", SortDirection::Descending);
    assert_eq!(table.rows[0][1], CellValue::Int(2));
    assert_eq!(table.rows[1][1], CellValue::Int(1));

    // the open-ended interval has no valid_until and sorts first ascending
    table.sort_by("valid_until", SortDirection::Ascending);
    assert_eq!(table.rows[0][3], CellValue::Missing);
}

#[test]
fn test_float_columns_sort_numerically() {
    let catalog: Catalog = serde_json::from_str(CATALOG).unwrap();
    let mut table = catalog.table(EntityKind::CalibrationCoefficient);
    table.sort_by("value", SortDirection::Ascending);
    assert_eq!(table.rows[0][2], CellValue::Text("offset".into()));
    assert_eq!(table.rows[1][2], CellValue::Text("slope".into()));
}
