//! Integration tests for design files

use cabinetkit::{build_design, BuildConfig, Design, HardwareKind};
use std::io::Write;

const KITCHEN: &str = r#"{
    "kind": "kitchen",
    "name": "Kitchen",
    "lower": {
        "support": { "type": "plinth", "height": 100 },
        "cabinets": [
            { "name": "Sink", "width": 800, "stretchers": { "mode": "sink" }, "doors": { "count": 2 } },
            { "name": "Drawers", "width": 600, "drawer_rows": [
                { "height": 180, "columns": { "count": 2 } },
                { "height": 180, "columns": { "count": 1 } }
            ] }
        ]
    },
    "upper": { "cabinets": [ { "name": "Wall", "width": 1400, "doors": { "count": 3 }, "shelves": [{ "z": 280 }] } ] },
    "countertop": {}
}"#;

#[test]
fn test_kitchen_design_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(KITCHEN.as_bytes()).unwrap();

    let design = Design::load(file.path()).unwrap();
    let summary = build_design(&design, &BuildConfig::default()).unwrap();

    assert_eq!(summary.drawers, 3);
    assert_eq!(summary.doors, 5);
    assert!(summary.panels > 0);
    assert_eq!(summary.report.width, 1400.0);
    assert_eq!(summary.report.hardware_totals.get(&HardwareKind::Slide), Some(&3));

    let names: Vec<&str> = summary
        .report
        .cut_list
        .groups()
        .iter()
        .map(|g| g.item.name.as_str())
        .collect();
    assert!(names.contains(&"Front rail"));
    assert!(names.contains(&"Drawer partition 1-1"));
    assert_eq!(names.last(), Some(&"Worktop"));
}

#[test]
fn test_config_changes_thickness() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "material_thickness = 16.0\n").unwrap();
    let config = BuildConfig::load_from_file(&path).unwrap();

    let design =
        Design::from_json(r#"{ "kind": "cabinet", "name": "Box", "width": 600, "height": 720 }"#).unwrap();
    let summary = build_design(&design, &config).unwrap();

    let side = summary
        .report
        .cut_list
        .groups()
        .iter()
        .find(|g| g.item.name == "Left side")
        .unwrap();
    assert_eq!(side.item.thickness, 16.0);
}

#[test]
fn test_missing_design_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Design::load(&dir.path().join("nothing.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read design"));
}
