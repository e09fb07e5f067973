use super::*;
use std::fs;
use tempfile::TempDir;

const SHAPES: &str = r#"{
    "types": [
        { "name": "IShape", "namespace": "Geometry", "kind": "interface" },
        { "name": "Shape", "namespace": "Geometry", "abstract": true, "interfaces": ["IShape"] },
        { "name": "Circle", "namespace": "Geometry", "base": "Shape", "sealed": true },
        { "name": "Square", "namespace": "Geometry", "base": "Shape" },
        { "name": "Point", "namespace": "Geometry", "kind": "struct", "interfaces": ["IEquatable<Point>"] }
    ],
    "aliases": { "circle": "Geometry.Circle" }
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_parse_universe() {
    let universe = UniverseFile::parse(SHAPES).unwrap();
    assert_eq!(universe.types.len(), 5);
    assert_eq!(universe.types[2].base.as_deref(), Some("Shape"));
    assert_eq!(universe.aliases["circle"], "Geometry.Circle");
}

#[test]
fn test_empty_universe() {
    let universe = UniverseFile::parse("{}").unwrap();
    assert!(universe.types.is_empty());
    assert!(universe.aliases.is_empty());
}

#[test]
fn test_unknown_fields_are_rejected() {
    assert!(UniverseFile::parse(r#"{ "types": [], "imports": [] }"#).is_err());
    assert!(UniverseFile::parse(r#"{ "types": [{ "name": "X", "bases": [] }] }"#).is_err());
}

#[test]
fn test_build_store_from_files() {
    let dir = TempDir::new().unwrap();
    let shapes = write(&dir, "shapes.json", SHAPES);
    let extra = write(
        &dir,
        "extra.json",
        r#"{ "types": [{ "name": "Ring", "namespace": "Geometry", "base": "Square" }] }"#,
    );

    let mut store = build_store(&[shapes, extra]).unwrap();
    let circle = store.parse_type("circle").unwrap();
    let ring = store.parse_type("Ring").unwrap();
    let shape = store.parse_type("Shape").unwrap();
    assert_eq!(store.qualified_name(circle), "Geometry.Circle");
    assert_eq!(store.display(circle), "circle");
    assert_eq!(
        store.get(store.get(ring).unwrap().base_type.unwrap()).unwrap().base_type,
        Some(shape)
    );
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    let err = build_store(&[missing]).unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
}

#[test]
fn test_declaration_errors_carry_context() {
    let dir = TempDir::new().unwrap();
    let broken = write(
        &dir,
        "broken.json",
        r#"{ "types": [{ "name": "Oval", "base": "Ellipse" }] }"#,
    );
    let err = build_store(&[broken]).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("failed to declare `Oval`"), "{message}");
    assert!(message.contains("unknown type `Ellipse`"), "{message}");
}

#[test]
fn test_alias_to_unknown_type() {
    let mut store = TypeStore::with_core_library().unwrap();
    let universe = UniverseFile::parse(r#"{ "aliases": { "money": "Money" } }"#).unwrap();
    let err = universe.apply(&mut store).unwrap_err();
    assert!(format!("{err:#}").contains("money"));
}
