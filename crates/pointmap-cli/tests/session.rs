//! Integration tests for the session module.

use std::fs;

use pointmap_cli::session::{InputRecord, Session, read_input};
use pointmap_map::MapConfig;
use pointmap_model::{ClassName, ClassRegistry};
use serde_json::json;

const SCHEMA: &str = r#"[
  {
    "name": "Obj",
    "properties": [{ "name": "a" }, { "name": "b" }],
    "methods": [
      { "name": "__construct", "parameters": [{ "name": "a" }] },
      { "name": "getA" },
      { "name": "getB" },
      { "name": "setB", "parameters": [{ "name": "b" }] }
    ]
  }
]"#;

const CONFIG: &str = r#"{
  "routes": [
    { "source": "Obj.getA()", "target": "Obj.__construct().$a" },
    { "source": "Obj.getB()", "target": "Obj.setB().$b" }
  ]
}"#;

fn session() -> Session {
    let registry = ClassRegistry::from_json_str(SCHEMA).unwrap();
    Session::new(registry, &MapConfig::from_json_str(CONFIG).unwrap()).unwrap()
}

fn obj() -> ClassName {
    ClassName::new("Obj").unwrap()
}

#[test]
fn route_rows() {
    let rows = session().route_rows(&obj(), &obj()).unwrap();
    insta::assert_json_snapshot!(rows, @r#"
    [
      {
        "source": "Obj.getA()",
        "source_kind": "method",
        "target": "Obj.__construct().$a",
        "target_kind": "parameter",
        "check_points": []
      },
      {
        "source": "Obj.getB()",
        "source_kind": "method",
        "target": "Obj.setB().$b",
        "target_kind": "parameter",
        "check_points": []
      }
    ]
    "#);
}

#[test]
fn maps_input_records() {
    let input = InputRecord {
        class: obj(),
        properties: json!({"a": 1, "b": 11}),
    };
    let output = session().map_input(&input, &obj()).unwrap();
    assert_eq!(output, json!({"a": 1, "b": 11}));
}

#[test]
fn unknown_source_classes() {
    let rows = session()
        .route_rows(&ClassName::new("Missing").unwrap(), &obj())
        .unwrap();
    assert!(rows.is_empty());

    let input = InputRecord {
        class: ClassName::new("Missing").unwrap(),
        properties: json!({}),
    };
    let err = session().map_input(&input, &obj()).unwrap_err();
    assert!(format!("{err:#}").starts_with("input class Missing"));
}

#[test]
fn loads_files_from_disk() {
    let dir = std::env::temp_dir().join(format!("pointmap-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let schema = dir.join("schema.json");
    let input = dir.join("input.json");
    fs::write(&schema, SCHEMA).unwrap();
    fs::write(&input, r#"{ "class": "Obj", "properties": { "a": 2, "b": 3 } }"#).unwrap();

    let session = Session::load(&schema, None).unwrap();
    let record = read_input(&input).unwrap();
    let output = session.map_input(&record, &obj()).unwrap();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(output, json!({"a": 2, "b": 3}));
}
