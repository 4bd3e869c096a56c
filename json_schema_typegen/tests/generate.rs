use std::path::Path;

use json_schema_typegen::{
    GenerateSettings, Generator, JsonSchemaGenError, SchemaMapping, WarningKind,
};
use pretty_assertions::assert_eq;

fn write(dir: &Path, name: &str, text: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, text).expect("write schema");
}

fn file_id(path: &Path) -> String {
    let canonical = std::fs::canonicalize(path).expect("canonical path");
    format!("file://{}", canonical.display())
}

fn generate(settings: GenerateSettings, text: &str) -> (String, Vec<WarningKind>) {
    let mut generator = Generator::new(settings).expect("valid settings");
    let file = generator.add_schema("root", text, false).expect("generates");
    let kinds = generator.take_warnings().into_iter().map(|w| w.kind).collect();
    let mut sources = generator.sources().expect("renders");
    (sources.remove(&file).expect("root output"), kinds)
}

#[test]
fn person_fixture_matches_checked_in_module() {
    let mut generator = Generator::new(GenerateSettings::default()).expect("valid settings");
    let file = generator
        .do_file(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/person.json"))
        .expect("generates");
    assert_eq!(file, "schema.rs");
    assert!(generator.take_warnings().is_empty());

    let sources = generator.sources().expect("renders");
    assert_eq!(sources[&file], include_str!("generated/person.rs"));
}

#[test]
fn pets_fixture_matches_checked_in_module() {
    let mut generator = Generator::new(GenerateSettings::default()).expect("valid settings");
    let file = generator
        .do_file(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/pets.json"))
        .expect("generates");
    let kinds: Vec<WarningKind> = generator.take_warnings().into_iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![
            WarningKind::IgnoredComposition,
            WarningKind::IgnoredComposition,
            WarningKind::UntypedComposition,
            WarningKind::WrappedEnum,
            WarningKind::ReferenceCycle,
        ]
    );

    let sources = generator.sources().expect("renders");
    assert_eq!(sources[&file], include_str!("generated/pets.rs"));
}

#[test]
fn server_fixture_matches_checked_in_yaml_module() {
    let settings = GenerateSettings {
        formats: vec![json_schema_typegen::Format::Yaml],
        ..GenerateSettings::default()
    };
    let mut generator = Generator::new(settings).expect("valid settings");
    let file = generator
        .do_file(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/server.json"))
        .expect("generates");
    assert!(generator.take_warnings().is_empty());

    let sources = generator.sources().expect("renders");
    assert_eq!(sources[&file], include_str!("generated/server.rs"));
}

#[test]
fn cross_file_references_import_the_target_module() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "defs/common.json",
        r#"{
            "definitions": {
                "Address": {
                    "type": "object",
                    "properties": { "street": { "type": "string" } },
                    "required": ["street"]
                }
            }
        }"#,
    );
    write(
        dir.path(),
        "order.json",
        r##"{
            "type": "object",
            "properties": {
                "shipTo": { "$ref": "defs/common.json#/definitions/Address" },
                "billTo": { "$ref": "./defs/common#/definitions/Address" }
            }
        }"##,
    );

    let settings = GenerateSettings {
        schema_mappings: vec![SchemaMapping {
            schema_id: file_id(&dir.path().join("defs/common.json")),
            module_path: Some("crate::schemas::common".to_string()),
            ..SchemaMapping::default()
        }],
        ..GenerateSettings::default()
    };
    let mut generator = Generator::new(settings).expect("valid settings");
    let file = generator.do_file(dir.path().join("order.json")).expect("generates");
    assert_eq!(file, "schema.rs");

    let sources = generator.sources().expect("renders");
    assert_eq!(
        sources.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["common.rs", "schema.rs"]
    );
    let order = &sources["schema.rs"];
    assert!(order.contains("use crate::schemas::common;\n"), "{order}");
    assert!(order.contains("pub bill_to: Option<common::Address>,"), "{order}");
    assert!(order.contains("pub ship_to: Option<common::Address>,"), "{order}");

    let common = &sources["common.rs"];
    assert!(common.contains("pub struct Address {"), "{common}");
    assert!(!common.contains("\nuse "), "{common}");
}

#[cfg(unix)]
#[test]
fn symlinked_documents_are_loaded_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "shapes.json",
        r#"{ "definitions": { "Point": { "type": "object", "properties": { "x": { "type": "number" } } } } }"#,
    );
    std::os::unix::fs::symlink(dir.path().join("shapes.json"), dir.path().join("alias.json"))
        .expect("symlink");
    write(
        dir.path(),
        "root.json",
        r##"{
            "type": "object",
            "properties": {
                "first": { "$ref": "shapes.json#/definitions/Point" },
                "second": { "$ref": "alias.json#/definitions/Point" }
            }
        }"##,
    );

    let mut generator = Generator::new(GenerateSettings::default()).expect("valid settings");
    generator.do_file(dir.path().join("root.json")).expect("generates");
    let sources = generator.sources().expect("renders");
    let source = &sources["schema.rs"];
    assert_eq!(source.matches("pub struct Point {").count(), 1, "{source}");
    assert!(!source.contains("Point_1"), "{source}");
    assert!(source.contains("pub first: Option<Point>,"));
    assert!(source.contains("pub second: Option<Point>,"));
    assert!(generator.take_warnings().is_empty());
}

#[test]
fn reference_cycles_are_broken_with_box() {
    let (source, warnings) = generate(
        GenerateSettings::default(),
        r##"{
            "definitions": {
                "A": { "type": "object", "properties": { "b": { "$ref": "#/definitions/B" } } },
                "B": { "type": "object", "properties": { "a": { "$ref": "#/definitions/A" } } }
            }
        }"##,
    );
    assert!(source.contains("pub struct A {\n    #[serde(skip_serializing_if = \"Option::is_none\")]\n    pub b: Option<B>,"), "{source}");
    assert!(source.contains("pub a: Option<Box<A>>,"), "{source}");
    assert_eq!(warnings, vec![WarningKind::ReferenceCycle]);
}

#[test]
fn self_reference_is_boxed() {
    let (source, warnings) = generate(
        GenerateSettings::default(),
        r##"{
            "type": "object",
            "properties": {
                "value": { "type": "integer" },
                "next": { "$ref": "#" }
            }
        }"##,
    );
    assert!(source.contains("pub next: Option<Box<Root>>,"), "{source}");
    assert_eq!(warnings, vec![WarningKind::ReferenceCycle]);
}

#[test]
fn equal_shapes_share_a_name_and_different_ones_move_on() {
    let address = r#"{ "type": "object", "properties": { "street": { "type": "string" } } }"#;
    let other = r#"{ "type": "object", "properties": { "zip": { "type": "string" } } }"#;
    let schema = format!(
        r#"{{
            "type": "object",
            "properties": {{
                "home": {{ "type": "object", "properties": {{ "address": {address} }} }},
                "office": {{ "type": "object", "properties": {{ "address": {other} }} }},
                "work": {{ "type": "object", "properties": {{ "address": {address} }} }}
            }}
        }}"#
    );
    let settings = GenerateSettings {
        minimal_names: true,
        ..GenerateSettings::default()
    };
    let (source, warnings) = generate(settings, &schema);

    assert_eq!(source.matches("pub struct Address {").count(), 1, "{source}");
    assert!(source.contains("pub struct OfficeAddress {"), "{source}");
    assert!(!source.contains("pub struct WorkAddress"), "{source}");
    assert!(source.contains("pub struct Work {\n    #[serde(skip_serializing_if = \"Option::is_none\")]\n    pub address: Option<Address>,"), "{source}");
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn colliding_names_get_numeric_suffixes() {
    let (source, warnings) = generate(
        GenerateSettings::default(),
        r#"{
            "type": "object",
            "properties": {
                "a-b": { "type": "object", "properties": { "x": { "type": "string" } } },
                "a_b": { "type": "object", "properties": { "y": { "type": "string" } } }
            }
        }"#,
    );
    assert!(source.contains("pub struct RootAB {"), "{source}");
    assert!(source.contains("pub struct RootAB_1 {"), "{source}");
    assert!(source.contains("pub a_b: Option<RootAB>,"), "{source}");
    assert!(source.contains("#[serde(rename = \"a_b\", skip_serializing_if = \"Option::is_none\")]\n    pub a_b_1: Option<RootAB_1>,"), "{source}");
    assert_eq!(
        warnings,
        vec![WarningKind::NameCollision, WarningKind::FieldNameCollision]
    );
}

#[test]
fn required_property_is_plain_and_optional_property_is_wrapped() {
    let (source, warnings) = generate(
        GenerateSettings::default(),
        r#"{"type":"object","required":["name"],"properties":{"name":{"type":"string"},"age":{"type":"integer"}}}"#,
    );
    assert!(source.contains("pub struct Root {\n"), "{source}");
    assert!(source.contains("    pub name: String,\n"), "{source}");
    assert!(source.contains("    pub age: Option<i64>,\n"), "{source}");
    assert!(source.contains("if raw.get(\"name\").is_none_or(serde_json::Value::is_null) {"));
    assert!(!source.contains("raw.get(\"age\")"), "{source}");
    assert!(warnings.is_empty());
}

#[test]
fn required_nullable_and_defaulted_fields() {
    let (source, warnings) = generate(
        GenerateSettings::default(),
        r#"{
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "note": { "type": ["string", "null"] },
                "level": { "type": "integer", "default": 3 },
                "gone": { "type": "null" },
                "any": { "type": ["string", "integer"] }
            },
            "required": ["id", "note", "level"]
        }"#,
    );
    assert!(source.contains("    pub id: i64,\n"), "{source}");
    assert!(source.contains("    pub note: Option<String>,\n"), "{source}");
    assert!(source.contains("    pub level: i64,\n"), "{source}");
    assert!(source.contains("    pub gone: Option<serde_json::Value>,\n"), "{source}");
    assert!(source.contains("    pub any: Option<serde_json::Value>,\n"), "{source}");

    assert!(source.contains("if raw.get(\"id\").is_none_or(serde_json::Value::is_null) {"));
    assert!(source.contains("if !raw.contains_key(\"note\") {"));
    assert!(!source.contains("raw.get(\"level\")"), "defaults replace presence checks");
    assert!(source.contains("if plain.level.is_none() {\n            plain.level = Some(3);"));
    assert!(source.contains("if plain.gone.is_some() {"));
    assert_eq!(warnings, vec![WarningKind::MultiTypeUnion]);
}

#[test]
fn default_outside_the_integer_width_is_dropped() {
    let (source, warnings) = generate(
        GenerateSettings::default(),
        r#"{"type":"object","properties":{"size":{"type":"integer","minimum":0,"maximum":255,"default":300}}}"#,
    );
    assert!(source.contains("    pub size: Option<u8>,\n"), "{source}");
    assert!(!source.contains("300"), "{source}");
    assert_eq!(warnings, vec![WarningKind::UnsupportedDefault]);
}

#[test]
fn any_of_members_become_optional_branches() {
    let (source, warnings) = generate(
        GenerateSettings::default(),
        r##"{
            "definitions": {
                "Pet": {
                    "anyOf": [
                        { "$ref": "#/definitions/Cat" },
                        { "$ref": "#/definitions/Dog" },
                        { "type": "object" }
                    ]
                },
                "Cat": { "type": "object", "properties": { "meow": { "type": "boolean" } }, "required": ["meow"] },
                "Dog": { "type": "object", "properties": { "bark": { "type": "boolean" } }, "required": ["bark"] }
            }
        }"##,
    );
    assert!(source.contains("    #[serde(flatten)]\n    pub any_of_0: Option<Cat>,"), "{source}");
    assert!(source.contains("    #[serde(flatten)]\n    pub any_of_1: Option<Dog>,"), "{source}");
    assert!(source.contains("let mut any_of_errors: Vec<String> = Vec::new();"));
    assert!(source.contains("if any_of_0.is_none() && any_of_1.is_none() {"));
    assert_eq!(warnings, vec![WarningKind::IgnoredComposition]);
}

#[test]
fn untyped_union_of_primitives_becomes_json_value() {
    let (source, warnings) = generate(
        GenerateSettings::default(),
        r##"{
            "type": "object",
            "properties": {
                "x": { "anyOf": [{ "type": "string" }, { "type": "null" }] },
                "pet": { "oneOf": [{ "$ref": "#/definitions/Cat" }, { "type": "integer" }] }
            },
            "definitions": {
                "Cat": { "type": "object", "properties": { "meow": { "type": "boolean" } } }
            }
        }"##,
    );
    assert!(source.contains("pub type RootX = serde_json::Value;"), "{source}");
    assert!(source.contains("pub type RootPet = serde_json::Value;"), "{source}");
    assert!(source.contains("    pub x: Option<RootX>,\n"), "{source}");
    assert!(!source.contains("pub struct RootX"), "{source}");
    assert_eq!(
        warnings,
        vec![
            WarningKind::IgnoredComposition,
            WarningKind::UntypedComposition,
            WarningKind::IgnoredComposition,
            WarningKind::IgnoredComposition,
            WarningKind::UntypedComposition,
        ]
    );
}

#[test]
fn typed_root_is_generated_next_to_definitions() {
    let (source, _) = generate(
        GenerateSettings::default(),
        r##"{
            "allOf": [{ "$ref": "#/definitions/Base" }],
            "properties": {},
            "definitions": {
                "Base": { "type": "object", "properties": { "id": { "type": "integer" } } }
            }
        }"##,
    );
    assert!(source.contains("pub struct Root {"), "{source}");
    assert!(source.contains("    #[serde(flatten)]\n    pub all_of_0: Base,\n"), "{source}");
    assert!(source.contains("pub struct Base {"), "{source}");

    let (source, _) = generate(
        GenerateSettings::default(),
        r#"{ "enum": ["a", "b"], "definitions": { "Other": { "type": "string" } } }"#,
    );
    assert!(source.contains("pub enum Root {\n    A,\n    B,\n}"), "{source}");
    assert!(!source.contains("pub type Other"), "{source}");
}

#[test]
fn models_only_output_derives_serde() {
    let (source, _) = generate(
        GenerateSettings::models_only(),
        r#"{
            "type": "object",
            "properties": { "size": { "type": "string", "enum": ["s", "m"], "default": "m" } },
            "additionalProperties": false
        }"#,
    );
    assert!(source.contains("#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]\n#[serde(deny_unknown_fields)]\npub struct Root {"), "{source}");
    assert!(source.contains("#[serde(default = \"default_root_size\")]\n    pub size: RootSize,"), "{source}");
    assert!(source.contains("fn default_root_size() -> RootSize {\n    RootSize::M\n}"), "{source}");
    assert!(!source.contains("impl<'de> serde::Deserialize<'de>"));
}

#[test]
fn yaml_only_output_bridges_serde_through_yaml_values() {
    let settings = GenerateSettings {
        formats: vec![json_schema_typegen::Format::Yaml],
        ..GenerateSettings::default()
    };
    let (source, _) = generate(
        settings,
        r#"{ "type": "object", "properties": { "n": { "type": "integer" } } }"#,
    );
    assert!(source.contains("pub fn from_yaml_str(input: &str) -> Result<Self, serde_yaml::Error> {"));
    assert!(source.contains("pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {"));
    assert!(source.contains("Self::from_yaml_value(value).map_err(<D::Error as serde::de::Error>::custom)"));
}

#[test]
fn yaml_entry_documents_are_supported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "config.yaml",
        "type: object\nproperties:\n  port:\n    type: integer\n    minimum: 1\n    maximum: 65535\nrequired: [port]\n",
    );
    let mut generator = Generator::new(GenerateSettings::default()).expect("valid settings");
    generator.do_file(dir.path().join("config.yaml")).expect("generates");
    let sources = generator.sources().expect("renders");
    assert!(sources["schema.rs"].contains("pub struct Config {\n    pub port: u16,\n}"));
}

#[test]
fn failed_file_keeps_earlier_outputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "good.json", r#"{ "type": "object", "properties": { "a": { "type": "string" } } }"#);
    write(
        dir.path(),
        "bad.json",
        r##"{ "type": "object", "properties": { "b": { "$ref": "missing.json#/definitions/X" } } }"##,
    );

    let mut generator = Generator::new(GenerateSettings::default()).expect("valid settings");
    generator.do_file(dir.path().join("good.json")).expect("generates");
    let err = generator.do_file(dir.path().join("bad.json")).unwrap_err();
    assert!(matches!(err, JsonSchemaGenError::InFile { .. }));
    assert!(matches!(
        err.root_cause(),
        JsonSchemaGenError::CannotResolve { reference } if reference == "missing.json"
    ));

    let chain: Vec<String> = std::iter::successors(
        Some(&err as &dyn std::error::Error),
        |e| e.source(),
    )
    .map(ToString::to_string)
    .collect();
    assert_eq!(chain.len(), 3, "{chain:?}");
    assert!(chain[1].starts_with("resolving \"missing.json#/definitions/X\" from "));

    let sources = generator.sources().expect("renders");
    assert!(sources["schema.rs"].contains("pub struct Good {"));
    assert!(!sources["schema.rs"].contains("pub struct Bad"));
}

#[test]
fn unmapped_schema_without_default_module_is_an_error() {
    let settings = GenerateSettings {
        default_module: None,
        ..GenerateSettings::default()
    };
    let mut generator = Generator::new(settings).expect("valid settings");
    let err = generator
        .add_schema("root", r#"{ "type": "string" }"#, false)
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        JsonSchemaGenError::NoModuleMapping { schema_id } if schema_id == "memory:root"
    ));
}

#[test]
fn generate_to_writer_writes_the_root_module() {
    let mut buf: Vec<u8> = Vec::new();
    json_schema_typegen::generate_to_writer(
        r#"{ "type": "object", "properties": { "id": { "type": "integer" } }, "required": ["id"] }"#,
        &mut buf,
        &GenerateSettings::default(),
    )
    .expect("generates");
    let text = String::from_utf8(buf).expect("utf-8");
    assert!(text.starts_with(json_schema_typegen::HEADER));
    assert!(text.contains("pub struct Root {\n    pub id: i64,\n}"));
}
