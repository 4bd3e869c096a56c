//! In-memory model of one schema document.
//!
//! Only the keywords the generator honours are modeled; unknown keys are
//! ignored. Every document, JSON or YAML, is decoded through the same
//! `serde_json::Value` path.

use serde::Deserialize;
use serde::de::Error as _;
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::error::JsonSchemaGenError;

/// Wraps the JSON Schema `default` keyword to preserve `null`.
/// Serde deserializes `Option<Value>` with JSON null as `None`; we need to
/// distinguish absent key from `"default": null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DefaultKeyword {
    /// Key "default" was absent from the schema.
    #[default]
    Absent,
    /// Key "default" was present; the value may be `Value::Null`.
    Present(Value),
}

impl<'de> Deserialize<'de> for DefaultKeyword {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v: Value = Deserialize::deserialize(deserializer)?;
        Ok(DefaultKeyword::Present(v))
    }
}

impl DefaultKeyword {
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Absent => None,
            Self::Present(value) => Some(value),
        }
    }
}

/// `exclusiveMinimum` / `exclusiveMaximum`: a boolean flag in draft 4, a
/// number from draft 6 on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExclusiveBound {
    Flag(bool),
    Value(Number),
}

/// The `x-rust` override extension.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RustExtension {
    /// Rust type used verbatim instead of inferring one.
    #[serde(rename = "type")]
    pub type_path: Option<String>,

    /// Declared name for the generated type.
    pub identifier: Option<String>,

    /// `use` paths the owning module needs.
    pub imports: Vec<String>,

    /// Force the field into `Option<T>`.
    pub optional: bool,
}

fn type_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(name) => vec![name],
        OneOrMany::Many(names) => names,
    })
}

/// A schema node. `true` decodes to the empty (always matching) node and
/// `false` to a node whose `not` is empty (never matching).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(remote = "Self", default)]
pub struct Type {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,

    #[serde(rename = "type", deserialize_with = "type_names")]
    pub type_names: Vec<String>,

    pub title: Option<String>,

    pub description: Option<String>,

    pub default: DefaultKeyword,

    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,

    pub format: Option<String>,

    #[serde(rename = "multipleOf")]
    pub multiple_of: Option<Number>,

    pub minimum: Option<Number>,

    pub maximum: Option<Number>,

    #[serde(rename = "exclusiveMinimum")]
    pub exclusive_minimum: Option<ExclusiveBound>,

    #[serde(rename = "exclusiveMaximum")]
    pub exclusive_maximum: Option<ExclusiveBound>,

    #[serde(rename = "minLength")]
    pub min_length: Option<u64>,

    #[serde(rename = "maxLength")]
    pub max_length: Option<u64>,

    pub pattern: Option<String>,

    pub items: Option<Box<Type>>,

    #[serde(rename = "minItems")]
    pub min_items: Option<u64>,

    #[serde(rename = "maxItems")]
    pub max_items: Option<u64>,

    /// `BTreeMap` keeps property order lexicographic, so output is reproducible.
    pub properties: BTreeMap<String, Type>,

    pub required: Vec<String>,

    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<Box<Type>>,

    #[serde(rename = "allOf")]
    pub all_of: Vec<Type>,

    #[serde(rename = "anyOf")]
    pub any_of: Vec<Type>,

    #[serde(rename = "oneOf")]
    pub one_of: Vec<Type>,

    pub not: Option<Box<Type>>,

    #[serde(rename = "x-rust")]
    pub rust: Option<RustExtension>,
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Bool(true) => Ok(Self::default()),
            Value::Bool(false) => Ok(Self::never()),
            value @ Value::Object(_) => Type::deserialize(value).map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "schema must be an object or a boolean, found {other}"
            ))),
        }
    }
}

/// A JSON Schema primitive type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
}

impl TypeName {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "object" => Self::Object,
            "array" => Self::Array,
            "string" => Self::String,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "null" => Self::Null,
            _ => return None,
        })
    }
}

/// How a node is synthesized, in dispatch order. Classification is purely
/// syntactic; references are not followed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    /// `x-rust.type` names the Rust type outright.
    Custom(&'a str),
    Enum(&'a [Value]),
    Reference(&'a str),
    Untyped,
    /// `[T, "null"]` in either order; carries `T`.
    Nullable(&'a str),
    /// Several type names that are not a null union.
    Union(&'a [String]),
    Single(&'a str),
}

impl Type {
    /// The `false` schema.
    #[must_use]
    pub fn never() -> Self {
        Self {
            not: Some(Box::default()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_never(&self) -> bool {
        *self == Self::never()
    }

    /// Whether the node describes an object even without `"type": "object"`.
    #[must_use]
    pub fn has_object_content(&self) -> bool {
        !self.properties.is_empty()
            || !self.all_of.is_empty()
            || !self.any_of.is_empty()
            || !self.one_of.is_empty()
    }

    #[must_use]
    pub fn shape(&self) -> Shape<'_> {
        if let Some(type_path) = self.rust.as_ref().and_then(|r| r.type_path.as_deref()) {
            return Shape::Custom(type_path);
        }
        if let Some(values) = &self.enum_values {
            return Shape::Enum(values);
        }
        if let Some(reference) = self.reference.as_deref().filter(|r| !r.is_empty()) {
            return Shape::Reference(reference);
        }
        match self.type_names.as_slice() {
            [] if self.has_object_content() => Shape::Single("object"),
            [] => Shape::Untyped,
            [single] => Shape::Single(single),
            [first, second] if second == "null" && first != "null" => Shape::Nullable(first),
            [first, second] if first == "null" && second != "null" => Shape::Nullable(second),
            names => Shape::Union(names),
        }
    }

    /// Equality used for declaration reuse. `$ref` and union member lists are
    /// resolved or merged before declarations are built, so they are ignored.
    #[must_use]
    pub fn structurally_equal(&self, other: &Self) -> bool {
        fn stripped(node: &Type) -> Type {
            Type {
                reference: None,
                any_of: Vec::new(),
                one_of: Vec::new(),
                ..node.clone()
            }
        }
        stripped(self) == stripped(other)
    }

    /// Trimmed description, falling back to the title.
    #[must_use]
    pub fn doc(&self) -> Option<String> {
        [self.description.as_deref(), self.title.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(str::to_string)
    }
}

/// Where a document was loaded from; the parent context for relative references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    File(PathBuf),
    Url(String),
    Memory(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) | Self::Memory(url) => f.write_str(url),
        }
    }
}

/// Root of one schema document.
#[derive(Debug, Clone)]
pub struct Schema {
    pub id: Option<String>,
    pub legacy_id: Option<String>,
    pub definitions: Option<BTreeMap<String, Type>>,
    pub legacy_definitions: Option<BTreeMap<String, Type>>,
    pub root: Type,
    pub location: Location,
}

impl Schema {
    /// Builds a schema from a decoded JSON document.
    ///
    /// # Errors
    ///
    /// Returns `JsonError` when a keyword has the wrong shape.
    pub fn from_value(value: Value, location: Location) -> Result<Self, JsonSchemaGenError> {
        let mut id = None;
        let mut legacy_id = None;
        let mut definitions = None;
        let mut legacy_definitions = None;
        let root_value = match value {
            Value::Object(mut object) => {
                id = take_string(&mut object, "$id");
                legacy_id = take_string(&mut object, "id");
                if let Some(defs) = object.remove("$defs") {
                    definitions = Some(serde_json::from_value(defs)?);
                }
                if let Some(defs) = object.remove("definitions") {
                    legacy_definitions = Some(serde_json::from_value(defs)?);
                }
                Value::Object(object)
            }
            other => other,
        };
        let root: Type = serde_json::from_value(root_value)?;
        Ok(Self {
            id,
            legacy_id,
            definitions,
            legacy_definitions,
            root,
            location,
        })
    }

    /// # Errors
    ///
    /// Returns `JsonError` if the text is not valid JSON or not a schema.
    pub fn from_json_str(text: &str, location: Location) -> Result<Self, JsonSchemaGenError> {
        Self::from_value(serde_json::from_str(text)?, location)
    }

    /// Decodes YAML into a generic document, stringifies keys, and hands the
    /// canonical JSON form to [`Schema::from_value`].
    ///
    /// # Errors
    ///
    /// Returns `YamlError` for invalid YAML and `InvalidSchema` for keys or
    /// numbers that have no JSON form.
    pub fn from_yaml_str(text: &str, location: Location) -> Result<Self, JsonSchemaGenError> {
        let document: serde_yaml::Value = serde_yaml::from_str(text)?;
        Self::from_value(yaml_to_json(document)?, location)
    }

    /// `$id`, else legacy `id`, else an identity derived from the location.
    #[must_use]
    pub fn identity(&self) -> String {
        if let Some(id) = self.id.as_ref().or(self.legacy_id.as_ref()) {
            return id.clone();
        }
        match &self.location {
            Location::File(path) => format!("file://{}", path.display()),
            Location::Url(url) => url.clone(),
            Location::Memory(name) => format!("memory:{name}"),
        }
    }

    /// `$defs`, else legacy `definitions`.
    #[must_use]
    pub fn definitions(&self) -> Option<&BTreeMap<String, Type>> {
        self.definitions
            .as_ref()
            .or(self.legacy_definitions.as_ref())
    }

    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&Type> {
        self.definitions().and_then(|defs| defs.get(name))
    }
}

fn take_string(object: &mut serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match object.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            object.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, JsonSchemaGenError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| {
                        JsonSchemaGenError::InvalidSchema(format!("number {n} has no JSON form"))
                    })?
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = serde_json::Map::new();
            for (key, value) in mapping {
                object.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, JsonSchemaGenError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(JsonSchemaGenError::InvalidSchema(
            "mapping keys must be scalars".to_string(),
        )),
    }
}
