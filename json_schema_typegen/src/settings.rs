//! Settings for JSON Schema code generation.

use serde::Deserialize;
use std::time::Duration;

use crate::error::JsonSchemaGenError;

/// A serialization format whose decode/encode methods are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
}

/// Destination overrides for one schema identity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SchemaMapping {
    /// Schema identity (`$id`, or the `file://` URL of an id-less file).
    pub schema_id: String,

    /// Rust module path the declarations live in, e.g. `crate::schemas::config`.
    pub module_path: Option<String>,

    /// File the module is written to. Defaults to `<last module segment>.rs`.
    pub output_name: Option<String>,

    /// Name of the declaration generated for the root node.
    pub root_type: Option<String>,
}

/// Settings that control code generation behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GenerateSettings {
    /// Per-identity overrides, consulted before the defaults.
    pub schema_mappings: Vec<SchemaMapping>,

    /// Module used for schemas no mapping matches. When `None`, an unmapped
    /// schema is a configuration error.
    pub default_module: Option<String>,

    /// Output file for the default module.
    pub default_output: Option<String>,

    /// Formats to generate decode/encode methods for. Empty means models only:
    /// plain derived declarations without validation.
    pub formats: Vec<Format>,

    /// Extensions probed, in order, when a file reference has none.
    pub resolve_extensions: Vec<String>,

    /// Extensions decoded as YAML rather than JSON.
    pub yaml_extensions: Vec<String>,

    /// Prefer the shortest free suffix of the naming scope over the full scope.
    pub minimal_names: bool,

    /// Name declarations after their `title` when one is present.
    pub struct_name_from_title: bool,

    /// Deadline for each remote schema fetch.
    pub remote_timeout_secs: Option<u64>,

    /// Pipe every generated source through `rustfmt`.
    pub rustfmt: bool,

    /// Column at which generated doc comments wrap.
    pub comment_width: usize,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            schema_mappings: Vec::new(),
            default_module: Some("crate::schema".to_string()),
            default_output: None,
            formats: vec![Format::Json],
            resolve_extensions: vec![".json".to_string(), ".yaml".to_string(), ".yml".to_string()],
            yaml_extensions: vec![".yaml".to_string(), ".yml".to_string()],
            minimal_names: false,
            struct_name_from_title: false,
            remote_timeout_secs: Some(30),
            rustfmt: false,
            comment_width: 100,
        }
    }
}

impl GenerateSettings {
    /// Models only: no formatter is selected.
    #[must_use]
    pub fn models_only() -> Self {
        Self {
            formats: Vec::new(),
            ..Self::default()
        }
    }

    /// Reads settings from a YAML or JSON document. YAML is a superset of
    /// JSON, so one decoder handles both.
    ///
    /// # Errors
    ///
    /// Returns `JsonSchemaGenError::YamlError` if the document does not match the
    /// settings shape, or `InvalidSetting` if a value is out of range.
    pub fn from_config_str(config: &str) -> Result<Self, JsonSchemaGenError> {
        let settings: Self = serde_yaml::from_str(config)?;
        settings.check()?;
        Ok(settings)
    }

    /// Sanity checks that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSetting` describing the first offending value.
    pub fn check(&self) -> Result<(), JsonSchemaGenError> {
        if self.comment_width < 20 {
            return Err(JsonSchemaGenError::InvalidSetting(format!(
                "comment-width must be at least 20, got {}",
                self.comment_width
            )));
        }
        for extension in self.resolve_extensions.iter().chain(&self.yaml_extensions) {
            if !extension.starts_with('.') {
                return Err(JsonSchemaGenError::InvalidSetting(format!(
                    "extension {extension:?} must start with '.'"
                )));
            }
        }
        for mapping in &self.schema_mappings {
            if mapping.schema_id.is_empty() {
                return Err(JsonSchemaGenError::InvalidSetting(
                    "schema mapping without a schema-id".to_string(),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn remote_timeout(&self) -> Option<Duration> {
        self.remote_timeout_secs.map(Duration::from_secs)
    }

    /// The mapping for `schema_id`, if any.
    #[must_use]
    pub fn mapping_for(&self, schema_id: &str) -> Option<&SchemaMapping> {
        self.schema_mappings
            .iter()
            .find(|mapping| mapping.schema_id == schema_id)
    }
}
