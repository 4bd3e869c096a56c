/// Error type for JSON Schema code generation operations.
///
/// Resolution, shape and configuration errors abort the file being generated.
/// Degradations never surface here; they are recorded as
/// [`Warning`](crate::Warning)s instead.
#[derive(Debug, thiserror::Error)]
pub enum JsonSchemaGenError {
    /// I/O error (e.g., reading a schema file, writing an output file).
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error(transparent)]
    YamlError(#[from] serde_yaml::Error),

    #[error("unsupported URL scheme {scheme:?} in reference {reference:?}")]
    UnsupportedScheme { scheme: String, reference: String },

    #[error("cannot resolve schema {reference:?}")]
    CannotResolve { reference: String },

    #[error("unsupported content type {content_type:?} for {url}")]
    UnsupportedContentType { url: String, content_type: String },

    #[error("fetching {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("fetch of {url} was cancelled")]
    Cancelled { url: String },

    #[error("schema document is malformed: {0}")]
    InvalidSchema(String),

    #[error("array property must have items ({location})")]
    ArrayWithoutItems { location: String },

    #[error("enum values must be primitive, found {value} ({location})")]
    EnumNonPrimitive { location: String, value: String },

    #[error("additionalProperties must declare at most one type, found {types:?} ({location})")]
    AdditionalPropertiesMultipleTypes { location: String, types: Vec<String> },

    #[error("definition {name:?} not found in schema {schema}")]
    DefinitionNotFound { name: String, schema: String },

    #[error("unsupported $ref {reference:?}: only definition references are supported")]
    UnsupportedReference { reference: String },

    #[error("unknown type name {name:?} ({location})")]
    UnknownTypeName { location: String, name: String },

    #[error("invalid pattern {pattern:?} ({location}): {message}")]
    InvalidPattern {
        location: String,
        pattern: String,
        message: String,
    },

    #[error("unable to map schema {schema_id:?} to a module; set a default module or a mapping")]
    NoModuleMapping { schema_id: String },

    #[error("output {output:?} is claimed by modules {first:?} and {second:?}")]
    ConflictingOutput {
        output: String,
        first: String,
        second: String,
    },

    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error("post-processing {output:?} failed: {message}")]
    PostProcess { output: String, message: String },

    #[error("resolving {reference:?} from {parent}")]
    InReference {
        reference: String,
        parent: String,
        #[source]
        source: Box<JsonSchemaGenError>,
    },

    #[error("processing {file}")]
    InFile {
        file: String,
        #[source]
        source: Box<JsonSchemaGenError>,
    },
}

impl JsonSchemaGenError {
    /// Wraps `self` with the reference that was being resolved.
    #[must_use]
    pub fn in_reference(self, reference: &str, parent: &str) -> Self {
        Self::InReference {
            reference: reference.to_string(),
            parent: parent.to_string(),
            source: Box::new(self),
        }
    }

    /// Wraps `self` with the input file that was being processed.
    #[must_use]
    pub fn in_file(self, file: &str) -> Self {
        Self::InFile {
            file: file.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error of a context chain.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::InReference { source, .. } | Self::InFile { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
