//! Fetching schema documents by reference.
//!
//! A reference is either a path (absolute, or relative to the document that
//! contains it), a `file://` URL, or an `http(s)://` URL. Loaders are
//! composable: [`SchemeLoader`] dispatches on the scheme, [`CachedLoader`]
//! memoizes by (parent, reference).

mod file;
mod http;

pub use file::FileLoader;
pub use http::HttpLoader;

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::JsonSchemaGenError;
use crate::schema::{Location, Schema};
use crate::settings::GenerateSettings;

/// Loads the document a reference names.
pub trait Loader {
    /// `parent` is the location of the document holding the reference;
    /// `None` for entry points.
    ///
    /// # Errors
    ///
    /// Returns an error when the document cannot be located, fetched or parsed.
    fn load(
        &mut self,
        reference: &str,
        parent: Option<&Location>,
    ) -> Result<Rc<Schema>, JsonSchemaGenError>;
}

/// Parses document text as YAML or JSON.
///
/// # Errors
///
/// Returns `JsonError`/`YamlError` for malformed text.
pub fn parse_document(
    text: &str,
    location: Location,
    yaml: bool,
) -> Result<Schema, JsonSchemaGenError> {
    if yaml {
        Schema::from_yaml_str(text, location)
    } else {
        Schema::from_json_str(text, location)
    }
}

/// Whether a path or URL ends in one of `extensions`.
pub(crate) fn has_extension(name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|extension| name.ends_with(extension.as_str()))
}

/// The URL scheme of a reference, lowercased. Single letters are Windows
/// drive prefixes, not schemes.
#[must_use]
pub fn scheme_of(reference: &str) -> Option<String> {
    let (scheme, _) = reference.split_once(':')?;
    let valid = scheme.len() > 1
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then(|| scheme.to_ascii_lowercase())
}

/// Dispatches by scheme. References without one inherit the parent's kind:
/// relative to a URL they are fetched remotely, otherwise read from disk.
pub struct SchemeLoader {
    file: FileLoader,
    http: HttpLoader,
}

impl SchemeLoader {
    #[must_use]
    pub fn new(file: FileLoader, http: HttpLoader) -> Self {
        Self { file, http }
    }

    /// File and HTTP loaders configured from `settings`.
    #[must_use]
    pub fn from_settings(settings: &GenerateSettings) -> Self {
        Self::new(
            FileLoader::new(
                settings.resolve_extensions.clone(),
                settings.yaml_extensions.clone(),
            ),
            HttpLoader::new(settings.remote_timeout(), settings.yaml_extensions.clone()),
        )
    }

    #[must_use]
    pub fn http(&self) -> &HttpLoader {
        &self.http
    }
}

impl Loader for SchemeLoader {
    fn load(
        &mut self,
        reference: &str,
        parent: Option<&Location>,
    ) -> Result<Rc<Schema>, JsonSchemaGenError> {
        match scheme_of(reference).as_deref() {
            Some("file") => self.file.load(reference, parent),
            Some("http" | "https") => self.http.load(reference, parent),
            Some(scheme) => Err(JsonSchemaGenError::UnsupportedScheme {
                scheme: scheme.to_string(),
                reference: reference.to_string(),
            }),
            None => match parent {
                Some(Location::Url(_)) => self.http.load(reference, parent),
                _ => self.file.load(reference, parent),
            },
        }
    }
}

/// Memoizes another loader by (parent location, reference string).
pub struct CachedLoader<L> {
    inner: L,
    cache: HashMap<(Option<Location>, String), Rc<Schema>>,
}

impl<L: Loader> CachedLoader<L> {
    #[must_use]
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
        }
    }

    #[must_use]
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Loader> Loader for CachedLoader<L> {
    fn load(
        &mut self,
        reference: &str,
        parent: Option<&Location>,
    ) -> Result<Rc<Schema>, JsonSchemaGenError> {
        let key = (parent.cloned(), reference.to_string());
        if let Some(schema) = self.cache.get(&key) {
            return Ok(Rc::clone(schema));
        }
        let schema = self.inner.load(reference, parent)?;
        self.cache.insert(key, Rc::clone(&schema));
        Ok(schema)
    }
}
