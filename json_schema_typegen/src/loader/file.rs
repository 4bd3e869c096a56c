use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{Loader, has_extension, parse_document};
use crate::error::JsonSchemaGenError;
use crate::schema::{Location, Schema};

/// Reads documents from disk. Paths are canonicalized before caching, so a
/// file reached through different relative paths or symlinks is one document.
#[derive(Debug, Default)]
pub struct FileLoader {
    resolve_extensions: Vec<String>,
    yaml_extensions: Vec<String>,
    cache: HashMap<PathBuf, Rc<Schema>>,
}

impl FileLoader {
    #[must_use]
    pub fn new(resolve_extensions: Vec<String>, yaml_extensions: Vec<String>) -> Self {
        Self {
            resolve_extensions,
            yaml_extensions,
            cache: HashMap::new(),
        }
    }

    /// The path itself if it is a file, else the first extension-probed
    /// sibling that is.
    fn probe(&self, candidate: &Path) -> Option<PathBuf> {
        if candidate.is_file() {
            return Some(candidate.to_path_buf());
        }
        if candidate.extension().is_some() {
            return None;
        }
        self.resolve_extensions.iter().find_map(|extension| {
            let mut name: OsString = candidate.as_os_str().to_owned();
            name.push(extension);
            let path = PathBuf::from(name);
            path.is_file().then_some(path)
        })
    }
}

impl Loader for FileLoader {
    fn load(
        &mut self,
        reference: &str,
        parent: Option<&Location>,
    ) -> Result<Rc<Schema>, JsonSchemaGenError> {
        let stripped = reference.strip_prefix("file://").unwrap_or(reference);
        let relative = Path::new(stripped);
        let candidate = match parent {
            Some(Location::File(parent)) if relative.is_relative() => parent
                .parent()
                .map_or_else(|| relative.to_path_buf(), |dir| dir.join(relative)),
            _ => relative.to_path_buf(),
        };

        let resolved =
            self.probe(&candidate)
                .ok_or_else(|| JsonSchemaGenError::CannotResolve {
                    reference: reference.to_string(),
                })?;
        let canonical = std::fs::canonicalize(&resolved)?;
        if let Some(schema) = self.cache.get(&canonical) {
            return Ok(Rc::clone(schema));
        }

        tracing::debug!(path = %canonical.display(), "reading schema");
        let text = std::fs::read_to_string(&canonical)?;
        let yaml = has_extension(&canonical.to_string_lossy(), &self.yaml_extensions);
        let schema = Rc::new(parse_document(
            &text,
            Location::File(canonical.clone()),
            yaml,
        )?);
        self.cache.insert(canonical, Rc::clone(&schema));
        Ok(schema)
    }
}
