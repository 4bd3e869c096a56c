use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::{Loader, has_extension, parse_document};
use crate::error::JsonSchemaGenError;
use crate::schema::{Location, Schema};

const JSON_CONTENT_TYPES: &[&str] = &["application/json", "application/schema+json"];
const YAML_CONTENT_TYPES: &[&str] = &[
    "application/yaml",
    "application/x-yaml",
    "text/yaml",
    "text/x-yaml",
];
/// Generic types; the URL's extension decides.
const UNTYPED_CONTENT_TYPES: &[&str] = &["text/plain", "application/octet-stream"];

/// Fetches documents over HTTP(S). Only fully parsed documents are cached, so
/// a failed, timed-out or cancelled fetch is retried on the next request.
pub struct HttpLoader {
    agent: ureq::Agent,
    yaml_extensions: Vec<String>,
    cancelled: Arc<AtomicBool>,
    cache: HashMap<String, Rc<Schema>>,
}

impl HttpLoader {
    #[must_use]
    pub fn new(timeout: Option<Duration>, yaml_extensions: Vec<String>) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
            yaml_extensions,
            cancelled: Arc::new(AtomicBool::new(false)),
            cache: HashMap::new(),
        }
    }

    /// Setting the returned flag makes every later fetch fail with `Cancelled`.
    #[must_use]
    pub fn cancellation(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    fn check_cancelled(&self, url: &str) -> Result<(), JsonSchemaGenError> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Err(JsonSchemaGenError::Cancelled {
                url: url.to_string(),
            });
        }
        Ok(())
    }

    fn is_yaml(&self, url: &str, content_type: &str) -> Result<bool, JsonSchemaGenError> {
        if JSON_CONTENT_TYPES.contains(&content_type) {
            Ok(false)
        } else if YAML_CONTENT_TYPES.contains(&content_type) {
            Ok(true)
        } else if UNTYPED_CONTENT_TYPES.contains(&content_type) {
            Ok(has_extension(url, &self.yaml_extensions))
        } else {
            Err(JsonSchemaGenError::UnsupportedContentType {
                url: url.to_string(),
                content_type: content_type.to_string(),
            })
        }
    }
}

/// Resolves `reference` against the parent URL when it is relative.
fn resolve_url(reference: &str, parent: Option<&Location>) -> Result<String, JsonSchemaGenError> {
    let resolved = match parent {
        Some(Location::Url(base)) => url::Url::parse(base).and_then(|base| base.join(reference)),
        _ => url::Url::parse(reference),
    };
    resolved
        .map(|mut url| {
            url.set_fragment(None);
            url.to_string()
        })
        .map_err(|e| JsonSchemaGenError::Fetch {
            url: reference.to_string(),
            message: e.to_string(),
        })
}

impl Loader for HttpLoader {
    fn load(
        &mut self,
        reference: &str,
        parent: Option<&Location>,
    ) -> Result<Rc<Schema>, JsonSchemaGenError> {
        let url = resolve_url(reference, parent)?;
        if let Some(schema) = self.cache.get(&url) {
            return Ok(Rc::clone(schema));
        }
        self.check_cancelled(&url)?;

        tracing::debug!(%url, "fetching schema");
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| JsonSchemaGenError::Fetch {
                url: url.clone(),
                message: e.to_string(),
            })?;
        let yaml = self.is_yaml(&url, response.content_type())?;
        let text = response
            .into_string()
            .map_err(|e| JsonSchemaGenError::Fetch {
                url: url.clone(),
                message: e.to_string(),
            })?;
        self.check_cancelled(&url)?;

        let schema = Rc::new(parse_document(&text, Location::Url(url.clone()), yaml)?);
        self.cache.insert(url, Rc::clone(&schema));
        Ok(schema)
    }
}
