//! The generation session: entry points, per-file transactions, and
//! serialization of every output.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::diagnostics::Warning;
use crate::error::JsonSchemaGenError;
use crate::formatter::{self, Formatter};
use crate::loader::{CachedLoader, Loader, SchemeLoader, parse_document};
use crate::namer::{HeckNamer, IdentifierNamer};
use crate::output::OutputId;
use crate::postprocess::{PostProcessor, Rustfmt};
use crate::render::render_output;
use crate::schema::Location;
use crate::settings::GenerateSettings;
use crate::synth::Synthesizer;

/// Drives one generation run.
///
/// Feed entry documents with [`Generator::do_file`] or
/// [`Generator::add_schema`], then collect the rendered modules with
/// [`Generator::sources`] or [`Generator::write_to_dir`]. Warnings accumulate
/// until drained with [`Generator::take_warnings`].
pub struct Generator {
    session: Synthesizer,
    formatters: Vec<Box<dyn Formatter>>,
    post_processors: Vec<Box<dyn PostProcessor>>,
    cancellation: Option<Arc<AtomicBool>>,
}

impl Generator {
    /// A generator with the file/HTTP loader, the `heck` namer, and the
    /// formatters and post-processors `settings` selects.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSetting` when `settings` fails its sanity checks.
    pub fn new(settings: GenerateSettings) -> Result<Self, JsonSchemaGenError> {
        settings.check()?;
        let loader = SchemeLoader::from_settings(&settings);
        let cancellation = Some(loader.http().cancellation());
        let formatters = formatter::for_settings(&settings);
        let mut post_processors: Vec<Box<dyn PostProcessor>> = Vec::new();
        if settings.rustfmt {
            post_processors.push(Box::new(Rustfmt::default()));
        }
        Ok(Self {
            session: Synthesizer::new(
                settings,
                Box::new(CachedLoader::new(loader)),
                Box::new(HeckNamer),
            ),
            formatters,
            post_processors,
            cancellation,
        })
    }

    /// Replaces the document loader. The remote cancellation flag no longer
    /// applies.
    #[must_use]
    pub fn with_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.session.loader = Box::new(loader);
        self.cancellation = None;
        self
    }

    #[must_use]
    pub fn with_namer(mut self, namer: impl IdentifierNamer + 'static) -> Self {
        self.session.namer = Box::new(namer);
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatters.push(Box::new(formatter));
        self
    }

    #[must_use]
    pub fn with_post_processor(mut self, post_processor: impl PostProcessor + 'static) -> Self {
        self.post_processors.push(Box::new(post_processor));
        self
    }

    /// Setting the flag aborts in-flight and future remote fetches.
    #[must_use]
    pub fn cancellation(&self) -> Option<Arc<AtomicBool>> {
        self.cancellation.clone()
    }

    #[must_use]
    pub fn settings(&self) -> &GenerateSettings {
        &self.session.settings
    }

    /// Generates the document at `path`. On failure every declaration and
    /// warning the file produced is rolled back; earlier files are kept.
    /// Returns the output file the document's declarations went to.
    ///
    /// # Errors
    ///
    /// Returns the first resolution, shape or configuration error, wrapped
    /// with the file name.
    pub fn do_file(&mut self, path: impl AsRef<Path>) -> Result<String, JsonSchemaGenError> {
        let path = path.as_ref().to_string_lossy().into_owned();
        tracing::debug!(%path, "generating file");
        self.transaction(|session| {
            let schema = session.loader.load(&path, None)?;
            session.generate_document(&schema)
        })
        .map_err(|e| e.in_file(&path))
    }

    /// Generates an in-memory document named `name`. Relative references in
    /// it resolve against the working directory.
    ///
    /// # Errors
    ///
    /// As [`Generator::do_file`], plus decode errors for `text`.
    pub fn add_schema(
        &mut self,
        name: &str,
        text: &str,
        yaml: bool,
    ) -> Result<String, JsonSchemaGenError> {
        tracing::debug!(%name, "generating in-memory schema");
        self.transaction(|session| {
            let schema = Rc::new(parse_document(
                text,
                Location::Memory(name.to_string()),
                yaml,
            )?);
            session.generate_document(&schema)
        })
        .map_err(|e| e.in_file(name))
    }

    fn transaction(
        &mut self,
        generate: impl FnOnce(&mut Synthesizer) -> Result<OutputId, JsonSchemaGenError>,
    ) -> Result<String, JsonSchemaGenError> {
        let registry = self.session.registry.clone();
        let warnings = self.session.diagnostics.warnings().len();
        match generate(&mut self.session) {
            Ok(output) => Ok(self.session.registry.get(output).file_name.clone()),
            Err(err) => {
                self.session.registry = registry;
                self.session.diagnostics.truncate(warnings);
                self.session.reset_in_progress();
                Err(err)
            }
        }
    }

    /// Renders every output, keyed by file name.
    ///
    /// # Errors
    ///
    /// Returns `PostProcess` when a post-processor fails.
    pub fn sources(&self) -> Result<BTreeMap<String, String>, JsonSchemaGenError> {
        let comment_width = self.session.settings.comment_width;
        let mut sources = BTreeMap::new();
        for output in self.session.registry.outputs() {
            let mut source = render_output(output, &self.formatters, comment_width);
            for post_processor in &self.post_processors {
                source = post_processor.process(&output.file_name, source)?;
            }
            sources.insert(output.file_name.clone(), source);
        }
        Ok(sources)
    }

    /// Renders every output, then writes them all into `dir`. Nothing is
    /// written if any output fails to render.
    ///
    /// # Errors
    ///
    /// Returns `PostProcess` or `IoError`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, JsonSchemaGenError> {
        let sources = self.sources()?;
        std::fs::create_dir_all(dir.as_ref())?;
        let mut written = Vec::with_capacity(sources.len());
        for (file_name, source) in sources {
            let path = dir.as_ref().join(file_name);
            std::fs::write(&path, source)?;
            tracing::debug!(path = %path.display(), "wrote output");
            written.push(path);
        }
        Ok(written)
    }

    /// Warnings recorded and not yet drained.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        self.session.diagnostics.warnings()
    }

    /// Drains the warnings recorded so far.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        self.session.diagnostics.take()
    }
}
