//! Compile JSON Schema documents into Rust type declarations with generated,
//! validating decoders.
//!
//! Each schema identity maps to one output module. A [`Generator`] loads the
//! entry documents (and everything they reference, locally or over HTTP),
//! synthesizes declarations, and renders one source file per module:
//!
//! ```no_run
//! use json_schema_typegen::{GenerateSettings, Generator};
//!
//! let mut generator = Generator::new(GenerateSettings::default())?;
//! generator.do_file("schemas/person.json")?;
//! for warning in generator.take_warnings() {
//!     eprintln!("warning: {warning}");
//! }
//! generator.write_to_dir("src/generated")?;
//! # Ok::<(), json_schema_typegen::JsonSchemaGenError>(())
//! ```

mod diagnostics;
pub mod emitter;
mod error;
pub mod formatter;
mod generator;
pub mod json_pointer;
pub mod loader;
pub mod namer;
mod output;
mod postprocess;
mod render;
pub mod schema;
mod settings;
mod synth;
pub mod types;
pub mod validator;

pub use diagnostics::{Warning, WarningKind};
pub use error::JsonSchemaGenError;
pub use formatter::{Formatter, JsonFormatter, YamlFormatter};
pub use generator::Generator;
pub use loader::{CachedLoader, FileLoader, HttpLoader, Loader, SchemeLoader};
pub use namer::{HeckNamer, IdentifierNamer};
pub use postprocess::{PostProcessor, Rustfmt};
pub use render::HEADER;
pub use schema::{Location, Schema};
pub use settings::{Format, GenerateSettings, SchemaMapping};

use std::io::Write;
use std::path::Path;

/// Generate Rust declarations from a JSON Schema string and write the module
/// holding its root declaration to `writer`.
///
/// The document is named `root`, so an untitled root becomes `Root`. Relative
/// references resolve against the working directory; declarations they pull
/// into other modules are generated but not written.
///
/// # Errors
///
/// Returns `JsonSchemaGenError` if the settings are invalid, the schema cannot
/// be decoded or synthesized, or writing to the writer fails.
pub fn generate_to_writer<W: Write>(
    schema_json: &str,
    writer: &mut W,
    settings: &GenerateSettings,
) -> Result<(), JsonSchemaGenError> {
    let mut generator = Generator::new(settings.clone())?;
    let file = generator.add_schema("root", schema_json, false)?;
    write_output(&generator, &file, writer)
}

/// Generate Rust declarations from a schema file and write the module holding
/// its root declaration to `output_path`.
///
/// # Errors
///
/// Returns `JsonSchemaGenError` if the settings are invalid, loading or
/// synthesizing any reachable schema fails, or writing the output fails.
pub fn generate_from_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    settings: &GenerateSettings,
) -> Result<(), JsonSchemaGenError> {
    let mut generator = Generator::new(settings.clone())?;
    let file = generator.do_file(input_path)?;
    let mut output_file: std::fs::File = std::fs::File::create(output_path)?;
    write_output(&generator, &file, &mut output_file)
}

fn write_output<W: Write>(
    generator: &Generator,
    file: &str,
    writer: &mut W,
) -> Result<(), JsonSchemaGenError> {
    for warning in generator.warnings() {
        tracing::warn!("{warning}");
    }
    let sources = generator.sources()?;
    if let Some(source) = sources.get(file) {
        writer.write_all(source.as_bytes())?;
    }
    Ok(())
}
