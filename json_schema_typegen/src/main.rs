//! Binary to generate Rust declarations from JSON Schema documents.
//!
//! Usage: `jsonschema-typegen [OPTIONS] <SCHEMA>...`
//!
//! Every schema is generated in order; a schema that fails is reported and
//! skipped while the others are still written. Without `--out-dir` the
//! generated modules are printed to stdout.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use json_schema_typegen::{Format, GenerateSettings, Generator, JsonSchemaGenError};

/// Compile JSON Schema documents into Rust types with validating decoders.
#[derive(Parser, Debug)]
#[command(name = "jsonschema-typegen", version, about, long_about = None)]
#[expect(clippy::struct_excessive_bools)]
struct Cli {
    /// Schema files (JSON or YAML) to generate.
    #[arg(required = true)]
    schemas: Vec<PathBuf>,

    /// Settings file (YAML or JSON). Flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the generated modules are written to.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Format to generate decode/encode methods for. Repeatable.
    #[arg(short, long = "format", value_enum)]
    formats: Vec<Format>,

    /// Generate plain derived declarations without validation.
    #[arg(long, conflicts_with = "formats")]
    models_only: bool,

    /// Module path for schemas without a mapping, e.g. `crate::schema`.
    #[arg(long)]
    module: Option<String>,

    /// Prefer the shortest free name over the full scope name.
    #[arg(long)]
    minimal_names: bool,

    /// Name declarations after their `title`.
    #[arg(long)]
    title_names: bool,

    /// Pipe generated sources through `rustfmt`.
    #[arg(long)]
    rustfmt: bool,

    /// Deadline in seconds for each remote schema fetch.
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn settings(&self) -> Result<GenerateSettings, JsonSchemaGenError> {
        let mut settings = match &self.config {
            Some(path) => GenerateSettings::from_config_str(&std::fs::read_to_string(path)?)?,
            None => GenerateSettings::default(),
        };
        if self.models_only {
            settings.formats.clear();
        } else if !self.formats.is_empty() {
            settings.formats.clone_from(&self.formats);
        }
        if let Some(module) = &self.module {
            settings.default_module = Some(module.clone());
        }
        if let Some(timeout) = self.timeout {
            settings.remote_timeout_secs = Some(timeout);
        }
        settings.minimal_names |= self.minimal_names;
        settings.struct_name_from_title |= self.title_names;
        settings.rustfmt |= self.rustfmt;
        Ok(settings)
    }
}

fn report(error: &JsonSchemaGenError) {
    eprintln!("error: {error}");
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn write_outputs(cli: &Cli, generator: &Generator) -> Result<(), JsonSchemaGenError> {
    if let Some(dir) = &cli.out_dir {
        for path in generator.write_to_dir(dir)? {
            tracing::info!(path = %path.display(), "wrote module");
        }
        return Ok(());
    }
    let sources = generator.sources()?;
    let mut stdout = std::io::stdout().lock();
    let several = sources.len() > 1;
    for (file_name, source) in sources {
        if several {
            writeln!(stdout, "// {file_name}")?;
        }
        stdout.write_all(source.as_bytes())?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };
    let mut generator = match Generator::new(settings) {
        Ok(generator) => generator,
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    for schema in &cli.schemas {
        match generator.do_file(schema) {
            Ok(file) => tracing::info!(schema = %schema.display(), %file, "generated"),
            Err(e) => {
                report(&e);
                failed = true;
            }
        }
        for warning in generator.take_warnings() {
            tracing::warn!(schema = %schema.display(), "{warning}");
        }
    }

    if let Err(e) = write_outputs(&cli, &generator) {
        report(&e);
        failed = true;
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
