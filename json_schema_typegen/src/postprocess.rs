//! Optional passes over generated source text.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::JsonSchemaGenError;

/// Transforms the rendered text of one output file.
pub trait PostProcessor {
    /// # Errors
    ///
    /// Returns `PostProcess` naming `output` when the pass fails.
    fn process(&self, output: &str, source: String) -> Result<String, JsonSchemaGenError>;
}

/// Pipes sources through `rustfmt`.
#[derive(Debug, Clone)]
pub struct Rustfmt {
    pub program: String,
    pub edition: String,
}

impl Default for Rustfmt {
    fn default() -> Self {
        Self {
            program: "rustfmt".to_string(),
            edition: "2024".to_string(),
        }
    }
}

impl PostProcessor for Rustfmt {
    fn process(&self, output: &str, source: String) -> Result<String, JsonSchemaGenError> {
        let failed = |message: String| JsonSchemaGenError::PostProcess {
            output: output.to_string(),
            message,
        };

        tracing::debug!(%output, program = %self.program, "formatting");
        let mut child = Command::new(&self.program)
            .args(["--edition", &self.edition, "--emit", "stdout", "--quiet"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("cannot run {}: {e}", self.program)))?;

        // Dropping stdin closes the pipe so rustfmt sees end of input.
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| failed(e.to_string()))?;
        }
        let result = child.wait_with_output().map_err(|e| failed(e.to_string()))?;
        if !result.status.success() {
            return Err(failed(
                String::from_utf8_lossy(&result.stderr).trim().to_string(),
            ));
        }
        String::from_utf8(result.stdout).map_err(|e| failed(e.to_string()))
    }
}
