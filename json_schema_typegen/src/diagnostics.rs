//! Non-fatal degradations collected during generation.

use std::fmt;

/// What kind of degradation a [`Warning`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// Several non-null type names; the value became `serde_json::Value`.
    MultiTypeUnion,
    /// `required` on an object without properties.
    RequiredWithoutProperties,
    /// Enum with mixed literal kinds or `null`, wrapped around `serde_json::Value`.
    WrappedEnum,
    /// A declaration name was taken by a different type and got a suffix.
    NameCollision,
    /// Two properties mapped to the same field name.
    FieldNameCollision,
    /// A reference cycle was broken with `Box`.
    ReferenceCycle,
    /// A default value could not be expressed for its type and was dropped.
    UnsupportedDefault,
    /// A composition member that is not an object declaration was skipped.
    IgnoredComposition,
    /// An untyped composition with members that cannot decode an object
    /// became `serde_json::Value`.
    UntypedComposition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Warnings recorded so far, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn warn(&mut self, kind: WarningKind, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(?kind, "{message}");
        self.warnings.push(Warning { kind, message });
    }

    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Drains and returns every warning.
    pub fn take(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    /// Drops warnings recorded after `len`, for rolling back a failed file.
    pub fn truncate(&mut self, len: usize) {
        self.warnings.truncate(len);
    }
}
