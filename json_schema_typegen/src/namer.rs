//! Turning schema names into Rust identifiers.

use heck::{ToSnakeCase, ToUpperCamelCase};
use std::collections::BTreeMap;

/// Rust keywords that must be escaped as raw identifiers when used as field names.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "union", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "Self", "super"];

/// Identifier naming capability used by the synthesizer.
pub trait IdentifierNamer {
    /// A `PascalCase` type name fragment for one scope segment.
    fn type_name(&self, segment: &str) -> String;

    /// A `snake_case` field name for a property key.
    fn field_name(&self, key: &str) -> String;

    /// A `PascalCase` enum variant name for a string literal.
    fn variant_name(&self, literal: &str) -> String;
}

/// The default namer, built on `heck`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeckNamer;

impl IdentifierNamer for HeckNamer {
    fn type_name(&self, segment: &str) -> String {
        let name = alphanumeric_words(segment).to_upper_camel_case();
        if name.is_empty() {
            "Type".to_string()
        } else if name.starts_with(|c: char| c.is_ascii_digit()) {
            format!("T{name}")
        } else if RESERVED.contains(&name.as_str()) {
            format!("{name}_")
        } else {
            name
        }
    }

    fn field_name(&self, key: &str) -> String {
        let name = alphanumeric_words(key).to_snake_case();
        if name.is_empty() {
            "field".to_string()
        } else if name.starts_with(|c: char| c.is_ascii_digit()) {
            format!("field_{name}")
        } else if RESERVED.contains(&name.as_str()) {
            format!("{name}_")
        } else if KEYWORDS.contains(&name.as_str()) {
            format!("r#{name}")
        } else {
            name
        }
    }

    /// Prefixes with `E` (short for Enum) if the result is empty or starts
    /// with a digit.
    fn variant_name(&self, literal: &str) -> String {
        let base = alphanumeric_words(literal).to_upper_camel_case();
        if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
            format!("E{base}")
        } else if RESERVED.contains(&base.as_str()) {
            format!("{base}_")
        } else {
            base
        }
    }
}

/// Replaces every non-alphanumeric character with a word boundary.
fn alphanumeric_words(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect()
}

/// Joins the type names of every scope segment.
#[must_use]
pub fn scope_name(namer: &dyn IdentifierNamer, segments: &[String]) -> String {
    segments.iter().map(|s| namer.type_name(s)).collect()
}

/// Names one variant per literal, in order. Names that collide are all
/// suffixed `_0`, `_1`, ... in literal order.
#[must_use]
pub fn variant_names(namer: &dyn IdentifierNamer, literals: &[String]) -> Vec<String> {
    let base_names: Vec<String> = literals.iter().map(|s| namer.variant_name(s)).collect();
    let mut name_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for base in &base_names {
        *name_counts.entry(base.as_str()).or_insert(0) += 1;
    }

    let mut name_indices: BTreeMap<&str, usize> = BTreeMap::new();
    base_names
        .iter()
        .map(|base| {
            if name_counts.get(base.as_str()).copied().unwrap_or(0) > 1 {
                let index = name_indices.entry(base.as_str()).or_insert(0);
                let name = format!("{base}_{index}");
                *index += 1;
                name
            } else {
                base.clone()
            }
        })
        .collect()
}
