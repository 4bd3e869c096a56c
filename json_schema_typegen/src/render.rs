//! Rendering outputs to Rust source text.

use heck::ToSnakeCase;

use crate::emitter::{Emitter, escape_str};
use crate::formatter::Formatter;
use crate::output::Output;
use crate::types::{DeclShape, EnumBase, EnumType, Field, FieldRole, StructType, TypeDecl};

/// First line of every generated file.
pub const HEADER: &str = "//! Generated by json-schema-typegen. Do not edit manually.";

/// Renders one output module: header, imports, then every declaration in
/// name order, each followed by the selected formatters' items.
#[must_use]
pub fn render_output(output: &Output, formatters: &[Box<dyn Formatter>], comment_width: usize) -> String {
    let derive_serde = !formatters.iter().any(|f| f.provides_serde());
    let mut out = Emitter::new(comment_width);
    out.line(HEADER);
    out.blank();

    let mut imports = output.imports().peekable();
    if imports.peek().is_some() {
        for import in imports {
            out.line(format!("use {import};"));
        }
        out.blank();
    }

    let mut decls: Vec<&TypeDecl> = output.decls().filter(|d| d.shape.is_some()).collect();
    decls.sort_by(|a, b| a.name.cmp(&b.name));
    for decl in decls {
        match &decl.shape {
            Some(DeclShape::Struct(st)) => {
                render_struct(&mut out, decl, st, derive_serde);
                for formatter in formatters {
                    out.blank();
                    formatter.struct_items(&mut out, decl, st);
                }
            }
            Some(DeclShape::Enum(en)) => {
                render_enum(&mut out, decl, en, derive_serde);
                for formatter in formatters {
                    out.blank();
                    formatter.enum_items(&mut out, decl, en);
                }
            }
            Some(DeclShape::Alias(ty)) => {
                out.doc_comment(decl.doc.as_deref());
                out.line(format!("pub type {} = {};", decl.name, ty.render()));
            }
            None => continue,
        }
        out.blank();
    }
    out.finish()
}

fn default_fn_name(decl: &TypeDecl, field: &Field) -> String {
    format!(
        "default_{}_{}",
        decl.name.to_snake_case(),
        field.unraw_name()
    )
}

fn field_attributes(decl: &TypeDecl, field: &Field, derive_serde: bool) -> Vec<String> {
    let mut attributes: Vec<String> = Vec::new();
    if field.is_flattened() {
        attributes.push("flatten".to_string());
        return attributes;
    }
    if field.unraw_name() != field.json_key {
        attributes.push(format!("rename = \"{}\"", escape_str(&field.json_key)));
    }
    if derive_serde && field.default.is_some() {
        attributes.push(format!("default = \"{}\"", default_fn_name(decl, field)));
    }
    // A required nullable key must still be written as `null`.
    if field.ty.is_optional() && !matches!(field.role, FieldRole::Property { required: true }) {
        attributes.push("skip_serializing_if = \"Option::is_none\"".to_string());
    }
    attributes
}

fn render_struct(out: &mut Emitter, decl: &TypeDecl, st: &StructType, derive_serde: bool) {
    out.doc_comment(decl.doc.as_deref());
    if derive_serde {
        out.line("#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]");
        if st.deny_unknown_fields && !st.has_flattened() {
            out.line("#[serde(deny_unknown_fields)]");
        }
    } else {
        out.line("#[derive(Debug, Clone, serde::Serialize)]");
    }
    if st.fields.is_empty() {
        out.line(format!("pub struct {} {{}}", decl.name));
    } else {
        out.open(format!("pub struct {}", decl.name));
        for field in &st.fields {
            out.doc_comment(field.doc.as_deref());
            let attributes = field_attributes(decl, field, derive_serde);
            if !attributes.is_empty() {
                out.line(format!("#[serde({})]", attributes.join(", ")));
            }
            out.line(format!("pub {}: {},", field.name, field.ty.render()));
        }
        out.close();
    }

    if !derive_serde {
        return;
    }
    for field in st.fields.iter().filter(|f| !f.is_flattened()) {
        let Some(literal) = &field.default else {
            continue;
        };
        let body = if field.ty.is_optional() {
            format!("Some({literal})")
        } else {
            literal.clone()
        };
        out.blank();
        out.open(format!(
            "fn {}() -> {}",
            default_fn_name(decl, field),
            field.ty.render()
        ));
        out.line(body);
        out.close();
    }
}

fn render_enum(out: &mut Emitter, decl: &TypeDecl, en: &EnumType, derive_serde: bool) {
    out.doc_comment(decl.doc.as_deref());
    let name = &decl.name;
    match en.base {
        EnumBase::Str => {
            let derives = if derive_serde {
                "Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize"
            } else {
                "Debug, Clone, Copy, PartialEq, Eq, Hash"
            };
            out.line(format!("#[derive({derives})]"));
            out.open(format!("pub enum {name}"));
            for (value, variant) in en.values.iter().zip(&en.variants) {
                if derive_serde && let Some(literal) = value.as_str() {
                    out.line(format!("#[serde(rename = \"{}\")]", escape_str(literal)));
                }
                out.line(format!("{variant},"));
            }
            out.close();
            out.blank();

            let literals: Vec<String> = en.values.iter().map(|v| en.literal(v)).collect();
            let all: Vec<String> = en.variants.iter().map(|v| format!("Self::{v}")).collect();
            out.open(format!("impl {name}"));
            out.line(format!(
                "pub const VALUES: &[&str] = &[{}];",
                literals.join(", ")
            ));
            out.line(format!("pub const ALL: &[Self] = &[{}];", all.join(", ")));
            out.blank();
            out.line("#[must_use]");
            out.open("pub fn as_str(self) -> &'static str");
            out.open("match self");
            for (literal, variant) in literals.iter().zip(&en.variants) {
                out.line(format!("Self::{variant} => {literal},"));
            }
            out.close();
            out.close();
            out.close();
        }
        EnumBase::Any => {
            let derives = if derive_serde {
                "Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize"
            } else {
                "Debug, Clone, PartialEq"
            };
            out.line(format!("#[derive({derives})]"));
            if derive_serde {
                out.line("#[serde(transparent)]");
            }
            out.line(format!("pub struct {name}(pub serde_json::Value);"));
            out.blank();
            out.open(format!("impl {name}"));
            out.plain_comment("Accepted literals.");
            out.line("#[must_use]");
            out.open("pub fn values() -> Vec<serde_json::Value>");
            let literals: Vec<String> = en.values.iter().map(|v| en.literal(v)).collect();
            if literals.is_empty() {
                out.line("Vec::new()");
            } else {
                out.line(format!("vec![{}]", literals.join(", ")));
            }
            out.close();
            out.close();
        }
        base => {
            let comparisons = if base == EnumBase::Float {
                "Copy, PartialEq"
            } else {
                "Copy, PartialEq, Eq, Hash"
            };
            if derive_serde {
                out.line(format!(
                    "#[derive(Debug, Clone, {comparisons}, serde::Serialize, serde::Deserialize)]"
                ));
                out.line("#[serde(transparent)]");
            } else {
                out.line(format!("#[derive(Debug, Clone, {comparisons})]"));
            }
            let base_name = base.rust_name();
            out.line(format!("pub struct {name}(pub {base_name});"));
            out.blank();
            let literals: Vec<String> = en.values.iter().map(|v| en.literal(v)).collect();
            out.open(format!("impl {name}"));
            out.line(format!(
                "pub const VALUES: &[{base_name}] = &[{}];",
                literals.join(", ")
            ));
            out.close();
        }
    }
}
