//! Per-format decode/encode code.
//!
//! A formatter renders, for each declaration, the items that decode it from
//! (and, for enums, encode it to) one serialization format. Struct decoding
//! is always the same two-phase shape: checks against the raw map, decoding
//! into a local `Plain` shadow struct, checks and defaults against the
//! shadow, then moving the shadow's fields into `Self`.

mod json;
mod yaml;

pub use json::JsonFormatter;
pub use yaml::YamlFormatter;

use crate::emitter::{Emitter, escape_str};
use crate::settings::{Format, GenerateSettings};
use crate::types::{EnumBase, EnumType, Field, FieldRole, StructType, TypeDecl};
use crate::validator::{Phase, RenderContext};

/// Renders format-specific items for declarations.
pub trait Formatter {
    fn format(&self) -> Format;

    /// Whether this formatter emits the `serde::Deserialize` impls (and
    /// `serde::Serialize` for enums). When no selected formatter does, the
    /// declarations derive them instead.
    fn provides_serde(&self) -> bool;

    fn struct_items(&self, out: &mut Emitter, decl: &TypeDecl, st: &StructType);

    fn enum_items(&self, out: &mut Emitter, decl: &TypeDecl, en: &EnumType);
}

/// The formatters `settings` selects, in a fixed order. The JSON formatter's
/// `Deserialize` impls are format-agnostic, so YAML only bridges through
/// `serde_yaml::Value` when JSON is not selected.
#[must_use]
pub fn for_settings(settings: &GenerateSettings) -> Vec<Box<dyn Formatter>> {
    let json = settings.formats.contains(&Format::Json);
    let mut formatters: Vec<Box<dyn Formatter>> = Vec::new();
    if json {
        formatters.push(Box::new(JsonFormatter));
    }
    if settings.formats.contains(&Format::Yaml) {
        formatters.push(Box::new(YamlFormatter { serde_bridge: !json }));
    }
    formatters
}

/// `fn name<G>(args) -> ret where G: bound, {`, rustfmt's layout for a
/// generic method with a `where` clause.
pub(crate) fn open_generic_fn(out: &mut Emitter, signature: &str, bound: &str) {
    out.line(signature);
    out.line("where");
    out.indent();
    out.line(format!("{bound},"));
    out.outdent();
    out.line("{");
    out.indent();
}

/// The body of a struct decode function. The `Plain` shadow is declared
/// first, then `bind_raw` binds `raw` to the document's map type.
///
/// `decode_plain` is the expression decoding `raw` (moved) into `Plain`,
/// including error conversion.
pub(crate) fn render_struct_decode(
    out: &mut Emitter,
    decl: &TypeDecl,
    st: &StructType,
    cx: &RenderContext<'_>,
    (bind_raw, decode_plain): (&str, &str),
) {
    let plain_fields: Vec<&Field> = st
        .fields
        .iter()
        .filter(|field| !matches!(field.role, FieldRole::Branch(_)))
        .collect();
    out.line("#[derive(serde::Deserialize)]");
    if st.deny_unknown_fields && !st.has_flattened() {
        out.line("#[serde(deny_unknown_fields)]");
    }
    if plain_fields.is_empty() {
        out.line("struct Plain {}");
    } else {
        out.open("struct Plain");
        for field in &plain_fields {
            if field.is_flattened() {
                out.line("#[serde(flatten)]");
            } else if field.unraw_name() != field.json_key {
                out.line(format!("#[serde(rename = \"{}\")]", escape_str(&field.json_key)));
            }
            out.line(format!("{}: {},", field.name, field.plain_type().render()));
        }
        out.close();
    }

    out.line(bind_raw);
    for validator in decl
        .validators
        .iter()
        .filter(|v| v.phase() == Phase::BeforeDecode)
    {
        validator.render(out, cx);
    }

    let after: Vec<_> = decl
        .validators
        .iter()
        .filter(|v| v.phase() == Phase::AfterDecode)
        .collect();
    let binding = if plain_fields.is_empty() {
        "_plain"
    } else if after.iter().any(|v| !v.can_fail()) {
        "mut plain"
    } else {
        "plain"
    };
    out.line(format!("let {binding}: Plain = {decode_plain};"));
    for validator in after {
        validator.render(out, cx);
    }

    out.open("Ok(Self");
    for field in &st.fields {
        match field.role {
            FieldRole::Branch(_) => out.line(format!("{},", field.name)),
            _ if field.default.is_some() && !field.ty.is_optional() => {
                let missing = cx.error(&format!(
                    "\"field {} in {}: default missing\"",
                    escape_str(&field.json_key),
                    decl.name
                ));
                out.line(format!(
                    "{}: plain.{}.ok_or_else(|| {missing})?,",
                    field.name, field.name
                ));
            }
            _ => out.line(format!("{}: plain.{},", field.name, field.name)),
        }
    }
    out.close_with(")");
}

/// The base-value decode for an enum, followed by the membership check.
pub(crate) fn render_enum_decode(
    out: &mut Emitter,
    decl: &TypeDecl,
    en: &EnumType,
    cx: &RenderContext<'_>,
    decode_base: &str,
) {
    out.line(format!(
        "let value: {} = {decode_base};",
        en.base.rust_name()
    ));
    for validator in &decl.validators {
        validator.render(out, cx);
    }
}

/// `impl serde::Serialize` forwarding to the wrapped value.
pub(crate) fn render_enum_serialize(out: &mut Emitter, decl: &TypeDecl, en: &EnumType) {
    out.open(format!("impl serde::Serialize for {}", decl.name));
    open_generic_fn(
        out,
        "fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>",
        "S: serde::Serializer",
    );
    let wrapped = if en.base == EnumBase::Str {
        "self.as_str()"
    } else {
        "&self.0"
    };
    out.line(format!("serde::Serialize::serialize({wrapped}, serializer)"));
    out.close();
    out.close();
}
