use super::{
    Formatter, open_generic_fn, render_enum_decode, render_enum_serialize, render_struct_decode,
};
use crate::emitter::Emitter;
use crate::settings::Format;
use crate::types::{EnumType, StructType, TypeDecl};
use crate::validator::RenderContext;

/// Hand-written `serde` impls. The decode path reads a
/// `serde_json::Map` from any deserializer, so the impls also serve other
/// self-describing formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

fn decode_branch(ty: &str) -> String {
    format!("serde_json::from_value::<{ty}>(serde_json::Value::Object(raw.clone()))")
}

fn context(type_name: &str) -> RenderContext<'_> {
    RenderContext {
        type_name,
        error_type: "D::Error",
        value_type: "serde_json::Value",
        decode_branch: &decode_branch,
    }
}

fn open_deserialize(out: &mut Emitter, name: &str) {
    out.open(format!("impl<'de> serde::Deserialize<'de> for {name}"));
    open_generic_fn(
        out,
        "fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>",
        "D: serde::Deserializer<'de>",
    );
}

impl Formatter for JsonFormatter {
    fn format(&self) -> Format {
        Format::Json
    }

    fn provides_serde(&self) -> bool {
        true
    }

    fn struct_items(&self, out: &mut Emitter, decl: &TypeDecl, st: &StructType) {
        open_deserialize(out, &decl.name);
        render_struct_decode(
            out,
            decl,
            st,
            &context(&decl.name),
            (
                "let raw: serde_json::Map<String, serde_json::Value> = serde::Deserialize::deserialize(deserializer)?;",
                "serde_json::from_value(serde_json::Value::Object(raw)).map_err(<D::Error as serde::de::Error>::custom)?",
            ),
        );
        out.close();
        out.close();
    }

    fn enum_items(&self, out: &mut Emitter, decl: &TypeDecl, en: &EnumType) {
        render_enum_serialize(out, decl, en);
        out.blank();
        open_deserialize(out, &decl.name);
        render_enum_decode(
            out,
            decl,
            en,
            &context(&decl.name),
            "serde::Deserialize::deserialize(deserializer)?",
        );
        out.close();
        out.close();
    }
}
