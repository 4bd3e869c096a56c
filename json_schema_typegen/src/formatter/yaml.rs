use super::{
    Formatter, open_generic_fn, render_enum_decode, render_enum_serialize, render_struct_decode,
};
use crate::emitter::Emitter;
use crate::settings::Format;
use crate::types::{EnumBase, EnumType, StructType, TypeDecl};
use crate::validator::RenderContext;

/// Inherent `from_yaml_str` / `from_yaml_value` / `to_yaml_value` methods
/// built on `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormatter {
    /// Also emit `serde` impls that route through `from_yaml_value`, so
    /// nested declarations are validated when nothing else provides them.
    pub serde_bridge: bool,
}

fn decode_branch(ty: &str) -> String {
    format!("serde_yaml::from_value::<{ty}>(serde_yaml::Value::Mapping(raw.clone()))")
}

fn context(type_name: &str) -> RenderContext<'_> {
    RenderContext {
        type_name,
        error_type: "serde_yaml::Error",
        value_type: "serde_yaml::Value",
        decode_branch: &decode_branch,
    }
}

fn from_yaml_str(out: &mut Emitter) {
    out.line("/// # Errors");
    out.line("///");
    out.line("/// Returns an error if `input` is not YAML or does not satisfy the schema.");
    out.open("pub fn from_yaml_str(input: &str) -> Result<Self, serde_yaml::Error>");
    out.line("Self::from_yaml_value(serde_yaml::from_str(input)?)");
    out.close();
}

fn open_from_yaml_value(out: &mut Emitter) {
    out.line("/// # Errors");
    out.line("///");
    out.line("/// Returns an error if `value` does not satisfy the schema.");
    out.open("pub fn from_yaml_value(value: serde_yaml::Value) -> Result<Self, serde_yaml::Error>");
}

fn bridge_deserialize(out: &mut Emitter, name: &str) {
    out.open(format!("impl<'de> serde::Deserialize<'de> for {name}"));
    open_generic_fn(
        out,
        "fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>",
        "D: serde::Deserializer<'de>",
    );
    out.line("let value: serde_yaml::Value = serde::Deserialize::deserialize(deserializer)?;");
    out.line("Self::from_yaml_value(value).map_err(<D::Error as serde::de::Error>::custom)");
    out.close();
    out.close();
}

impl Formatter for YamlFormatter {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn provides_serde(&self) -> bool {
        self.serde_bridge
    }

    fn struct_items(&self, out: &mut Emitter, decl: &TypeDecl, st: &StructType) {
        out.open(format!("impl {}", decl.name));
        from_yaml_str(out);
        out.blank();
        open_from_yaml_value(out);
        render_struct_decode(
            out,
            decl,
            st,
            &context(&decl.name),
            (
                "let raw: serde_yaml::Mapping = serde_yaml::from_value(value)?;",
                "serde_yaml::from_value(serde_yaml::Value::Mapping(raw))?",
            ),
        );
        out.close();
        out.blank();
        out.line("/// # Errors");
        out.line("///");
        out.line("/// Returns an error if a field cannot be represented in YAML.");
        out.open("pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error>");
        out.line("serde_yaml::to_string(self)");
        out.close();
        out.close();
        if self.serde_bridge {
            out.blank();
            bridge_deserialize(out, &decl.name);
        }
    }

    fn enum_items(&self, out: &mut Emitter, decl: &TypeDecl, en: &EnumType) {
        out.open(format!("impl {}", decl.name));
        from_yaml_str(out);
        out.blank();
        open_from_yaml_value(out);
        render_enum_decode(out, decl, en, &context(&decl.name), "serde_yaml::from_value(value)?");
        out.close();
        out.blank();
        out.line("/// # Errors");
        out.line("///");
        out.line("/// Returns an error if the value cannot be represented in YAML.");
        // Every base but `Any` is `Copy`.
        let receiver = if en.base == EnumBase::Any { "&self" } else { "self" };
        out.open(format!(
            "pub fn to_yaml_value({receiver}) -> Result<serde_yaml::Value, serde_yaml::Error>"
        ));
        if en.base == EnumBase::Str {
            out.line("serde_yaml::to_value(self.as_str())");
        } else {
            out.line("serde_yaml::to_value(&self.0)");
        }
        out.close();
        out.close();
        if self.serde_bridge {
            out.blank();
            render_enum_serialize(out, decl, en);
            out.blank();
            bridge_deserialize(out, &decl.name);
        }
    }
}
