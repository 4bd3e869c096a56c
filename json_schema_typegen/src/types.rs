//! Target-side type model: the Rust shapes declarations are rendered from.

use serde_json::{Number, Value};

use crate::schema;
use crate::validator::Validator;

/// A scalar Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl Primitive {
    #[must_use]
    pub fn rust_name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::U8 | Self::I16 | Self::U16 | Self::I32 | Self::U32 | Self::I64 | Self::U64
        )
    }

    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Whether `n` is an integer this integer type can hold.
    #[must_use]
    pub fn holds(self, n: &Number) -> bool {
        let Some(value) = n.as_i64().map(i128::from).or_else(|| n.as_u64().map(i128::from)) else {
            return false;
        };
        let (min, max): (i128, i128) = match self {
            Self::I8 => (i8::MIN.into(), i8::MAX.into()),
            Self::U8 => (0, u8::MAX.into()),
            Self::I16 => (i16::MIN.into(), i16::MAX.into()),
            Self::U16 => (0, u16::MAX.into()),
            Self::I32 => (i32::MIN.into(), i32::MAX.into()),
            Self::U32 => (0, u32::MAX.into()),
            Self::I64 => (i64::MIN.into(), i64::MAX.into()),
            Self::U64 => (0, u64::MAX.into()),
            _ => return false,
        };
        (min..=max).contains(&value)
    }
}

/// A reference to a declaration. `module_path` is `None` for declarations
/// in the module being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    pub module_path: Option<String>,
    pub name: String,
}

impl NamedType {
    #[must_use]
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            module_path: None,
            name: name.into(),
        }
    }

    /// `name`, or `module::name` using the last segment of the module path,
    /// which the owning file imports.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.module_path {
            None => self.name.clone(),
            Some(path) => format!("{}::{}", module_qualifier(path), self.name),
        }
    }
}

/// Last segment of a module path.
#[must_use]
pub fn module_qualifier(module_path: &str) -> &str {
    module_path.rsplit("::").next().unwrap_or(module_path)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(Primitive),
    /// Untyped placeholder.
    Any,
    /// Only `null` is accepted; checked by a validator.
    Null,
    Array(Box<Type>),
    /// String-keyed map.
    Map(Box<Type>),
    Optional(Box<Type>),
    /// Indirection that breaks a reference cycle.
    Boxed(Box<Type>),
    Named(NamedType),
    /// A type named by the `x-rust` extension, used verbatim.
    Custom(String),
}

impl Type {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(NamedType::local(name))
    }

    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Primitive(p) => p.rust_name().to_string(),
            Self::Any => "serde_json::Value".to_string(),
            Self::Null => "Option<serde_json::Value>".to_string(),
            Self::Array(inner) => format!("Vec<{}>", inner.render()),
            Self::Map(inner) => format!("std::collections::BTreeMap<String, {}>", inner.render()),
            Self::Optional(inner) => format!("Option<{}>", inner.render()),
            Self::Boxed(inner) => format!("Box<{}>", inner.render()),
            Self::Named(named) => named.render(),
            Self::Custom(path) => path.clone(),
        }
    }

    /// Whether the rendered type is already an `Option`.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_) | Self::Null)
    }

    /// Wraps in `Option` unless already optional.
    #[must_use]
    pub fn optional(self) -> Self {
        if self.is_optional() {
            self
        } else {
            Self::Optional(Box::new(self))
        }
    }

    #[must_use]
    pub fn without_optional(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner,
            other => other,
        }
    }

    /// The declaration this type refers to, looking through `Option` and `Box`.
    #[must_use]
    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            Self::Named(named) => Some(named),
            Self::Optional(inner) | Self::Boxed(inner) => inner.as_named(),
            _ => None,
        }
    }

    /// The primitive this type wraps, looking through `Option`.
    #[must_use]
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self.without_optional() {
            Self::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Array nesting above a null element type: `Null` is 0, `Vec<Null>` is 1.
    #[must_use]
    pub fn null_depth(&self) -> Option<usize> {
        match self {
            Self::Null => Some(0),
            Self::Array(inner) => inner.null_depth().map(|depth| depth + 1),
            Self::Optional(inner) => inner.null_depth(),
            _ => None,
        }
    }

    /// Every named type nested in `self`, mutably.
    pub fn named_types_mut(&mut self) -> Vec<&mut NamedType> {
        match self {
            Self::Named(named) => vec![named],
            Self::Array(inner) | Self::Map(inner) | Self::Optional(inner) | Self::Boxed(inner) => {
                inner.named_types_mut()
            }
            Self::Primitive(_) | Self::Any | Self::Null | Self::Custom(_) => Vec::new(),
        }
    }
}

/// What a struct field stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// A schema property.
    Property { required: bool },
    /// An `allOf` member, flattened into the struct.
    Embedded,
    /// The `additionalProperties` catch-all map.
    Catchall,
    /// One branch of an `anyOf`/`oneOf` set; `Some` when it decoded.
    Branch(UnionKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionKind {
    AnyOf,
    OneOf,
}

impl UnionKind {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::AnyOf => "anyOf",
            Self::OneOf => "oneOf",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    /// Property name on the wire; empty for flattened fields.
    pub json_key: String,
    pub ty: Type,
    pub doc: Option<String>,
    pub role: FieldRole,
    /// Rust expression for the schema default, of the type inside `Option`.
    pub default: Option<String>,
}

impl Field {
    /// Field name without the raw-identifier prefix, as serde sees it.
    #[must_use]
    pub fn unraw_name(&self) -> &str {
        self.name.strip_prefix("r#").unwrap_or(&self.name)
    }

    #[must_use]
    pub fn is_flattened(&self) -> bool {
        matches!(
            self.role,
            FieldRole::Embedded | FieldRole::Catchall | FieldRole::Branch(_)
        )
    }

    /// Type of the field in the decode shadow struct. Defaulted fields are
    /// optional there so the default can be filled in after decoding.
    #[must_use]
    pub fn plain_type(&self) -> Type {
        if self.default.is_some() {
            self.ty.clone().optional()
        } else {
            self.ty.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructType {
    pub fields: Vec<Field>,
    pub deny_unknown_fields: bool,
}

impl StructType {
    #[must_use]
    pub fn has_flattened(&self) -> bool {
        self.fields.iter().any(Field::is_flattened)
    }
}

/// Base representation an enum's literals are decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumBase {
    Str,
    Int,
    Float,
    Bool,
    /// Mixed kinds or `null`: a holder around `serde_json::Value`.
    Any,
}

impl EnumBase {
    #[must_use]
    pub fn rust_name(self) -> &'static str {
        match self {
            Self::Str => "String",
            Self::Int => "i64",
            Self::Float => "f64",
            Self::Bool => "bool",
            Self::Any => "serde_json::Value",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub base: EnumBase,
    /// Literals in schema order, deduplicated.
    pub values: Vec<Value>,
    /// Variant names parallel to `values`; only for `EnumBase::Str`.
    pub variants: Vec<String>,
}

impl EnumType {
    /// Rust expression for one literal of the base representation.
    #[must_use]
    pub fn literal(&self, value: &Value) -> String {
        match (self.base, value) {
            (EnumBase::Str, Value::String(s)) => format!("\"{}\"", crate::emitter::escape_str(s)),
            (EnumBase::Float, Value::Number(n)) => float_literal(n),
            (EnumBase::Any, v) => format!("serde_json::json!({v})"),
            (_, v) => v.to_string(),
        }
    }

    /// Variant for a string literal.
    #[must_use]
    pub fn variant_for(&self, literal: &str) -> Option<&str> {
        self.values
            .iter()
            .position(|v| v.as_str() == Some(literal))
            .and_then(|index| self.variants.get(index))
            .map(String::as_str)
    }
}

/// A float literal that always has a decimal point.
#[must_use]
pub fn float_literal(n: &Number) -> String {
    let text = n.to_string();
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclShape {
    Struct(StructType),
    Enum(EnumType),
    /// `pub type Name = T;`
    Alias(Type),
}

/// A named declaration in an output module.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub doc: Option<String>,
    /// Filled in exactly once, when shape synthesis completes.
    pub shape: Option<DeclShape>,
    /// The schema node this was synthesized from, for structural reuse.
    pub origin: schema::Type,
    pub validators: Vec<Validator>,
}
