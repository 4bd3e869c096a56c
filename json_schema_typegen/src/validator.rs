//! Validation rules attached to declarations, and the Rust code that checks
//! them inside generated decode functions.
//!
//! Each rule runs either against the raw document map before decoding
//! (presence checks, union branches) or against the decoded shadow struct
//! afterwards (defaults, null checks, bounds, patterns).

use serde_json::Number;

use crate::emitter::{Emitter, escape_str, raw_str};
use crate::error::JsonSchemaGenError;
use crate::schema::{self, ExclusiveBound};
use crate::types::{EnumBase, Field, FieldRole, Primitive, Type, UnionKind, float_literal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BeforeDecode,
    AfterDecode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumericCheck {
    MultipleOf(Number),
    Minimum { bound: Number, exclusive: bool },
    Maximum { bound: Number, exclusive: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionBranch {
    pub field: String,
    /// Rendered branch type.
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// Key must be present and, unless the field is nullable, non-null.
    Required { json_key: String, nullable: bool },
    /// Fill an absent field with its schema default.
    Default { field: String, literal: String },
    /// Value (or every element, `depth` arrays down) must be null.
    Null {
        field: String,
        json_key: String,
        depth: usize,
        optional: bool,
    },
    StringLength {
        field: String,
        json_key: String,
        min: Option<u64>,
        max: Option<u64>,
        optional: bool,
    },
    ArrayLength {
        field: String,
        json_key: String,
        min: Option<u64>,
        max: Option<u64>,
        optional: bool,
    },
    Pattern {
        field: String,
        json_key: String,
        pattern: String,
        optional: bool,
    },
    Numeric {
        field: String,
        json_key: String,
        check: NumericCheck,
        primitive: Primitive,
        optional: bool,
    },
    /// Decode every branch; `anyOf` needs one success, `oneOf` exactly one.
    Union {
        kind: UnionKind,
        branches: Vec<UnionBranch>,
    },
    /// Decoded `value` must be one of the declaration's literals.
    Enum(EnumBase),
}

impl Validator {
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Required { .. } | Self::Union { .. } => Phase::BeforeDecode,
            _ => Phase::AfterDecode,
        }
    }

    /// Defaults only fill in values; everything else may reject the input.
    #[must_use]
    pub fn can_fail(&self) -> bool {
        !matches!(self, Self::Default { .. })
    }
}

/// Effective lower bound: `(bound, exclusive)`. A numeric `exclusiveMinimum`
/// replaces `minimum` only when strictly greater; a `true` flag makes
/// `minimum` exclusive.
#[must_use]
pub fn effective_minimum(node: &schema::Type) -> Option<(Number, bool)> {
    effective_bound(node.minimum.as_ref(), node.exclusive_minimum.as_ref(), |e, m| e > m)
}

/// Mirror of [`effective_minimum`]: a numeric `exclusiveMaximum` wins only
/// when strictly smaller.
#[must_use]
pub fn effective_maximum(node: &schema::Type) -> Option<(Number, bool)> {
    effective_bound(node.maximum.as_ref(), node.exclusive_maximum.as_ref(), |e, m| e < m)
}

fn effective_bound(
    plain: Option<&Number>,
    exclusive: Option<&ExclusiveBound>,
    stricter: impl Fn(f64, f64) -> bool,
) -> Option<(Number, bool)> {
    match (plain, exclusive) {
        (None, None | Some(ExclusiveBound::Flag(_))) => None,
        (Some(plain), None | Some(ExclusiveBound::Flag(false))) => Some((plain.clone(), false)),
        (Some(plain), Some(ExclusiveBound::Flag(true))) => Some((plain.clone(), true)),
        (None, Some(ExclusiveBound::Value(bound))) => Some((bound.clone(), true)),
        (Some(plain), Some(ExclusiveBound::Value(bound))) => {
            match (bound.as_f64(), plain.as_f64()) {
                (Some(e), Some(m)) if stricter(e, m) => Some((bound.clone(), true)),
                _ => Some((plain.clone(), false)),
            }
        }
    }
}

/// Rules for a struct, in execution order: presence checks, union branches,
/// then per-field defaults and constraints. Only each property's own node is
/// consulted; constraints behind a `$ref` belong to the referenced type.
///
/// # Errors
///
/// Returns `InvalidPattern` for a `pattern` the regex engine rejects.
pub fn for_struct(
    decl_name: &str,
    origin: &schema::Type,
    fields: &[Field],
) -> Result<Vec<Validator>, JsonSchemaGenError> {
    let mut validators: Vec<Validator> = Vec::new();

    for field in fields {
        if let FieldRole::Property { required: true } = field.role {
            validators.push(Validator::Required {
                json_key: field.json_key.clone(),
                nullable: field.ty.is_optional(),
            });
        }
    }
    for kind in [UnionKind::AnyOf, UnionKind::OneOf] {
        let branches: Vec<UnionBranch> = fields
            .iter()
            .filter(|field| field.role == FieldRole::Branch(kind))
            .map(|field| UnionBranch {
                field: field.name.clone(),
                ty: field.ty.without_optional().render(),
            })
            .collect();
        if !branches.is_empty() {
            validators.push(Validator::Union { kind, branches });
        }
    }

    for field in fields {
        if !matches!(field.role, FieldRole::Property { .. }) {
            continue;
        }
        if let Some(literal) = &field.default {
            validators.push(Validator::Default {
                field: field.name.clone(),
                literal: literal.clone(),
            });
        }
        let Some(node) = origin.properties.get(&field.json_key) else {
            continue;
        };
        field_constraints(decl_name, field, node, &mut validators)?;
    }
    Ok(validators)
}

fn field_constraints(
    decl_name: &str,
    field: &Field,
    node: &schema::Type,
    validators: &mut Vec<Validator>,
) -> Result<(), JsonSchemaGenError> {
    let optional = matches!(field.plain_type(), Type::Optional(_));
    let name = || field.name.clone();
    let key = || field.json_key.clone();

    if let Some(depth) = field.ty.null_depth() {
        validators.push(Validator::Null {
            field: name(),
            json_key: key(),
            depth,
            optional,
        });
        return Ok(());
    }

    match field.ty.without_optional() {
        Type::Primitive(Primitive::String) => {
            let min = node.min_length.filter(|min| *min > 0);
            if min.is_some() || node.max_length.is_some() {
                validators.push(Validator::StringLength {
                    field: name(),
                    json_key: key(),
                    min,
                    max: node.max_length,
                    optional,
                });
            }
            if let Some(pattern) = &node.pattern {
                regress::Regex::new(pattern).map_err(|e| JsonSchemaGenError::InvalidPattern {
                    location: format!("{decl_name}.{}", field.json_key),
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
                validators.push(Validator::Pattern {
                    field: name(),
                    json_key: key(),
                    pattern: pattern.clone(),
                    optional,
                });
            }
        }
        Type::Array(_) => {
            // A zero lower bound holds for every length.
            let min = node.min_items.filter(|min| *min > 0);
            if min.is_some() || node.max_items.is_some() {
                validators.push(Validator::ArrayLength {
                    field: name(),
                    json_key: key(),
                    min,
                    max: node.max_items,
                    optional,
                });
            }
        }
        Type::Primitive(primitive) if primitive.is_integer() || primitive.is_float() => {
            let mut checks: Vec<NumericCheck> = Vec::new();
            if let Some(multiple) = node
                .multiple_of
                .as_ref()
                .filter(|m| m.as_f64().is_some_and(|m| m > 0.0))
            {
                checks.push(NumericCheck::MultipleOf(multiple.clone()));
            }
            if let Some((bound, exclusive)) = effective_minimum(node) {
                checks.push(NumericCheck::Minimum { bound, exclusive });
            }
            if let Some((bound, exclusive)) = effective_maximum(node) {
                checks.push(NumericCheck::Maximum { bound, exclusive });
            }
            validators.extend(checks.into_iter().map(|check| Validator::Numeric {
                field: name(),
                json_key: key(),
                check,
                primitive: *primitive,
                optional,
            }));
        }
        _ => {}
    }
    Ok(())
}

/// What the surrounding decode function looks like to a validator.
pub struct RenderContext<'a> {
    pub type_name: &'a str,
    /// Error type of the decode function, e.g. `D::Error`.
    pub error_type: &'a str,
    /// Document value type whose `is_null` checks presence, e.g. `serde_json::Value`.
    pub value_type: &'a str,
    /// Expression decoding one union branch type from a clone of `raw`.
    pub decode_branch: &'a dyn Fn(&str) -> String,
}

impl RenderContext<'_> {
    /// Expression constructing a decode error from a message expression.
    #[must_use]
    pub fn error(&self, message: &str) -> String {
        format!("<{} as serde::de::Error>::custom({message})", self.error_type)
    }

    /// The error constructor as a function path, for `map_err`.
    fn error_type_fn(&self) -> String {
        format!("<{} as serde::de::Error>::custom", self.error_type)
    }

    fn fail(&self, out: &mut Emitter, message: &str) {
        out.line(format!("return Err({});", self.error(message)));
    }

    fn field_message(&self, json_key: &str, suffix: &str) -> String {
        format!(
            "\"field {} in {}: {}\"",
            escape_str(json_key),
            self.type_name,
            escape_str(suffix)
        )
    }
}

/// Runs `body` with `(place, copied)` expressions for the field's value,
/// inside `if let Some(value)` when the field is optional.
fn with_value(
    out: &mut Emitter,
    field: &str,
    optional: bool,
    body: impl FnOnce(&mut Emitter, &str, &str),
) {
    if optional {
        out.open(format!("if let Some(value) = &plain.{field}"));
        body(out, "value", "*value");
        out.close();
    } else {
        let place = format!("plain.{field}");
        body(out, &place, &place);
    }
}

/// Opens `if <condition>` over the field's value. An optional field is
/// tested through `is_some_and`, so an absent value passes.
fn open_check(
    out: &mut Emitter,
    field: &str,
    optional: bool,
    condition: impl FnOnce(&str, &str) -> String,
) {
    if optional {
        out.open(format!(
            "if plain.{field}.as_ref().is_some_and(|value| {})",
            condition("value", "*value")
        ));
    } else {
        let place = format!("plain.{field}");
        out.open(format!("if {}", condition(&place, &place)));
    }
}

fn is_integral(n: &Number) -> bool {
    n.is_i64() || n.is_u64()
}

impl Validator {
    pub fn render(&self, out: &mut Emitter, cx: &RenderContext<'_>) {
        match self {
            Self::Required { json_key, nullable } => {
                let key = escape_str(json_key);
                if *nullable {
                    out.open(format!("if !raw.contains_key(\"{key}\")"));
                } else {
                    out.open(format!(
                        "if raw.get(\"{key}\").is_none_or({}::is_null)",
                        cx.value_type
                    ));
                }
                cx.fail(out, &cx.field_message(json_key, "required"));
                out.close();
            }
            Self::Default { field, literal } => {
                out.open(format!("if plain.{field}.is_none()"));
                out.line(format!("plain.{field} = Some({literal});"));
                out.close();
            }
            Self::Null {
                field,
                json_key,
                depth,
                optional,
            } => render_null(out, cx, field, json_key, *depth, *optional),
            Self::StringLength {
                field,
                json_key,
                min,
                max,
                optional,
            } => render_length(out, cx, field, json_key, (*min, *max), *optional, "chars().count()"),
            Self::ArrayLength {
                field,
                json_key,
                min,
                max,
                optional,
            } => render_length(out, cx, field, json_key, (*min, *max), *optional, "len()"),
            Self::Pattern {
                field,
                json_key,
                pattern,
                optional,
            } => {
                let compile = format!(
                    "regress::Regex::new({}).map_err({})?",
                    raw_str(pattern),
                    cx.error_type_fn()
                );
                with_value(out, field, *optional, |out, place, _| {
                    if *optional {
                        out.line(format!("let pattern = {compile};"));
                        out.open(format!("if pattern.find({place}.as_str()).is_none()"));
                    } else {
                        out.open(format!("if {compile}.find({place}.as_str()).is_none()"));
                    }
                    cx.fail(
                        out,
                        &cx.field_message(json_key, &format!("must match pattern {pattern}")),
                    );
                    out.close();
                });
            }
            Self::Numeric {
                field,
                json_key,
                check,
                primitive,
                optional,
            } => {
                let copied = if *optional {
                    "*value".to_string()
                } else {
                    format!("plain.{field}")
                };
                let (condition, message) = numeric_condition(check, *primitive, &copied);
                open_check(out, field, *optional, |_, _| condition);
                cx.fail(out, &cx.field_message(json_key, &message));
                out.close();
            }
            Self::Union { kind, branches } => render_union(out, cx, *kind, branches),
            Self::Enum(base) => render_enum(out, cx, *base),
        }
    }
}

fn render_null(
    out: &mut Emitter,
    cx: &RenderContext<'_>,
    field: &str,
    json_key: &str,
    depth: usize,
    optional: bool,
) {
    if depth == 0 {
        out.open(format!("if plain.{field}.is_some()"));
        cx.fail(out, &cx.field_message(json_key, "must be null"));
        out.close();
        return;
    }
    with_value(out, field, optional, |out, place, _| {
        let mut container = place.to_string();
        for level in 0..depth {
            out.open(format!(
                "for (i{level}, item{level}) in {container}.iter().enumerate()"
            ));
            container = format!("item{level}");
        }
        out.open(format!("if {container}.is_some()"));
        let position: String = (0..depth).map(|level| format!("[{{i{level}}}]")).collect();
        let message = format!(
            "format!(\"field {}{position} in {}: must be null\")",
            escape_str(json_key),
            cx.type_name
        );
        cx.fail(out, &message);
        out.close();
        for _ in 0..depth {
            out.close();
        }
    });
}

fn render_length(
    out: &mut Emitter,
    cx: &RenderContext<'_>,
    field: &str,
    json_key: &str,
    (min, max): (Option<u64>, Option<u64>),
    optional: bool,
    measure: &str,
) {
    if let Some(min) = min {
        open_check(out, field, optional, |place, _| format!("{place}.{measure} < {min}"));
        cx.fail(out, &cx.field_message(json_key, &format!("length must be >= {min}")));
        out.close();
    }
    if let Some(max) = max {
        open_check(out, field, optional, |place, _| format!("{place}.{measure} > {max}"));
        cx.fail(out, &cx.field_message(json_key, &format!("length must be <= {max}")));
        out.close();
    }
}

/// `(condition that rejects the value, message)`. Integral bounds on integer
/// fields compare through `i128`, which holds every integer width; anything
/// else compares as `f64`.
fn numeric_condition(check: &NumericCheck, primitive: Primitive, copied: &str) -> (String, String) {
    let operand = match check {
        NumericCheck::MultipleOf(n)
        | NumericCheck::Minimum { bound: n, .. }
        | NumericCheck::Maximum { bound: n, .. } => n,
    };
    let integral = primitive.is_integer() && is_integral(operand);
    let (value, literal) = if integral {
        (format!("i128::from({copied})"), operand.to_string())
    } else if primitive.is_integer() {
        (format!("({copied} as f64)"), float_literal(operand))
    } else {
        (format!("f64::from({copied})"), float_literal(operand))
    };

    match check {
        NumericCheck::MultipleOf(_) if integral => (
            format!("{value} % {literal} != 0"),
            format!("must be a multiple of {operand}"),
        ),
        NumericCheck::MultipleOf(_) => (
            format!("({value} / {literal}).fract() != 0.0"),
            format!("must be a multiple of {operand}"),
        ),
        NumericCheck::Minimum { exclusive, .. } => {
            let (op, rule) = if *exclusive { ("<=", ">") } else { ("<", ">=") };
            (format!("{value} {op} {literal}"), format!("must be {rule} {operand}"))
        }
        NumericCheck::Maximum { exclusive, .. } => {
            let (op, rule) = if *exclusive { (">=", "<") } else { (">", "<=") };
            (format!("{value} {op} {literal}"), format!("must be {rule} {operand}"))
        }
    }
}

fn render_union(
    out: &mut Emitter,
    cx: &RenderContext<'_>,
    kind: UnionKind,
    branches: &[UnionBranch],
) {
    let errors = match kind {
        UnionKind::AnyOf => "any_of_errors",
        UnionKind::OneOf => "one_of_errors",
    };
    out.line(format!("let mut {errors}: Vec<String> = Vec::new();"));
    for branch in branches {
        out.open(format!(
            "let {} = match {}",
            branch.field,
            (cx.decode_branch)(&branch.ty)
        ));
        out.line("Ok(value) => Some(value),");
        out.open("Err(error) =>");
        out.line(format!("{errors}.push(error.to_string());"));
        out.line("None");
        out.close();
        out.close_with(";");
    }

    let keyword = kind.keyword();
    let all_failed = format!(
        "format!(\"no {keyword} branch of {} matched: {{}}\", {errors}.join(\"; \"))",
        cx.type_name
    );
    match kind {
        UnionKind::AnyOf => {
            let none: Vec<String> = branches
                .iter()
                .map(|branch| format!("{}.is_none()", branch.field))
                .collect();
            out.open(format!("if {}", none.join(" && ")));
            cx.fail(out, &all_failed);
            out.close();
        }
        UnionKind::OneOf => {
            let matched: Vec<String> = branches
                .iter()
                .map(|branch| format!("{}.is_some()", branch.field))
                .collect();
            out.line(format!(
                "let one_of_matches = [{}].into_iter().filter(|matched| *matched).count();",
                matched.join(", ")
            ));
            out.open("if one_of_matches == 0");
            cx.fail(out, &all_failed);
            out.close();
            out.open("if one_of_matches > 1");
            cx.fail(
                out,
                &format!(
                    "\"ambiguous {keyword} in {}: more than one branch matched\"",
                    cx.type_name
                ),
            );
            out.close();
        }
    }
}

fn render_enum(out: &mut Emitter, cx: &RenderContext<'_>, base: EnumBase) {
    let (accepted, listing) = match base {
        EnumBase::Any => (
            "Self::values().contains(&value)",
            "serde_json::Value::Array(Self::values())",
        ),
        _ => ("Self::VALUES.contains(&value)", "Self::VALUES"),
    };
    let error = cx.error(&format!(
        "format!(\"invalid value (expected one of {{:?}}): {{value:?}}\", {listing})"
    ));
    if base == EnumBase::Str {
        out.open("match Self::VALUES.iter().position(|candidate| *candidate == value)");
        out.line("Some(index) => Ok(Self::ALL[index]),");
        out.line(format!("None => Err({error}),"));
        out.close();
        return;
    }
    out.open(format!("if {accepted}"));
    out.line("Ok(Self(value))");
    out.outdent();
    out.open("} else");
    out.line(format!("Err({error})"));
    out.close();
}
