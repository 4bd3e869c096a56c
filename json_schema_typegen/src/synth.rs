//! Type synthesis: turning schema nodes into target types and declarations.
//!
//! Synthesis is a depth-first walk. Objects, enums and the roots of
//! documents and definitions become named declarations in their document's
//! output; everything else is rendered inline. References are followed
//! through the loader, and a reference back into a definition that is still
//! being built is broken with `Box`.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::rc::Rc;

use serde_json::{Number, Value};

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::emitter::escape_str;
use crate::error::JsonSchemaGenError;
use crate::json_pointer;
use crate::loader::Loader;
use crate::namer::{IdentifierNamer, variant_names};
use crate::output::{Allocation, NameAllocator, NodeKey, Output, OutputId, OutputRegistry, Scope};
use crate::schema::{self, Location, Schema, Shape, TypeName};
use crate::settings::GenerateSettings;
use crate::types::{
    DeclShape, EnumBase, EnumType, Field, FieldRole, Primitive, StructType, Type, UnionKind,
    float_literal,
};
use crate::validator::{self, Validator};

/// A definition (or document root) currently being synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TargetKey {
    schema_id: String,
    definition: Option<String>,
}

/// The document a node belongs to and the output its declarations go to.
#[derive(Clone)]
struct Context {
    schema: Rc<Schema>,
    output: OutputId,
}

/// State of one generation run.
pub(crate) struct Synthesizer {
    pub(crate) loader: Box<dyn Loader>,
    pub(crate) registry: OutputRegistry,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) settings: GenerateSettings,
    pub(crate) namer: Box<dyn IdentifierNamer>,
    allocator: NameAllocator,
    in_progress: HashSet<TargetKey>,
    /// Every document synthesized from. Node keys are addresses, so each
    /// document must outlive the declarations built from it.
    documents: Vec<Rc<Schema>>,
}

impl Synthesizer {
    pub(crate) fn new(
        settings: GenerateSettings,
        loader: Box<dyn Loader>,
        namer: Box<dyn IdentifierNamer>,
    ) -> Self {
        Self {
            loader,
            registry: OutputRegistry::default(),
            diagnostics: Diagnostics::default(),
            allocator: NameAllocator {
                minimal: settings.minimal_names,
            },
            settings,
            namer,
            in_progress: HashSet::new(),
            documents: Vec::new(),
        }
    }

    fn retain(&mut self, schema: &Rc<Schema>) {
        if !self.documents.iter().any(|kept| Rc::ptr_eq(kept, schema)) {
            self.documents.push(Rc::clone(schema));
        }
    }

    /// Forgets in-progress markers left behind by a failed file.
    pub(crate) fn reset_in_progress(&mut self) {
        self.in_progress.clear();
    }

    /// Generates an entry document. A root node that is only a container of
    /// definitions (no type, properties, enum, `$ref` or composition)
    /// generates every definition in name order; otherwise the
    /// root node is generated under the root type name. Returns the output
    /// the document's declarations went to.
    pub(crate) fn generate_document(
        &mut self,
        schema: &Rc<Schema>,
    ) -> Result<OutputId, JsonSchemaGenError> {
        self.retain(schema);
        let output = self.registry.output_for(&schema.identity(), &self.settings)?;
        let cx = Context {
            schema: Rc::clone(schema),
            output,
        };
        let root = &schema.root;
        let definitions: Vec<String> = schema
            .definitions()
            .map(|defs| defs.keys().cloned().collect())
            .unwrap_or_default();

        if root.shape() == Shape::Untyped && !definitions.is_empty() {
            tracing::debug!(schema = %schema.identity(), count = definitions.len(), "generating definitions");
            for name in &definitions {
                self.synthesize_target(&cx, Some(name))?;
            }
        } else {
            tracing::debug!(schema = %schema.identity(), "generating root");
            self.synthesize_target(&cx, None)?;
        }
        Ok(output)
    }

    /// Root type name: mapping override, else title when enabled, else the
    /// document's file stem.
    fn root_type_name(&self, schema: &Schema) -> String {
        if let Some(root_type) = self
            .settings
            .mapping_for(&schema.identity())
            .and_then(|mapping| mapping.root_type.clone())
        {
            return root_type;
        }
        if self.settings.struct_name_from_title
            && let Some(title) = schema.root.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
        {
            return title.to_string();
        }
        let name = match &schema.location {
            Location::File(path) => path.to_string_lossy().into_owned(),
            Location::Url(url) | Location::Memory(url) => url.clone(),
        };
        let last = name.rsplit(['/', '\\']).next().unwrap_or(&name);
        Path::new(last)
            .file_stem()
            .map_or_else(|| last.to_string(), |stem| stem.to_string_lossy().into_owned())
    }

    /// Synthesizes a definition (or the document root) with cycle detection.
    fn synthesize_target(
        &mut self,
        cx: &Context,
        definition: Option<&str>,
    ) -> Result<Type, JsonSchemaGenError> {
        let schema = Rc::clone(&cx.schema);
        let (node, scope) = match definition {
            Some(name) => (
                schema
                    .definition(name)
                    .ok_or_else(|| JsonSchemaGenError::DefinitionNotFound {
                        name: name.to_string(),
                        schema: schema.identity(),
                    })?,
                Scope::root(name),
            ),
            None => (&schema.root, Scope::root(self.root_type_name(&schema))),
        };

        let key = TargetKey {
            schema_id: schema.identity(),
            definition: definition.map(str::to_string),
        };
        if self.in_progress.contains(&key) {
            let keyword = if schema.definitions.is_some() {
                "$defs"
            } else {
                "definitions"
            };
            let pointer = definition.map_or_else(String::new, |name| {
                json_pointer::definition(keyword, name)
            });
            return Ok(self.break_cycle(cx, node, &format!("{}#{pointer}", key.schema_id)));
        }

        // A definition with nothing to declare stays untyped.
        if definition.is_some() && node.shape() == Shape::Untyped {
            return Ok(Type::Any);
        }

        self.in_progress.insert(key.clone());
        let result = self.synthesize_declared(cx, node, &scope);
        self.in_progress.remove(&key);
        result
    }

    /// A reference back into `target` while it is being synthesized.
    fn break_cycle(&mut self, cx: &Context, node: &schema::Type, target: &str) -> Type {
        let output = self.registry.get(cx.output);
        match output.lookup_node(NodeKey::of(node)) {
            Some(id) => {
                let name = output.decl(id).name.clone();
                self.diagnostics.warn(
                    WarningKind::ReferenceCycle,
                    format!("reference cycle through {target}; {name} is boxed"),
                );
                Type::Boxed(Box::new(Type::named(name)))
            }
            None => {
                self.diagnostics.warn(
                    WarningKind::ReferenceCycle,
                    format!(
                        "reference cycle through {target} never reaches a declaration; using serde_json::Value"
                    ),
                );
                Type::Any
            }
        }
    }

    /// Synthesizes `node` as a named declaration in the context's output,
    /// reusing an existing declaration for the same node or a structurally
    /// equal one under the same name.
    fn synthesize_declared(
        &mut self,
        cx: &Context,
        node: &schema::Type,
        scope: &Scope,
    ) -> Result<Type, JsonSchemaGenError> {
        let key = NodeKey::of(node);
        if let Some(id) = self.registry.get(cx.output).lookup_node(key) {
            return Ok(Type::named(self.registry.get(cx.output).decl(id).name.clone()));
        }
        if let Shape::Reference(reference) = node.shape() {
            return self.synthesize_reference(cx, reference);
        }

        let title = node
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| self.settings.struct_name_from_title && !title.is_empty());
        let scope = title.map_or_else(|| scope.clone(), Scope::root);
        let candidates = match node.rust.as_ref().and_then(|r| r.identifier.clone()) {
            Some(identifier) => vec![identifier],
            None => self.allocator.candidates(self.namer.as_ref(), &scope),
        };

        let output = self.registry.get(cx.output);
        let name = match self
            .allocator
            .allocate(output, &candidates, node, &mut self.diagnostics)
        {
            Allocation::Reuse(id) => {
                let name = output.decl(id).name.clone();
                tracing::debug!(%name, "reusing structurally equal declaration");
                self.registry.get_mut(cx.output).alias_node(key, id);
                return Ok(Type::named(name));
            }
            Allocation::Fresh(name) => name,
        };

        let id = self.registry.get_mut(cx.output).declare(&name, node, key);
        let (shape, validators) = self.synthesize_shape(cx, node, &scope, &name)?;
        self.registry.get_mut(cx.output).complete(id, shape, validators);
        Ok(Type::named(name))
    }

    fn synthesize_shape(
        &mut self,
        cx: &Context,
        node: &schema::Type,
        scope: &Scope,
        decl_name: &str,
    ) -> Result<(DeclShape, Vec<Validator>), JsonSchemaGenError> {
        match node.shape() {
            Shape::Enum(values) => self.synthesize_enum(node, values, scope),
            Shape::Single("object") | Shape::Nullable("object") => {
                self.synthesize_object(cx, node, scope, decl_name)
            }
            _ => Ok((DeclShape::Alias(self.synthesize_type(cx, node, scope)?), Vec::new())),
        }
    }

    /// Synthesizes the type of a node in a use position (a property, an item,
    /// a map value). Only objects, enums and references produce declarations.
    fn synthesize_type(
        &mut self,
        cx: &Context,
        node: &schema::Type,
        scope: &Scope,
    ) -> Result<Type, JsonSchemaGenError> {
        match node.shape() {
            Shape::Custom(path) => {
                if let Some(rust) = &node.rust {
                    let output = self.registry.get_mut(cx.output);
                    for import in &rust.imports {
                        output.add_import(import.clone());
                    }
                }
                Ok(Type::Custom(path.to_string()))
            }
            Shape::Enum(_) => self.synthesize_declared(cx, node, scope),
            Shape::Reference(reference) => self.synthesize_reference(cx, reference),
            Shape::Untyped => Ok(Type::Any),
            Shape::Nullable(name) => Ok(self.synthesize_single(cx, node, name, scope)?.optional()),
            Shape::Union(names) => {
                self.diagnostics.warn(
                    WarningKind::MultiTypeUnion,
                    format!(
                        "{} has several types {names:?}; using serde_json::Value without validation",
                        scope.path()
                    ),
                );
                Ok(Type::Any)
            }
            Shape::Single(name) => self.synthesize_single(cx, node, name, scope),
        }
    }

    fn synthesize_single(
        &mut self,
        cx: &Context,
        node: &schema::Type,
        name: &str,
        scope: &Scope,
    ) -> Result<Type, JsonSchemaGenError> {
        let type_name = TypeName::parse(name).ok_or_else(|| JsonSchemaGenError::UnknownTypeName {
            location: scope.path(),
            name: name.to_string(),
        })?;
        Ok(match type_name {
            TypeName::Object if is_struct_like(node) => self.synthesize_declared(cx, node, scope)?,
            TypeName::Object => self.synthesize_map(cx, node, scope)?,
            TypeName::Array => {
                let items = node.items.as_deref().ok_or_else(|| {
                    JsonSchemaGenError::ArrayWithoutItems {
                        location: scope.path(),
                    }
                })?;
                Type::Array(Box::new(self.synthesize_type(cx, items, &scope.child("Elem"))?))
            }
            TypeName::String if is_uuid_format(node.format.as_deref()) => {
                Type::Custom("uuid::Uuid".to_string())
            }
            TypeName::String => Type::Primitive(Primitive::String),
            TypeName::Integer => Type::Primitive(choose_integer_type(node)),
            TypeName::Number => Type::Primitive(choose_number_type(node)),
            TypeName::Boolean => Type::Primitive(Primitive::Bool),
            TypeName::Null => Type::Null,
        })
    }

    /// An object without properties: a string-keyed map.
    fn synthesize_map(
        &mut self,
        cx: &Context,
        node: &schema::Type,
        scope: &Scope,
    ) -> Result<Type, JsonSchemaGenError> {
        if !node.required.is_empty() {
            self.diagnostics.warn(
                WarningKind::RequiredWithoutProperties,
                format!(
                    "{} lists required keys {:?} but has no properties; not checked",
                    scope.path(),
                    node.required
                ),
            );
        }
        let value = match node.additional_properties.as_deref() {
            Some(additional) => self.synthesize_additional(cx, additional, &scope.child("Value"))?,
            None => Type::Any,
        };
        Ok(Type::Map(Box::new(value)))
    }

    fn synthesize_additional(
        &mut self,
        cx: &Context,
        additional: &schema::Type,
        scope: &Scope,
    ) -> Result<Type, JsonSchemaGenError> {
        if let Shape::Union(names) = additional.shape() {
            return Err(JsonSchemaGenError::AdditionalPropertiesMultipleTypes {
                location: scope.path(),
                types: names.to_vec(),
            });
        }
        self.synthesize_type(cx, additional, scope)
    }

    fn synthesize_object(
        &mut self,
        cx: &Context,
        node: &schema::Type,
        scope: &Scope,
        decl_name: &str,
    ) -> Result<(DeclShape, Vec<Validator>), JsonSchemaGenError> {
        if !is_struct_like(node) {
            return Ok((DeclShape::Alias(self.synthesize_map(cx, node, scope)?), Vec::new()));
        }

        let mut fields: Vec<Field> = Vec::new();
        let mut used: HashSet<String> = HashSet::new();

        for (key, property) in &node.properties {
            let ty = self.synthesize_type(cx, property, &scope.child(key.as_str()))?;
            let base = self.namer.field_name(key);
            let name = self.unique_field_name(&mut used, base, decl_name, key);
            let forced_optional = property.rust.as_ref().is_some_and(|r| r.optional);
            let default = self.default_literal(cx, property, &ty, decl_name, key);
            let required = node.required.contains(key);
            let ty = if forced_optional || !(required || default.is_some()) {
                ty.optional()
            } else {
                ty
            };
            fields.push(Field {
                name,
                json_key: key.clone(),
                ty,
                doc: property.doc(),
                role: FieldRole::Property {
                    required: required && default.is_none(),
                },
                default,
            });
        }

        let rejects_objects =
            self.synthesize_compositions(cx, node, scope, decl_name, &mut used, &mut fields)?;
        // A member that can never decode an object makes a struct the wrong
        // shape for a node that did not declare `"type": "object"`.
        if rejects_objects && node.type_names.is_empty() && node.properties.is_empty() {
            self.diagnostics.warn(
                WarningKind::UntypedComposition,
                format!(
                    "{} combines members that are not objects; using serde_json::Value without validation",
                    scope.path()
                ),
            );
            return Ok((DeclShape::Alias(Type::Any), Vec::new()));
        }

        let mut deny_unknown_fields = false;
        match node.additional_properties.as_deref() {
            None => {}
            Some(additional) if additional.is_never() => deny_unknown_fields = true,
            Some(additional) => {
                let value = self.synthesize_additional(cx, additional, &scope.child("Value"))?;
                let name = self.unique_field_name(
                    &mut used,
                    "additional_properties".to_string(),
                    decl_name,
                    "additionalProperties",
                );
                fields.push(Field {
                    name,
                    json_key: String::new(),
                    ty: Type::Map(Box::new(value)),
                    doc: None,
                    role: FieldRole::Catchall,
                    default: None,
                });
            }
        }

        let validators = validator::for_struct(decl_name, node, &fields)?;
        Ok((
            DeclShape::Struct(StructType {
                fields,
                deny_unknown_fields,
            }),
            validators,
        ))
    }

    /// Adds a field for every `allOf` member and `anyOf`/`oneOf` branch that
    /// names an object declaration, skipping the rest with a warning.
    /// Returns whether a skipped member can never decode an object.
    fn synthesize_compositions(
        &mut self,
        cx: &Context,
        node: &schema::Type,
        scope: &Scope,
        decl_name: &str,
        used: &mut HashSet<String>,
        fields: &mut Vec<Field>,
    ) -> Result<bool, JsonSchemaGenError> {
        let mut rejects_objects = false;
        for (kind, members, segment, prefix) in [
            (None, &node.all_of, "AllOf", "all_of"),
            (Some(UnionKind::AnyOf), &node.any_of, "AnyOf", "any_of"),
            (Some(UnionKind::OneOf), &node.one_of, "OneOf", "one_of"),
        ] {
            let keyword = kind.map_or("allOf", UnionKind::keyword);
            for (index, member) in members.iter().enumerate() {
                let ty = self.synthesize_type(cx, member, &scope.child(format!("{segment}{index}")))?;
                if !self.is_composable(cx, &ty) {
                    rejects_objects |= !self.admits_object(cx, &ty);
                    self.skip_composition(scope, keyword, index, &ty);
                    continue;
                }
                let name = self.unique_field_name(used, format!("{prefix}_{index}"), decl_name, keyword);
                let (ty, role) = match kind {
                    None => (ty, FieldRole::Embedded),
                    Some(kind) => (ty.optional(), FieldRole::Branch(kind)),
                };
                fields.push(Field {
                    name,
                    json_key: String::new(),
                    ty,
                    doc: member.doc(),
                    role,
                    default: None,
                });
            }
        }
        Ok(rejects_objects)
    }

    /// Whether a composition member can be flattened into a struct: it must
    /// name a declaration that is not a plain alias.
    fn is_composable(&self, cx: &Context, ty: &Type) -> bool {
        let Some(named) = ty.as_named() else {
            return false;
        };
        named.module_path.is_some()
            || !matches!(
                self.registry.get(cx.output).shape_of(&named.name),
                Some(DeclShape::Alias(_))
            )
    }

    /// Whether a value of `ty` can be a JSON object.
    fn admits_object(&self, cx: &Context, ty: &Type) -> bool {
        match ty {
            Type::Any | Type::Map(_) | Type::Custom(_) => true,
            Type::Optional(inner) | Type::Boxed(inner) => self.admits_object(cx, inner),
            Type::Named(named) if named.module_path.is_none() => {
                match self.registry.get(cx.output).shape_of(&named.name) {
                    Some(DeclShape::Alias(inner)) => self.admits_object(cx, inner),
                    Some(DeclShape::Enum(_)) => false,
                    Some(DeclShape::Struct(_)) | None => true,
                }
            }
            Type::Named(_) => true,
            Type::Primitive(_) | Type::Null | Type::Array(_) => false,
        }
    }

    fn skip_composition(&mut self, scope: &Scope, keyword: &str, index: usize, ty: &Type) {
        self.diagnostics.warn(
            WarningKind::IgnoredComposition,
            format!(
                "{}: {keyword}[{index}] is {}, not an object declaration; skipped",
                scope.path(),
                ty.render()
            ),
        );
    }

    fn unique_field_name(
        &mut self,
        used: &mut HashSet<String>,
        base: String,
        decl_name: &str,
        key: &str,
    ) -> String {
        if used.insert(base.clone()) {
            return base;
        }
        let stem = base.strip_prefix("r#").unwrap_or(&base).to_string();
        let mut suffix = 1usize;
        loop {
            let candidate = format!("{stem}_{suffix}");
            if used.insert(candidate.clone()) {
                self.diagnostics.warn(
                    WarningKind::FieldNameCollision,
                    format!("{decl_name}: field for {key:?} renamed to {candidate} to avoid {base}"),
                );
                return candidate;
            }
            suffix += 1;
        }
    }

    fn synthesize_enum(
        &mut self,
        node: &schema::Type,
        values: &[Value],
        scope: &Scope,
    ) -> Result<(DeclShape, Vec<Validator>), JsonSchemaGenError> {
        let mut unique: Vec<Value> = Vec::new();
        for value in values {
            if value.is_array() || value.is_object() {
                return Err(JsonSchemaGenError::EnumNonPrimitive {
                    location: scope.path(),
                    value: value.to_string(),
                });
            }
            if !unique.contains(value) {
                unique.push(value.clone());
            }
        }

        let declared_number = node.type_names.iter().any(|name| name == "number");
        let base = if unique.is_empty() {
            EnumBase::Any
        } else if unique.iter().all(Value::is_string) {
            EnumBase::Str
        } else if unique.iter().all(Value::is_boolean) {
            EnumBase::Bool
        } else if unique.iter().all(Value::is_i64) && !declared_number {
            EnumBase::Int
        } else if unique.iter().all(Value::is_number) {
            EnumBase::Float
        } else {
            EnumBase::Any
        };
        if base == EnumBase::Any {
            self.diagnostics.warn(
                WarningKind::WrappedEnum,
                format!(
                    "enum at {} mixes literal kinds or contains null; wrapping serde_json::Value",
                    scope.path()
                ),
            );
        }

        let variants = if base == EnumBase::Str {
            let literals: Vec<String> = unique
                .iter()
                .filter_map(|value| value.as_str().map(str::to_string))
                .collect();
            variant_names(self.namer.as_ref(), &literals)
        } else {
            Vec::new()
        };

        Ok((
            DeclShape::Enum(EnumType {
                base,
                values: unique,
                variants,
            }),
            vec![Validator::Enum(base)],
        ))
    }

    /// Follows a `$ref`. The fragment must be empty (the document root) or
    /// name a definition under `definitions` or `$defs`.
    fn synthesize_reference(
        &mut self,
        cx: &Context,
        reference: &str,
    ) -> Result<Type, JsonSchemaGenError> {
        let parent = cx.schema.location.to_string();
        self.resolve_reference(cx, reference)
            .map_err(|e| e.in_reference(reference, &parent))
    }

    fn resolve_reference(
        &mut self,
        cx: &Context,
        reference: &str,
    ) -> Result<Type, JsonSchemaGenError> {
        let (document, fragment) = reference.split_once('#').unwrap_or((reference, ""));
        let target_schema = if document.is_empty() {
            Rc::clone(&cx.schema)
        } else {
            self.loader.load(document, Some(&cx.schema.location))?
        };
        self.retain(&target_schema);
        let target = Context {
            output: self
                .registry
                .output_for(&target_schema.identity(), &self.settings)?,
            schema: target_schema,
        };

        let unsupported = || JsonSchemaGenError::UnsupportedReference {
            reference: reference.to_string(),
        };
        let segments = json_pointer::segments(fragment).ok_or_else(unsupported)?;
        let ty = match segments.as_slice() {
            [] => self.synthesize_target(&target, None)?,
            [keyword, name] if keyword == "definitions" || keyword == "$defs" => {
                self.synthesize_target(&target, Some(name))?
            }
            _ => return Err(unsupported()),
        };
        Ok(self.qualify(cx.output, target.output, ty))
    }

    /// Rewrites named types synthesized in `to` for use from `from`,
    /// registering the imports `from` needs.
    fn qualify(&mut self, from: OutputId, to: OutputId, mut ty: Type) -> Type {
        if from == to {
            return ty;
        }
        let from_path = self.registry.get(from).module_path.clone();
        let to_path = self.registry.get(to).module_path.clone();
        let mut imports: BTreeSet<String> = BTreeSet::new();
        for named in ty.named_types_mut() {
            let path = named.module_path.get_or_insert_with(|| to_path.clone());
            if *path == from_path {
                named.module_path = None;
            } else {
                imports.insert(path.clone());
            }
        }
        let output = self.registry.get_mut(from);
        for import in imports {
            output.add_import(import);
        }
        ty
    }

    /// The Rust expression for a property's default, of the type inside
    /// `Option`. Defaults that cannot be expressed are dropped with a warning.
    fn default_literal(
        &mut self,
        cx: &Context,
        property: &schema::Type,
        ty: &Type,
        decl_name: &str,
        key: &str,
    ) -> Option<String> {
        let value = property.default.value()?;
        if value.is_null() && ty.is_optional() {
            return None;
        }
        let literal = literal(self.registry.get(cx.output), value, ty.without_optional());
        if literal.is_none() {
            self.diagnostics.warn(
                WarningKind::UnsupportedDefault,
                format!(
                    "{decl_name}.{key}: default {value} cannot be expressed as {}; ignored",
                    ty.render()
                ),
            );
        }
        literal
    }
}

/// An object node with something to declare: properties, compositions, or
/// `additionalProperties: false`.
fn is_struct_like(node: &schema::Type) -> bool {
    node.has_object_content()
        || node
            .additional_properties
            .as_deref()
            .is_some_and(schema::Type::is_never)
}

/// Matches "uuid" and versioned spellings such as "uuid4".
fn is_uuid_format(format: Option<&str>) -> bool {
    format.is_some_and(|f| {
        f.strip_prefix("uuid")
            .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_digit()))
    })
}

/// The smallest integer type that holds both `minimum` and `maximum`.
/// Falls back to `i64` when either is absent, non-integral, or they are
/// inverted.
pub(crate) fn choose_integer_type(node: &schema::Type) -> Primitive {
    let min = node.minimum.as_ref().and_then(Number::as_i64);
    let max = node.maximum.as_ref().and_then(Number::as_i64);
    let (Some(min), Some(max)) = (min, max) else {
        return Primitive::I64;
    };
    if min > max {
        return Primitive::I64;
    }
    if min >= 0 {
        if max <= 255 {
            Primitive::U8
        } else if max <= 65_535 {
            Primitive::U16
        } else if max <= 4_294_967_295 {
            Primitive::U32
        } else {
            Primitive::U64
        }
    } else if min >= -128 && max <= 127 {
        Primitive::I8
    } else if min >= -32_768 && max <= 32_767 {
        Primitive::I16
    } else if min >= -2_147_483_648 && max <= 2_147_483_647 {
        Primitive::I32
    } else {
        Primitive::I64
    }
}

/// `f32` only when both bounds are present and within its range.
pub(crate) fn choose_number_type(node: &schema::Type) -> Primitive {
    const F32_MIN: f64 = -3.402_823_5e38;
    const F32_MAX: f64 = 3.402_823_5e38;
    let min = node.minimum.as_ref().and_then(Number::as_f64);
    let max = node.maximum.as_ref().and_then(Number::as_f64);
    match (min, max) {
        (Some(min), Some(max)) if min >= F32_MIN && max <= F32_MAX => Primitive::F32,
        _ => Primitive::F64,
    }
}

/// Renders `value` as a Rust expression of type `ty`, if it can be.
fn literal(output: &Output, value: &Value, ty: &Type) -> Option<String> {
    match (ty, value) {
        (Type::Primitive(Primitive::String), Value::String(s)) => {
            Some(format!("\"{}\".to_string()", escape_str(s)))
        }
        (Type::Primitive(Primitive::Bool), Value::Bool(b)) => Some(b.to_string()),
        (Type::Primitive(p), Value::Number(n)) if p.is_integer() && p.holds(n) => Some(n.to_string()),
        (Type::Primitive(p), Value::Number(n)) if p.is_float() => Some(float_literal(n)),
        (Type::Any, v) => Some(format!("serde_json::json!({v})")),
        (Type::Array(inner), Value::Array(items)) => items
            .iter()
            .map(|item| literal(output, item, inner))
            .collect::<Option<Vec<String>>>()
            .map(|items| format!("vec![{}]", items.join(", "))),
        (Type::Map(_), Value::Object(object)) if object.is_empty() => {
            Some("std::collections::BTreeMap::new()".to_string())
        }
        (Type::Optional(_) | Type::Null, Value::Null) => Some("None".to_string()),
        (Type::Optional(inner), v) => literal(output, v, inner).map(|l| format!("Some({l})")),
        (Type::Boxed(inner), v) => literal(output, v, inner).map(|l| format!("Box::new({l})")),
        (Type::Named(named), v) if named.module_path.is_none() => {
            match output.shape_of(&named.name)? {
                DeclShape::Enum(en) => enum_literal(&named.name, en, v),
                DeclShape::Alias(inner) => literal(output, v, inner),
                DeclShape::Struct(_) => None,
            }
        }
        _ => None,
    }
}

fn enum_literal(name: &str, en: &EnumType, value: &Value) -> Option<String> {
    if !en.values.contains(value) {
        return None;
    }
    match en.base {
        EnumBase::Str => en
            .variant_for(value.as_str()?)
            .map(|variant| format!("{name}::{variant}")),
        _ => Some(format!("{name}({})", en.literal(value))),
    }
}
