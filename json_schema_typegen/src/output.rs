//! Output modules, the registry that maps schemas onto them, and the name
//! allocator that keeps declaration names unique within one module.

use std::collections::{BTreeSet, HashMap};

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::error::JsonSchemaGenError;
use crate::namer::{IdentifierNamer, scope_name};
use crate::schema;
use crate::settings::GenerateSettings;
use crate::types::{DeclShape, TypeDecl, module_qualifier};
use crate::validator::Validator;

pub type DeclId = usize;
pub type OutputId = usize;

/// Identity of a schema node, by address. Documents are held in `Rc`s for
/// the whole session, so node addresses are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey(usize);

impl NodeKey {
    #[must_use]
    pub fn of(node: &schema::Type) -> Self {
        Self(std::ptr::from_ref(node).addr())
    }
}

/// One generated module: its declarations, indexed by name and by the schema
/// node they came from, plus the imports it needs.
#[derive(Debug, Clone)]
pub struct Output {
    pub module_path: String,
    pub file_name: String,
    decls: Vec<TypeDecl>,
    by_name: HashMap<String, DeclId>,
    by_node: HashMap<NodeKey, DeclId>,
    imports: BTreeSet<String>,
}

impl Output {
    #[must_use]
    pub fn new(module_path: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            module_path: module_path.into(),
            file_name: file_name.into(),
            decls: Vec::new(),
            by_name: HashMap::new(),
            by_node: HashMap::new(),
            imports: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn decl(&self, id: DeclId) -> &TypeDecl {
        &self.decls[id]
    }

    pub fn decls(&self) -> impl Iterator<Item = &TypeDecl> {
        self.decls.iter()
    }

    #[must_use]
    pub fn lookup_name(&self, name: &str) -> Option<DeclId> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn lookup_node(&self, key: NodeKey) -> Option<DeclId> {
        self.by_node.get(&key).copied()
    }

    /// The declaration called `name`, if it exists and its shape is known.
    #[must_use]
    pub fn shape_of(&self, name: &str) -> Option<&DeclShape> {
        self.lookup_name(name)
            .and_then(|id| self.decls[id].shape.as_ref())
    }

    /// Registers a declaration with no shape yet, so references reached while
    /// its shape is synthesized find it.
    pub fn declare(&mut self, name: &str, origin: &schema::Type, key: NodeKey) -> DeclId {
        let id = self.decls.len();
        self.decls.push(TypeDecl {
            name: name.to_string(),
            doc: origin.doc(),
            shape: None,
            origin: origin.clone(),
            validators: Vec::new(),
        });
        self.by_name.insert(name.to_string(), id);
        self.by_node.insert(key, id);
        id
    }

    /// Points another node at an existing declaration.
    pub fn alias_node(&mut self, key: NodeKey, id: DeclId) {
        self.by_node.insert(key, id);
    }

    pub fn complete(&mut self, id: DeclId, shape: DeclShape, validators: Vec<Validator>) {
        let decl = &mut self.decls[id];
        debug_assert!(decl.shape.is_none(), "shape of {} set twice", decl.name);
        decl.shape = Some(shape);
        decl.validators = validators;
    }

    pub fn add_import(&mut self, path: impl Into<String>) {
        self.imports.insert(path.into());
    }

    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }
}

/// Every output of a session, keyed by schema identity and by file.
#[derive(Debug, Clone, Default)]
pub struct OutputRegistry {
    outputs: Vec<Output>,
    by_schema: HashMap<String, OutputId>,
    by_file: HashMap<String, OutputId>,
}

impl OutputRegistry {
    /// The output a schema's declarations go to, created on first use.
    ///
    /// # Errors
    ///
    /// Returns `NoModuleMapping` when neither a mapping nor a default module
    /// applies, and `ConflictingOutput` when the file is already claimed by a
    /// different module.
    pub fn output_for(
        &mut self,
        schema_id: &str,
        settings: &GenerateSettings,
    ) -> Result<OutputId, JsonSchemaGenError> {
        if let Some(&id) = self.by_schema.get(schema_id) {
            return Ok(id);
        }

        let mapping = settings.mapping_for(schema_id);
        let module_path = mapping
            .and_then(|m| m.module_path.clone())
            .or_else(|| settings.default_module.clone())
            .ok_or_else(|| JsonSchemaGenError::NoModuleMapping {
                schema_id: schema_id.to_string(),
            })?;
        let is_default = mapping.is_none_or(|m| m.module_path.is_none());
        let file_name = mapping
            .and_then(|m| m.output_name.clone())
            .or_else(|| {
                if is_default {
                    settings.default_output.clone()
                } else {
                    None
                }
            })
            .unwrap_or_else(|| format!("{}.rs", module_qualifier(&module_path)));

        let id = match self.by_file.get(&file_name) {
            Some(&existing) if self.outputs[existing].module_path == module_path => existing,
            Some(&existing) => {
                return Err(JsonSchemaGenError::ConflictingOutput {
                    output: file_name,
                    first: self.outputs[existing].module_path.clone(),
                    second: module_path,
                });
            }
            None => {
                tracing::debug!(%schema_id, %module_path, %file_name, "new output");
                self.outputs.push(Output::new(module_path, file_name.clone()));
                let id = self.outputs.len() - 1;
                self.by_file.insert(file_name, id);
                id
            }
        };
        self.by_schema.insert(schema_id.to_string(), id);
        Ok(id)
    }

    #[must_use]
    pub fn get(&self, id: OutputId) -> &Output {
        &self.outputs[id]
    }

    pub fn get_mut(&mut self, id: OutputId) -> &mut Output {
        &mut self.outputs[id]
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter()
    }
}

/// Naming context: the path of property keys, definition names and
/// structural markers (`Elem`, `Value`, `AllOf0`) leading to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope(Vec<String>);

impl Scope {
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Dotted form, for error locations.
    #[must_use]
    pub fn path(&self) -> String {
        self.0.join(".")
    }
}

/// Result of asking for a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    /// A structurally equal declaration already has the name.
    Reuse(DeclId),
    Fresh(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NameAllocator {
    /// Try the narrowest suffix of the scope first.
    pub minimal: bool,
}

impl NameAllocator {
    /// Candidate names for a scope, most preferred first. The last candidate
    /// is always the full scope.
    #[must_use]
    pub fn candidates(&self, namer: &dyn IdentifierNamer, scope: &Scope) -> Vec<String> {
        let segments = scope.segments();
        if !self.minimal {
            return vec![scope_name(namer, segments)];
        }
        let mut names: Vec<String> = Vec::new();
        for start in (0..segments.len()).rev() {
            let name = scope_name(namer, &segments[start..]);
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Picks a name for `origin` among `candidates`. A taken name is reused
    /// when its declaration is structurally equal to `origin`; otherwise the
    /// next candidate is tried and finally the last one gets a numeric suffix.
    pub fn allocate(
        &self,
        output: &Output,
        candidates: &[String],
        origin: &schema::Type,
        diagnostics: &mut Diagnostics,
    ) -> Allocation {
        for name in candidates {
            match output.lookup_name(name) {
                None => return Allocation::Fresh(name.clone()),
                Some(id) if output.decl(id).origin.structurally_equal(origin) => {
                    return Allocation::Reuse(id);
                }
                Some(_) => {}
            }
        }

        let base = candidates.last().map_or("Type", String::as_str);
        let mut suffix = 1usize;
        loop {
            let name = format!("{base}_{suffix}");
            match output.lookup_name(&name) {
                None => {
                    diagnostics.warn(
                        WarningKind::NameCollision,
                        format!(
                            "{base} in {} names a different type; using {name}",
                            output.module_path
                        ),
                    );
                    return Allocation::Fresh(name);
                }
                Some(id) if output.decl(id).origin.structurally_equal(origin) => {
                    return Allocation::Reuse(id);
                }
                Some(_) => suffix += 1,
            }
        }
    }
}
