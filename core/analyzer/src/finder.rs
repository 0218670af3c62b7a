//! Pass 1: the table of every declared type.
//!
//! [`TypeTable::build`] walks the merged package list in order and records
//! each struct, class and enum under its qualified name `package.Name`. The
//! walk reads the AST only; the finished table is handed by reference to the
//! static analyzer and never changes afterwards.
//!
//! Redeclarations are reported at the later declaration, so the error is the
//! same for every run over the same input.

use rustc_hash::FxHashMap;
use sdl_ast::nodes::{DefinitionId, EnumDef, Location, PackageDef, StructDef};
use sdl_ast::visitor::{Accept, Visitor, walk_package_def};

use crate::errors::{AnalysisError, DefinitionKind};

#[derive(Debug, Default, Clone)]
pub struct TypeTable {
    packages: FxHashMap<String, usize>,
    types: FxHashMap<String, DefinitionId>,
}

impl TypeTable {
    /// Registers every package and type of `packages`.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::DuplicatePackage`] if two packages share a name and
    /// [`AnalysisError::DuplicateType`] if two types share a qualified name.
    #[tracing::instrument(level = "debug", skip_all, fields(packages = packages.len()))]
    pub fn build(packages: &[PackageDef]) -> Result<Self, AnalysisError> {
        let mut finder = TypeFinder::default();
        for (index, package) in packages.iter().enumerate() {
            finder.package = index;
            finder.package_name.clone_from(&package.name);
            finder.element = 0;
            package.accept(&mut finder)?;
        }
        tracing::debug!(types = finder.table.types.len(), "type table built");
        Ok(finder.table)
    }

    /// Resolves a type reference written inside `context_package`.
    ///
    /// A name without `.` is looked up as `context_package.name`; a dotted
    /// name is taken as already qualified.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::UnknownType`] carrying the qualified name and
    /// `location`.
    pub fn find_type(
        &self,
        name: &str,
        context_package: &str,
        location: &Location,
    ) -> Result<DefinitionId, AnalysisError> {
        let full_name = if name.contains('.') {
            name.to_string()
        } else {
            format!("{context_package}.{name}")
        };
        match self.types.get(&full_name) {
            Some(id) => Ok(*id),
            None => Err(AnalysisError::UnknownType {
                name: full_name,
                location: location.clone(),
            }),
        }
    }

    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<DefinitionId> {
        self.types.get(qualified_name).copied()
    }

    #[must_use]
    pub fn package_index(&self, package_name: &str) -> Option<usize> {
        self.packages.get(package_name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Qualified names with their ids, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DefinitionId)> {
        self.types.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

#[derive(Default)]
struct TypeFinder {
    table: TypeTable,
    package: usize,
    package_name: String,
    element: usize,
}

impl TypeFinder {
    fn register(
        &mut self,
        name: &str,
        kind: DefinitionKind,
        location: &Location,
    ) -> Result<(), AnalysisError> {
        let full_name = format!("{}.{name}", self.package_name);
        if self.table.types.contains_key(&full_name) {
            return Err(AnalysisError::DuplicateType {
                kind,
                name: full_name,
                location: location.clone(),
            });
        }
        tracing::trace!(name = %full_name, "type registered");
        self.table
            .types
            .insert(full_name, DefinitionId::new(self.package, self.element));
        self.element += 1;
        Ok(())
    }
}

impl Visitor for TypeFinder {
    type Error = AnalysisError;

    fn visit_package_def(&mut self, node: &PackageDef) -> Result<(), AnalysisError> {
        if self.table.packages.contains_key(&node.name) {
            return Err(AnalysisError::DuplicatePackage {
                name: node.name.clone(),
                location: node.location.clone(),
            });
        }
        self.table.packages.insert(node.name.clone(), self.package);
        walk_package_def(self, node)
    }

    fn visit_struct_def(&mut self, node: &StructDef) -> Result<(), AnalysisError> {
        let kind = if node.is_class {
            DefinitionKind::Class
        } else {
            DefinitionKind::Struct
        };
        self.register(&node.name, kind, &node.location)
    }

    fn visit_enum_def(&mut self, node: &EnumDef) -> Result<(), AnalysisError> {
        self.register(&node.name, DefinitionKind::Enum, &node.location)
    }
}
