//! Linked Context - the analyzed package set
//!
//! [`LinkedContext`] owns the merged packages after the finder and the
//! static analyzer have both succeeded, together with the [`TypeTable`] they
//! were linked against. Every `DefinitionId` stored in the packages resolves
//! through [`LinkedContext::definition`].
//!
//! ```text
//! LinkedContext
//! ├─ packages: Vec<PackageDef>
//! │  ├─ StructDef.overrides_def ──────┐
//! │  └─ VariableType::Named.resolved ─┤ DefinitionId
//! └─ table: TypeTable                 │
//!    └─ "package.Name" ───────────────┘
//! ```

use sdl_ast::nodes::{DefinitionId, PackageDef, StructDef, TypeDefinition, Variable};

use crate::finder::TypeTable;

#[derive(Debug, Default)]
pub struct LinkedContext {
    packages: Vec<PackageDef>,
    table: TypeTable,
}

impl LinkedContext {
    pub(crate) fn new(packages: Vec<PackageDef>, table: TypeTable) -> Self {
        Self { packages, table }
    }

    #[must_use]
    pub fn packages(&self) -> &[PackageDef] {
        &self.packages
    }

    #[must_use]
    pub fn type_table(&self) -> &TypeTable {
        &self.table
    }

    #[must_use]
    pub fn definition(&self, id: DefinitionId) -> Option<&TypeDefinition> {
        id.resolve(&self.packages)
    }

    /// Looks a type up by qualified name, e.g. `game.Player`.
    #[must_use]
    pub fn find(&self, qualified_name: &str) -> Option<&TypeDefinition> {
        self.table
            .get(qualified_name)
            .and_then(|id| self.definition(id))
    }

    /// The struct or class `def` extends, if any.
    #[must_use]
    pub fn parent_of(&self, def: &StructDef) -> Option<&StructDef> {
        def.overrides_def
            .and_then(|id| self.definition(id))
            .and_then(TypeDefinition::as_struct)
    }

    /// Fields of `def` followed by the fields of each ancestor, nearest first.
    #[must_use]
    pub fn all_fields<'c>(&'c self, def: &'c StructDef) -> Vec<&'c Variable> {
        let mut fields: Vec<&Variable> = def.body.variables.iter().collect();
        let mut current = def;
        while let Some(parent) = self.parent_of(current) {
            fields.extend(parent.body.variables.iter());
            current = parent;
        }
        fields
    }
}
