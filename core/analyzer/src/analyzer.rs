//! Pass 2: linking and structural checks.
//!
//! The analyzer walks every package with the finished [`TypeTable`] and
//!
//! - resolves each named field type (through any array nesting) and each
//!   `: Parent` clause against the declaring package,
//! - validates every inheritance chain upward from the declaring type:
//!   the parent must be a struct or class of the same kind, the chain must
//!   not revisit a type, and no ancestor may redeclare a field name already
//!   declared lower in the chain,
//! - checks that every attribute applies to the node it decorates.
//!
//! Resolved ids are collected during a read-only traversal and written back
//! into the AST only once the whole pass has succeeded, so a failed run
//! leaves the packages untouched.

use rustc_hash::FxHashMap;
use sdl_ast::attributes::{Attribute, AttributeTarget};
use sdl_ast::nodes::{
    DefinitionId, EnumDef, ImportDef, Location, PackageBody, PackageDef, StructBody, StructDef,
    TypeDefinition, Variable, VariableType,
};
use sdl_ast::visitor::{Accept, Visitor};

use crate::errors::AnalysisError;
use crate::finder::TypeTable;

/// Resolved reference waiting to be written back into the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Field {
        owner: DefinitionId,
        variable: usize,
        target: DefinitionId,
    },
    Parent {
        owner: DefinitionId,
        target: DefinitionId,
    },
}

/// Checks each attribute of a node in order and stops at the first one that
/// does not apply.
pub(crate) fn check_attributes(
    attributes: &[Attribute],
    target: AttributeTarget<'_>,
    location: &Location,
) -> Result<(), AnalysisError> {
    for attribute in attributes {
        attribute
            .is_applicable(target)
            .map_err(|source| AnalysisError::InapplicableAttribute {
                source,
                location: location.clone(),
            })?;
    }
    Ok(())
}

/// Links every reference in `packages` against `table`.
///
/// # Errors
///
/// Returns the first resolution, inheritance or attribute error in package
/// order, then declaration order. Nothing is written on error.
#[tracing::instrument(level = "debug", skip_all, fields(packages = packages.len()))]
pub fn analyze(packages: &mut [PackageDef], table: &TypeTable) -> Result<(), AnalysisError> {
    let links = collect_links(packages, table)?;
    tracing::debug!(links = links.len(), "references resolved");
    for link in links {
        apply(packages, link);
    }
    Ok(())
}

fn collect_links(packages: &[PackageDef], table: &TypeTable) -> Result<Vec<Link>, AnalysisError> {
    let mut analyzer = StaticAnalyzer {
        packages,
        table,
        package: 0,
        element: 0,
        variable: 0,
        links: Vec::new(),
    };
    for (index, package) in packages.iter().enumerate() {
        analyzer.package = index;
        package.accept(&mut analyzer)?;
    }
    Ok(analyzer.links)
}

fn apply(packages: &mut [PackageDef], link: Link) {
    let (owner, target) = match link {
        Link::Field { owner, target, .. } | Link::Parent { owner, target } => (owner, target),
    };
    let Some(TypeDefinition::Struct(def)) = packages
        .get_mut(owner.package)
        .and_then(|package| package.body.elements.get_mut(owner.element))
    else {
        unreachable!("link owner {owner:?} is not a struct of the analyzed packages");
    };
    match link {
        Link::Field { variable, .. } => {
            let Some(VariableType::Named { resolved, .. }) = def
                .body
                .variables
                .get_mut(variable)
                .map(|variable| variable.ty.innermost_mut())
            else {
                unreachable!("field link {variable} of {owner:?} has no named type");
            };
            *resolved = Some(target);
        }
        Link::Parent { .. } => def.overrides_def = Some(target),
    }
}

struct StaticAnalyzer<'a> {
    packages: &'a [PackageDef],
    table: &'a TypeTable,
    package: usize,
    element: usize,
    variable: usize,
    links: Vec<Link>,
}

impl<'a> StaticAnalyzer<'a> {
    fn package_name(&self, index: usize) -> &'a str {
        self.packages
            .get(index)
            .map_or("", |package| package.name.as_str())
    }

    fn owner(&self) -> DefinitionId {
        DefinitionId::new(self.package, self.element)
    }

    /// Validates the edge `child : parent` and every edge above it.
    ///
    /// `chain` holds the types visited so far, starting with the declaring
    /// type; `fields` maps each field name seen so far to the type that
    /// declares it.
    fn check_inheritance<'n>(
        &self,
        child: &'n StructDef,
        parent_id: DefinitionId,
        chain: &mut Vec<DefinitionId>,
        fields: &mut FxHashMap<&'n str, &'n str>,
    ) -> Result<(), AnalysisError>
    where
        'a: 'n,
    {
        let Some(TypeDefinition::Struct(parent)) = parent_id.resolve(self.packages) else {
            return Err(AnalysisError::ExtendsNonStruct {
                name: child.name.clone(),
                location: child.location.clone(),
            });
        };
        let parent: &'n StructDef = parent;

        if child.is_class != parent.is_class {
            let (name, parent, location) =
                (child.name.clone(), parent.name.clone(), child.location.clone());
            return Err(if child.is_class {
                AnalysisError::ClassExtendsStruct {
                    name,
                    parent,
                    location,
                }
            } else {
                AnalysisError::StructExtendsClass {
                    name,
                    parent,
                    location,
                }
            });
        }

        if chain.contains(&parent_id) {
            let mut names: Vec<String> = chain
                .iter()
                .filter_map(|id| id.resolve(self.packages))
                .map(|def| def.name().to_string())
                .collect();
            names.push(parent.name.clone());
            let location = chain
                .first()
                .and_then(|id| id.resolve(self.packages))
                .map_or_else(|| child.location.clone(), |def| def.location().clone());
            return Err(AnalysisError::CircularInheritance {
                chain: names,
                location,
            });
        }

        for member in parent.field_names() {
            if let Some(declared_by) = fields.get(member) {
                return Err(AnalysisError::HiddenMember {
                    name: (*declared_by).to_string(),
                    parent: parent.name.clone(),
                    member: member.to_string(),
                    location: child.location.clone(),
                });
            }
        }
        fields.extend(parent.field_names().map(|member| (member, parent.name.as_str())));

        let Some(grandparent) = &parent.overrides else {
            return Ok(());
        };
        let grandparent_id = self.table.find_type(
            grandparent,
            self.package_name(parent_id.package),
            &parent.location,
        )?;
        chain.push(parent_id);
        self.check_inheritance(parent, grandparent_id, chain, fields)
    }
}

impl Visitor for StaticAnalyzer<'_> {
    type Error = AnalysisError;

    fn visit_package_def(&mut self, node: &PackageDef) -> Result<(), AnalysisError> {
        check_attributes(
            &node.attributes,
            AttributeTarget::Package(node),
            &node.location,
        )?;
        self.visit_package_body(&node.body)
    }

    fn visit_package_body(&mut self, node: &PackageBody) -> Result<(), AnalysisError> {
        for import in &node.imports {
            self.visit_import_def(import)?;
        }
        for (index, element) in node.elements.iter().enumerate() {
            self.element = index;
            element.accept(self)?;
        }
        Ok(())
    }

    fn visit_import_def(&mut self, node: &ImportDef) -> Result<(), AnalysisError> {
        check_attributes(
            &node.attributes,
            AttributeTarget::Import(node),
            &node.location,
        )
    }

    fn visit_struct_def(&mut self, node: &StructDef) -> Result<(), AnalysisError> {
        if let Some(parent) = &node.overrides {
            let parent_id =
                self.table
                    .find_type(parent, self.package_name(self.package), &node.location)?;
            let mut chain = vec![self.owner()];
            let mut fields: FxHashMap<&str, &str> = node
                .field_names()
                .map(|member| (member, node.name.as_str()))
                .collect();
            self.check_inheritance(node, parent_id, &mut chain, &mut fields)?;
            tracing::trace!(name = %node.name, parent = %parent, "inheritance validated");
            self.links.push(Link::Parent {
                owner: self.owner(),
                target: parent_id,
            });
        }
        check_attributes(
            &node.attributes,
            AttributeTarget::Struct(node),
            &node.location,
        )?;
        self.visit_struct_body(&node.body)
    }

    fn visit_enum_def(&mut self, node: &EnumDef) -> Result<(), AnalysisError> {
        check_attributes(&node.attributes, AttributeTarget::Enum(node), &node.location)
    }

    fn visit_struct_body(&mut self, node: &StructBody) -> Result<(), AnalysisError> {
        for (index, variable) in node.variables.iter().enumerate() {
            self.variable = index;
            self.visit_variable(variable)?;
        }
        Ok(())
    }

    fn visit_variable(&mut self, node: &Variable) -> Result<(), AnalysisError> {
        if let Some(name) = node.ty.referenced_name() {
            let target = self
                .table
                .find_type(name, self.package_name(self.package), &node.location)?;
            self.links.push(Link::Field {
                owner: self.owner(),
                variable: self.variable,
                target,
            });
        }
        check_attributes(
            &node.attributes,
            AttributeTarget::Variable(node),
            &node.location,
        )
    }
}
