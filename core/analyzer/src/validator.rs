//! Coarse validation over declared and referenced type names.
//!
//! The validator repeats the attribute applicability checks and then works
//! on plain qualified names: it records every declared type and every
//! referenced type (field types and parent clauses, qualified with the
//! current package when written bare) and compares the two lists once the
//! traversal is done. It does not need a [`TypeTable`](crate::finder::TypeTable)
//! and can run on a single package; references into other packages then
//! fail as unknown.

use sdl_ast::attributes::AttributeTarget;
use sdl_ast::nodes::{EnumDef, ImportDef, Location, PackageDef, StructDef, Variable};
use sdl_ast::visitor::{Accept, Visitor, walk_package_def, walk_struct_def};

use crate::analyzer::check_attributes;
use crate::errors::AnalysisError;

#[derive(Debug, Default)]
pub struct Validator {
    package_name: String,
    declared_types: Vec<(String, Location)>,
    used_types: Vec<(String, Location)>,
    warnings: Vec<String>,
}

impl Validator {
    /// Validates the whole package set and returns its warnings.
    ///
    /// A run that declares no type at all warns once, naming the last
    /// package traversed.
    ///
    /// # Errors
    ///
    /// The first inapplicable attribute, then the first duplicate declared
    /// name, then the first referenced name that nothing declares.
    #[tracing::instrument(level = "debug", skip_all, fields(packages = packages.len()))]
    pub fn validate(packages: &[PackageDef]) -> Result<Vec<String>, AnalysisError> {
        let mut validator = Validator::default();
        for package in packages {
            validator.traverse_package(package)?;
        }
        validator.validate_types()?;
        Ok(validator.warnings)
    }

    /// Validates `package` on its own.
    ///
    /// # Errors
    ///
    /// As [`Validator::validate`]; references to types of other packages are
    /// reported as unknown.
    pub fn validate_single_package(package: &PackageDef) -> Result<Vec<String>, AnalysisError> {
        Self::validate(std::slice::from_ref(package))
    }

    fn traverse_package(&mut self, package: &PackageDef) -> Result<(), AnalysisError> {
        self.package_name.clone_from(&package.name);
        package.accept(self)
    }

    fn validate_types(&mut self) -> Result<(), AnalysisError> {
        if self.declared_types.is_empty() {
            let warning = format!("Warning: Nothing declared in package {}.", self.package_name);
            tracing::warn!("{warning}");
            self.warnings.push(warning);
            return Ok(());
        }
        for (index, (name, _)) in self.declared_types.iter().enumerate() {
            if let Some((_, location)) = self.declared_types[index + 1..]
                .iter()
                .find(|(other, _)| other == name)
            {
                return Err(AnalysisError::DuplicateDefinition {
                    name: name.clone(),
                    location: location.clone(),
                });
            }
        }
        for (name, location) in &self.used_types {
            if !self.declared_types.iter().any(|(declared, _)| declared == name) {
                return Err(AnalysisError::UnknownTypeName {
                    name: name.clone(),
                    location: location.clone(),
                });
            }
        }
        Ok(())
    }

    fn add_declared_type(&mut self, name: &str, location: &Location) {
        self.declared_types
            .push((format!("{}.{name}", self.package_name), location.clone()));
    }

    fn add_used_type(&mut self, name: &str, location: &Location) {
        let qualified = if name.contains('.') {
            name.to_string()
        } else {
            format!("{}.{name}", self.package_name)
        };
        self.used_types.push((qualified, location.clone()));
    }
}

impl Visitor for Validator {
    type Error = AnalysisError;

    fn visit_package_def(&mut self, node: &PackageDef) -> Result<(), AnalysisError> {
        check_attributes(
            &node.attributes,
            AttributeTarget::Package(node),
            &node.location,
        )?;
        walk_package_def(self, node)
    }

    fn visit_import_def(&mut self, node: &ImportDef) -> Result<(), AnalysisError> {
        check_attributes(
            &node.attributes,
            AttributeTarget::Import(node),
            &node.location,
        )
    }

    fn visit_struct_def(&mut self, node: &StructDef) -> Result<(), AnalysisError> {
        check_attributes(
            &node.attributes,
            AttributeTarget::Struct(node),
            &node.location,
        )?;
        self.add_declared_type(&node.name, &node.location);
        if let Some(parent) = &node.overrides {
            self.add_used_type(parent, &node.location);
        }
        walk_struct_def(self, node)
    }

    fn visit_enum_def(&mut self, node: &EnumDef) -> Result<(), AnalysisError> {
        check_attributes(&node.attributes, AttributeTarget::Enum(node), &node.location)?;
        self.add_declared_type(&node.name, &node.location);
        Ok(())
    }

    fn visit_variable(&mut self, node: &Variable) -> Result<(), AnalysisError> {
        check_attributes(
            &node.attributes,
            AttributeTarget::Variable(node),
            &node.location,
        )?;
        if let Some(name) = node.ty.referenced_name() {
            self.add_used_type(name, &node.location);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl_ast::parser::parse;

    #[test]
    fn empty_package_warns() {
        let package = parse("package \"Test.Namespace\"", "").unwrap();
        assert_eq!(
            Validator::validate_single_package(&package).unwrap(),
            vec!["Warning: Nothing declared in package Test.Namespace.".to_string()]
        );
    }

    #[test]
    fn empty_package_beside_declarations_does_not_warn() {
        let packages = vec![
            parse("package \"a\"", "").unwrap(),
            parse("package \"b\" struct S {}", "").unwrap(),
        ];
        assert!(Validator::validate(&packages).unwrap().is_empty());
    }

    #[test]
    fn set_without_declarations_warns_once() {
        let packages = vec![
            parse("package \"a\"", "").unwrap(),
            parse("package \"c\"", "").unwrap(),
        ];
        assert_eq!(
            Validator::validate(&packages).unwrap(),
            vec!["Warning: Nothing declared in package c.".to_string()]
        );
    }

    #[test]
    fn duplicate_definition() {
        let package = parse("package \"p\"\nstruct S {}\nenum S { A }", "").unwrap();
        let err = Validator::validate_single_package(&package).unwrap_err();
        assert_eq!(
            err.to_string(),
            "3:1: Package contains duplicate definition of type p.S"
        );
    }

    #[test]
    fn unknown_type_name() {
        let package = parse("package \"p\" class A : Missing {}", "").unwrap();
        assert!(matches!(
            Validator::validate_single_package(&package),
            Err(AnalysisError::UnknownTypeName { ref name, .. }) if name == "p.Missing"
        ));
    }

    #[test]
    fn cross_package_reference_needs_the_whole_set() {
        let shapes = parse("package \"shapes\" struct Point { float x }", "").unwrap();
        let scene = parse("package \"scene\" struct Node { shapes.Point[] points }", "").unwrap();
        assert!(Validator::validate_single_package(&scene).is_err());
        assert_eq!(Validator::validate(&[shapes, scene]).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn attributes_are_rechecked() {
        let package = parse("@message package \"p\" struct S {}", "").unwrap();
        assert!(matches!(
            Validator::validate_single_package(&package),
            Err(AnalysisError::InapplicableAttribute { .. })
        ));
    }
}
