//! Fallible tree traversal.
//!
//! A pass implements [`Visitor`] and overrides only the callbacks it cares
//! about. Every default method forwards to the matching `walk_*` function,
//! which recurses into the node's children in declaration order; an
//! override that still wants the children visited calls the `walk_*`
//! function itself. The first `Err` stops the traversal.

use crate::attributes::Attribute;
use crate::nodes::{
    EnumBody, EnumDef, Enumeral, ImportDef, PackageBody, PackageDef, StructBody, StructDef,
    TypeDefinition, Variable, VariableType,
};

pub trait Visitor {
    type Error;

    fn visit_package_def(&mut self, node: &PackageDef) -> Result<(), Self::Error> {
        walk_package_def(self, node)
    }

    fn visit_package_body(&mut self, node: &PackageBody) -> Result<(), Self::Error> {
        walk_package_body(self, node)
    }

    fn visit_import_def(&mut self, node: &ImportDef) -> Result<(), Self::Error> {
        walk_import_def(self, node)
    }

    fn visit_struct_def(&mut self, node: &StructDef) -> Result<(), Self::Error> {
        walk_struct_def(self, node)
    }

    fn visit_enum_def(&mut self, node: &EnumDef) -> Result<(), Self::Error> {
        walk_enum_def(self, node)
    }

    fn visit_struct_body(&mut self, node: &StructBody) -> Result<(), Self::Error> {
        walk_struct_body(self, node)
    }

    fn visit_enum_body(&mut self, node: &EnumBody) -> Result<(), Self::Error> {
        walk_enum_body(self, node)
    }

    fn visit_variable(&mut self, node: &Variable) -> Result<(), Self::Error> {
        walk_variable(self, node)
    }

    fn visit_enumeral(&mut self, _node: &Enumeral) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_variable_type(&mut self, node: &VariableType) -> Result<(), Self::Error> {
        walk_variable_type(self, node)
    }

    fn visit_attribute(&mut self, _node: &Attribute) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A node that dispatches itself to exactly one [`Visitor`] callback.
pub trait Accept {
    /// # Errors
    ///
    /// Propagates the first error returned by the visitor.
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error>;
}

macro_rules! impl_accept {
    ($($node:ty => $method:ident),+ $(,)?) => {
        $(
            impl Accept for $node {
                fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
                    visitor.$method(self)
                }
            }
        )+
    };
}

impl_accept! {
    PackageDef => visit_package_def,
    PackageBody => visit_package_body,
    ImportDef => visit_import_def,
    StructDef => visit_struct_def,
    EnumDef => visit_enum_def,
    StructBody => visit_struct_body,
    EnumBody => visit_enum_body,
    Variable => visit_variable,
    Enumeral => visit_enumeral,
    VariableType => visit_variable_type,
    Attribute => visit_attribute,
}

impl Accept for TypeDefinition {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        match self {
            TypeDefinition::Struct(def) => visitor.visit_struct_def(def),
            TypeDefinition::Enum(def) => visitor.visit_enum_def(def),
        }
    }
}

fn walk_attributes<V: Visitor + ?Sized>(
    visitor: &mut V,
    attributes: &[Attribute],
) -> Result<(), V::Error> {
    attributes
        .iter()
        .try_for_each(|attribute| visitor.visit_attribute(attribute))
}

/// # Errors
///
/// Propagates the first visitor error.
pub fn walk_package_def<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &PackageDef,
) -> Result<(), V::Error> {
    walk_attributes(visitor, &node.attributes)?;
    visitor.visit_package_body(&node.body)
}

/// # Errors
///
/// Propagates the first visitor error.
pub fn walk_package_body<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &PackageBody,
) -> Result<(), V::Error> {
    for import in &node.imports {
        visitor.visit_import_def(import)?;
    }
    for element in &node.elements {
        element.accept(visitor)?;
    }
    Ok(())
}

/// # Errors
///
/// Propagates the first visitor error.
pub fn walk_import_def<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &ImportDef,
) -> Result<(), V::Error> {
    walk_attributes(visitor, &node.attributes)
}

/// # Errors
///
/// Propagates the first visitor error.
pub fn walk_struct_def<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &StructDef,
) -> Result<(), V::Error> {
    walk_attributes(visitor, &node.attributes)?;
    visitor.visit_struct_body(&node.body)
}

/// # Errors
///
/// Propagates the first visitor error.
pub fn walk_enum_def<V: Visitor + ?Sized>(visitor: &mut V, node: &EnumDef) -> Result<(), V::Error> {
    walk_attributes(visitor, &node.attributes)?;
    visitor.visit_enum_body(&node.body)
}

/// # Errors
///
/// Propagates the first visitor error.
pub fn walk_struct_body<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &StructBody,
) -> Result<(), V::Error> {
    node.variables
        .iter()
        .try_for_each(|variable| visitor.visit_variable(variable))
}

/// # Errors
///
/// Propagates the first visitor error.
pub fn walk_enum_body<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &EnumBody,
) -> Result<(), V::Error> {
    node.enumerals
        .iter()
        .try_for_each(|enumeral| visitor.visit_enumeral(enumeral))
}

/// # Errors
///
/// Propagates the first visitor error.
pub fn walk_variable<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &Variable,
) -> Result<(), V::Error> {
    walk_attributes(visitor, &node.attributes)?;
    visitor.visit_variable_type(&node.ty)
}

/// Visits the element type of an array; other types are leaves.
///
/// # Errors
///
/// Propagates the first visitor error.
pub fn walk_variable_type<V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &VariableType,
) -> Result<(), V::Error> {
    match node {
        VariableType::Array { element, .. } => visitor.visit_variable_type(element),
        VariableType::Generic(_) | VariableType::Named { .. } => Ok(()),
    }
}
