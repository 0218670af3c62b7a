//! Construction functions for AST nodes.
//!
//! The parser never assembles nodes by hand; it passes literal token text
//! here. Unquoting, number conversion, range validation and the splitting
//! of `int x, y` into one [`Variable`] per name all happen in this module,
//! so a node that exists has already passed those checks.

use crate::attributes::{Attribute, AttributeTarget, Range};
use crate::errors::AstError;
use crate::nodes::{
    ArraySize, EnumDef, Enumeral, GenericType, ImportDef, Location, PackageDef, StructBody,
    StructDef, TypeDefinition, Variable, VariableType,
};

/// Strips the surrounding double quotes of a string literal.
///
/// # Errors
///
/// Returns [`AstError::MalformedString`] if `literal` is not quoted.
pub fn unquote(literal: &str, location: &Location) -> Result<String, AstError> {
    literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(str::to_string)
        .ok_or_else(|| AstError::MalformedString {
            literal: literal.to_string(),
            location: location.clone(),
        })
}

/// # Errors
///
/// Returns [`AstError::InvalidNumber`] if `literal` is not a valid `i64`.
pub fn to_i64(literal: &str, location: &Location) -> Result<i64, AstError> {
    literal.parse().map_err(|_| AstError::InvalidNumber {
        literal: literal.to_string(),
        location: location.clone(),
    })
}

/// # Errors
///
/// Returns [`AstError::InvalidNumber`] if `literal` is not a valid `f64`.
pub fn to_f64(literal: &str, location: &Location) -> Result<f64, AstError> {
    literal.parse().map_err(|_| AstError::InvalidNumber {
        literal: literal.to_string(),
        location: location.clone(),
    })
}

#[must_use]
pub fn new_package_def(name: String, attributes: Vec<Attribute>, location: Location) -> PackageDef {
    let mut package = PackageDef::new(name, location);
    package.attributes = attributes;
    package
}

pub fn add_import_to_package_body(package: &mut PackageDef, import: ImportDef) {
    package.body.imports.push(import);
}

pub fn add_element_to_package_body(package: &mut PackageDef, element: TypeDefinition) {
    package.body.elements.push(element);
}

#[must_use]
pub fn new_import(imported_name: String, attributes: Vec<Attribute>, location: Location) -> ImportDef {
    ImportDef {
        imported_name,
        attributes,
        location,
    }
}

#[must_use]
pub fn new_struct_def(
    name: String,
    is_class: bool,
    overrides: Option<String>,
    body: StructBody,
    attributes: Vec<Attribute>,
    location: Location,
) -> TypeDefinition {
    let mut def = StructDef::new(name, is_class, location);
    def.overrides = overrides;
    def.body = body;
    def.attributes = attributes;
    TypeDefinition::Struct(def)
}

#[must_use]
pub fn new_enum_def(name: String, attributes: Vec<Attribute>, location: Location) -> EnumDef {
    let mut def = EnumDef::new(name, location);
    def.attributes = attributes;
    def
}

pub fn add_to_enum_body(def: &mut EnumDef, name: String, location: Location) {
    def.body.enumerals.push(Enumeral { name, location });
}

/// Primitive type for a keyword such as `int` or `ulong`, `None` for any
/// other name.
#[must_use]
pub fn new_generic_type(keyword: &str) -> Option<VariableType> {
    GenericType::from_keyword(keyword).map(VariableType::Generic)
}

#[must_use]
pub fn new_named_type(name: String) -> VariableType {
    VariableType::named(name)
}

/// `element[]` when `size` is `None`, `element[size]` otherwise.
#[must_use]
pub fn new_array_of_type(element: VariableType, size: Option<u64>) -> VariableType {
    VariableType::Array {
        element: Box::new(element),
        size: size.map_or(ArraySize::Unbounded, ArraySize::Fixed),
    }
}

/// Adds one [`Variable`] per name to `body`, each with its own copy of
/// `attributes`.
///
/// # Errors
///
/// With more than one name, every attribute must be applicable to a
/// multi-variable declaration of `ty`; the first that is not is returned as
/// [`AstError::InapplicableAttribute`].
pub fn add_multi_variable_to_struct_body(
    body: &mut StructBody,
    ty: &VariableType,
    names: Vec<(String, Location)>,
    attributes: &[Attribute],
    location: &Location,
) -> Result<(), AstError> {
    if names.len() > 1 {
        for attribute in attributes {
            attribute
                .is_applicable(AttributeTarget::MultiVariable(ty))
                .map_err(|source| AstError::InapplicableAttribute {
                    source,
                    location: location.clone(),
                })?;
        }
    }
    for (name, name_location) in names {
        let mut variable = Variable::new(ty.clone(), name, name_location);
        variable.attributes = attributes.to_vec();
        body.variables.push(variable);
    }
    Ok(())
}

#[must_use]
pub fn new_export_as(name: String) -> Attribute {
    Attribute::ExportAs(name)
}

/// # Errors
///
/// Returns [`AstError::NotANumber`] for a NaN precision.
pub fn new_precision(precision: f64, location: &Location) -> Result<Attribute, AstError> {
    if precision.is_nan() {
        return Err(AstError::NotANumber {
            location: location.clone(),
        });
    }
    Ok(Attribute::Precision(precision))
}

/// # Errors
///
/// Returns [`AstError::InvalidRange`] when the bounds are inverted or an
/// infinite bound is inclusive.
pub fn new_range(
    lower_bound: f64,
    lower_inclusive: bool,
    upper_bound: f64,
    upper_inclusive: bool,
    location: &Location,
) -> Result<Attribute, AstError> {
    Range::new(lower_bound, lower_inclusive, upper_bound, upper_inclusive)
        .map(Attribute::Range)
        .map_err(|source| AstError::InvalidRange {
            source,
            location: location.clone(),
        })
}

#[must_use]
pub fn new_message() -> Attribute {
    Attribute::Message
}

#[must_use]
pub fn new_version(version: i64) -> Attribute {
    Attribute::Version(version)
}
