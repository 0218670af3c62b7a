use std::fmt::{self, Display, Formatter};

use sdl_ast::attributes::AttributeError;
use sdl_ast::nodes::Location;
use thiserror::Error;

/// Kind of declaration reported in redeclaration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Struct,
    Class,
    Enum,
}

impl Display for DefinitionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionKind::Struct => write!(f, "Struct"),
            DefinitionKind::Class => write!(f, "Class"),
            DefinitionKind::Enum => write!(f, "Enum"),
        }
    }
}

/// Semantic errors found while finding, linking or validating types.
///
/// Every pass stops at the first error, so a failed run reports exactly one
/// of these.
#[derive(Debug, Clone, PartialEq, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum AnalysisError {
    /// Two packages with the same name reached the type finder, which means
    /// the package list was not merged.
    #[error("{location}: Package {name} redeclared")]
    DuplicatePackage { name: String, location: Location },

    /// `name` is the qualified name; `location` is the later declaration.
    #[error("{location}: {kind} {name} redeclared")]
    DuplicateType {
        kind: DefinitionKind,
        name: String,
        location: Location,
    },

    #[error("{location}: Unknown type {name}")]
    UnknownType { name: String, location: Location },

    #[error("{location}: Struct or class {name} extends type which is not a struct or class")]
    ExtendsNonStruct { name: String, location: Location },

    #[error("{location}: Class {name} cannot extend struct {parent}")]
    ClassExtendsStruct {
        name: String,
        parent: String,
        location: Location,
    },

    #[error("{location}: Struct {name} cannot extend class {parent}")]
    StructExtendsClass {
        name: String,
        parent: String,
        location: Location,
    },

    /// `chain` starts at the declaring type and ends with the first repeated
    /// name, e.g. `["A", "B", "A"]`.
    #[error("{location}: Circular inheritance detected ({})", chain.join(", "))]
    CircularInheritance {
        chain: Vec<String>,
        location: Location,
    },

    #[error(
        "{location}: {name} declares `{member}` which is already declared by {parent}; hiding inherited members is not allowed"
    )]
    HiddenMember {
        name: String,
        parent: String,
        member: String,
        location: Location,
    },

    #[error("{location}: {source}")]
    InapplicableAttribute {
        #[source]
        source: AttributeError,
        location: Location,
    },

    #[error("{location}: Package contains duplicate definition of type {name}")]
    DuplicateDefinition { name: String, location: Location },

    /// A referenced type that no validated package declares.
    #[error("{location}: Unknown type {name}")]
    UnknownTypeName { name: String, location: Location },
}

impl AnalysisError {
    /// Returns the source location associated with this error.
    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            AnalysisError::DuplicatePackage { location, .. }
            | AnalysisError::DuplicateType { location, .. }
            | AnalysisError::UnknownType { location, .. }
            | AnalysisError::ExtendsNonStruct { location, .. }
            | AnalysisError::ClassExtendsStruct { location, .. }
            | AnalysisError::StructExtendsClass { location, .. }
            | AnalysisError::CircularInheritance { location, .. }
            | AnalysisError::HiddenMember { location, .. }
            | AnalysisError::InapplicableAttribute { location, .. }
            | AnalysisError::DuplicateDefinition { location, .. }
            | AnalysisError::UnknownTypeName { location, .. } => location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> Location {
        Location::new(0, 4, 1, "game.sdl".to_string())
    }

    #[test]
    fn circular_chain_is_comma_separated() {
        let err = AnalysisError::CircularInheritance {
            chain: vec!["A".to_string(), "B".to_string(), "A".to_string()],
            location: loc(),
        };
        assert_eq!(
            err.to_string(),
            "game.sdl:4:1: Circular inheritance detected (A, B, A)"
        );
    }

    #[test]
    fn duplicate_type_names_kind() {
        let err = AnalysisError::DuplicateType {
            kind: DefinitionKind::Class,
            name: "p.Player".to_string(),
            location: loc(),
        };
        assert_eq!(err.to_string(), "game.sdl:4:1: Class p.Player redeclared");
    }

    #[test]
    fn attribute_reason_is_kept() {
        let err = AnalysisError::InapplicableAttribute {
            source: AttributeError::PrecisionNotFloat,
            location: loc(),
        };
        assert!(
            err.to_string()
                .ends_with("Precision attribute can only be applied to float variables")
        );
        assert_eq!(err.location().line, 4);
    }
}
