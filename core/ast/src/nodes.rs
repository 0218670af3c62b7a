use core::fmt;
use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::attributes::Attribute;

/// Position of a token or declaration in a schema source.
///
/// `source` is the path of the file the node was parsed from and stays empty
/// for schemas parsed from in-memory text.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct Location {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
    pub source: String,
}

impl Location {
    #[must_use]
    pub fn new(offset: u32, line: u32, column: u32, source: String) -> Self {
        Self {
            offset,
            line,
            column,
            source,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.source.is_empty() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}:{}", self.source, self.line, self.column)
        }
    }
}

#[macro_export]
macro_rules! ast_node {
    (
        $(#[$outer:meta])*
        $struct_vis:vis struct $name:ident {
            $(
                $(#[$field_attr:meta])*
                $field_vis:vis $field_name:ident : $field_ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize)]
        $struct_vis struct $name {
            $(
                $(#[$field_attr])*
                $field_vis $field_name : $field_ty,
            )*
            pub location: $crate::nodes::Location,
        }
    };
}

macro_rules! ast_nodes {
    (
        $(
            $(#[$outer:meta])*
            $struct_vis:vis struct $name:ident { $($fields:tt)* }
        )+
    ) => {
        $(
            ast_node! {
                $(#[$outer])*
                $struct_vis struct $name { $($fields)* }
            }
        )+
    };
}

/// Stable address of a type definition inside an analyzed package list.
///
/// Resolved references are stored as ids rather than pointers; the id stays
/// valid as long as the package list it was produced for is not reordered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct DefinitionId {
    pub package: usize,
    pub element: usize,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub enum TypeDefinition {
    Struct(StructDef),
    Enum(EnumDef),
}

/// Built-in scalar types.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum GenericType {
    Integer32,
    Integer64,
    Short,
    UnsignedInteger32,
    UnsignedInteger64,
    UnsignedShort,
    Byte,
    Bool,
    String,
    Char,
    Float,
    Double,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum ArraySize {
    Unbounded,
    Fixed(u64),
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub enum VariableType {
    Generic(GenericType),
    Array {
        element: Box<VariableType>,
        size: ArraySize,
    },
    /// Reference to a struct, class or enum by bare or dotted name.
    /// `resolved` is filled in by the static analyzer.
    Named {
        name: String,
        resolved: Option<DefinitionId>,
    },
}

#[derive(Clone, PartialEq, Debug, Default, Serialize)]
pub struct PackageBody {
    pub imports: Vec<ImportDef>,
    pub elements: Vec<TypeDefinition>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize)]
pub struct StructBody {
    pub variables: Vec<Variable>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize)]
pub struct EnumBody {
    pub enumerals: Vec<Enumeral>,
}

ast_nodes! {

    pub struct PackageDef {
        pub name: String,
        pub body: PackageBody,
        pub attributes: Vec<Attribute>,
    }

    pub struct ImportDef {
        pub imported_name: String,
        pub attributes: Vec<Attribute>,
    }

    pub struct StructDef {
        pub name: String,
        pub is_class: bool,
        pub overrides: Option<String>,
        pub overrides_def: Option<DefinitionId>,
        pub body: StructBody,
        pub attributes: Vec<Attribute>,
    }

    pub struct EnumDef {
        pub name: String,
        pub body: EnumBody,
        pub attributes: Vec<Attribute>,
    }

    pub struct Variable {
        pub ty: VariableType,
        pub name: String,
        pub attributes: Vec<Attribute>,
    }

    pub struct Enumeral {
        pub name: String,
    }

}
