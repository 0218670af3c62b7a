use std::fmt::{self, Display, Formatter};

use crate::nodes::{
    ArraySize, DefinitionId, EnumBody, EnumDef, GenericType, Location, PackageBody, PackageDef,
    StructBody, StructDef, TypeDefinition, Variable, VariableType,
};

impl PackageDef {
    #[must_use]
    pub fn new(name: String, location: Location) -> Self {
        PackageDef {
            name,
            body: PackageBody::default(),
            attributes: Vec::new(),
            location,
        }
    }

    /// Qualified name of a type declared in this package.
    #[must_use]
    pub fn qualify(&self, type_name: &str) -> String {
        format!("{}.{type_name}", self.name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.elements.is_empty()
    }
}

impl TypeDefinition {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Struct(def) => &def.name,
            TypeDefinition::Enum(def) => &def.name,
        }
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            TypeDefinition::Struct(def) => &def.location,
            TypeDefinition::Enum(def) => &def.location,
        }
    }

    #[must_use]
    pub fn as_struct(&self) -> Option<&StructDef> {
        match self {
            TypeDefinition::Struct(def) => Some(def),
            TypeDefinition::Enum(_) => None,
        }
    }
}

impl StructDef {
    #[must_use]
    pub fn new(name: String, is_class: bool, location: Location) -> Self {
        StructDef {
            name,
            is_class,
            overrides: None,
            overrides_def: None,
            body: StructBody::default(),
            attributes: Vec::new(),
            location,
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.body.variables.iter().map(|v| v.name.as_str())
    }
}

impl EnumDef {
    #[must_use]
    pub fn new(name: String, location: Location) -> Self {
        EnumDef {
            name,
            body: EnumBody::default(),
            attributes: Vec::new(),
            location,
        }
    }
}

impl DefinitionId {
    #[must_use]
    pub fn new(package: usize, element: usize) -> Self {
        Self { package, element }
    }

    /// Looks the definition up in the package list the id was issued for.
    #[must_use]
    pub fn resolve(self, packages: &[PackageDef]) -> Option<&TypeDefinition> {
        packages
            .get(self.package)
            .and_then(|pkg| pkg.body.elements.get(self.element))
    }

    #[must_use]
    pub fn qualified_name(self, packages: &[PackageDef]) -> Option<String> {
        let pkg = packages.get(self.package)?;
        let def = pkg.body.elements.get(self.element)?;
        Some(pkg.qualify(def.name()))
    }
}

impl GenericType {
    /// Maps a primitive type keyword, including its aliases, to the type.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let generic = match keyword {
            "int" | "int32" => GenericType::Integer32,
            "int64" | "long" => GenericType::Integer64,
            "short" => GenericType::Short,
            "uint" | "uint32" => GenericType::UnsignedInteger32,
            "uint64" | "ulong" => GenericType::UnsignedInteger64,
            "ushort" => GenericType::UnsignedShort,
            "byte" => GenericType::Byte,
            "bool" => GenericType::Bool,
            "string" => GenericType::String,
            "char" => GenericType::Char,
            "float" => GenericType::Float,
            "double" => GenericType::Double,
            _ => return None,
        };
        Some(generic)
    }

    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            GenericType::Integer32
                | GenericType::Integer64
                | GenericType::Short
                | GenericType::UnsignedInteger32
                | GenericType::UnsignedInteger64
                | GenericType::UnsignedShort
                | GenericType::Byte
        )
    }

    #[must_use]
    pub fn is_floating_point(self) -> bool {
        matches!(self, GenericType::Float | GenericType::Double)
    }
}

impl Display for GenericType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenericType::Integer32 => "Integer32",
            GenericType::Integer64 => "Integer64",
            GenericType::Short => "Short",
            GenericType::UnsignedInteger32 => "UnsignedInteger32",
            GenericType::UnsignedInteger64 => "UnsignedInteger64",
            GenericType::UnsignedShort => "UnsignedShort",
            GenericType::Byte => "Byte",
            GenericType::Bool => "Bool",
            GenericType::String => "String",
            GenericType::Char => "Char",
            GenericType::Float => "Float",
            GenericType::Double => "Double",
        };
        write!(f, "{name}")
    }
}

impl Display for ArraySize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArraySize::Unbounded => write!(f, "∞"),
            ArraySize::Fixed(size) => write!(f, "{size}"),
        }
    }
}

impl VariableType {
    #[must_use]
    pub fn named(name: String) -> Self {
        VariableType::Named {
            name,
            resolved: None,
        }
    }

    #[must_use]
    pub fn generic(&self) -> Option<GenericType> {
        match self {
            VariableType::Generic(generic) => Some(*generic),
            _ => None,
        }
    }

    /// Innermost non-array type: the element type of (nested) arrays, or
    /// the type itself.
    #[must_use]
    pub fn innermost(&self) -> &VariableType {
        match self {
            VariableType::Array { element, .. } => element.innermost(),
            other => other,
        }
    }

    pub fn innermost_mut(&mut self) -> &mut VariableType {
        match self {
            VariableType::Array { element, .. } => element.innermost_mut(),
            other => other,
        }
    }

    /// Referenced type name, if the innermost type is a named reference.
    #[must_use]
    pub fn referenced_name(&self) -> Option<&str> {
        match self.innermost() {
            VariableType::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub fn resolved(&self) -> Option<DefinitionId> {
        match self.innermost() {
            VariableType::Named { resolved, .. } => *resolved,
            _ => None,
        }
    }
}

impl Variable {
    #[must_use]
    pub fn new(ty: VariableType, name: String, location: Location) -> Self {
        Variable {
            ty,
            name,
            attributes: Vec::new(),
            location,
        }
    }
}
