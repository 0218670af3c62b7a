//! Indented debug rendering of parsed packages, used by `sdlc print-ast`.

use std::fmt::{self, Write};

use crate::attributes::Attribute;
use crate::nodes::{
    EnumBody, EnumDef, Enumeral, ImportDef, PackageBody, PackageDef, StructBody, StructDef,
    Variable, VariableType,
};
use crate::visitor::{Accept, Visitor, walk_package_body, walk_variable_type};

const INDENT: &str = "    ";

#[derive(Default)]
pub struct AstPrinter {
    out: String,
    level: usize,
}

impl AstPrinter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        for _ in 0..self.level {
            self.out.push_str(INDENT);
        }
        self.out.write_fmt(args)?;
        self.out.push('\n');
        Ok(())
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self) -> fmt::Result) -> fmt::Result {
        self.level += 1;
        let result = f(self);
        self.level -= 1;
        result
    }

    fn block(&mut self, f: impl FnOnce(&mut Self) -> fmt::Result) -> fmt::Result {
        self.line(format_args!("{{"))?;
        self.nested(f)?;
        self.line(format_args!("}}"))
    }

    fn attributes(&mut self, attributes: &[Attribute]) -> fmt::Result {
        attributes.iter().try_for_each(|a| a.accept(self))
    }
}

impl Visitor for AstPrinter {
    type Error = fmt::Error;

    fn visit_package_def(&mut self, node: &PackageDef) -> fmt::Result {
        self.line(format_args!("Package: {}", node.name))?;
        self.nested(|p| {
            p.attributes(&node.attributes)?;
            p.visit_package_body(&node.body)
        })
    }

    fn visit_package_body(&mut self, node: &PackageBody) -> fmt::Result {
        self.block(|p| walk_package_body(p, node))
    }

    fn visit_import_def(&mut self, node: &ImportDef) -> fmt::Result {
        self.line(format_args!("Import: {}", node.imported_name))?;
        self.nested(|p| p.attributes(&node.attributes))
    }

    fn visit_struct_def(&mut self, node: &StructDef) -> fmt::Result {
        self.line(format_args!("Struct: {}", node.name))?;
        self.nested(|p| {
            if let Some(parent) = &node.overrides {
                p.line(format_args!("Extends: {parent}"))?;
            }
            p.line(format_args!("Class: {}", node.is_class))?;
            p.attributes(&node.attributes)?;
            p.visit_struct_body(&node.body)
        })
    }

    fn visit_enum_def(&mut self, node: &EnumDef) -> fmt::Result {
        self.line(format_args!("Enum: {}", node.name))?;
        self.nested(|p| {
            p.attributes(&node.attributes)?;
            p.visit_enum_body(&node.body)
        })
    }

    fn visit_struct_body(&mut self, node: &StructBody) -> fmt::Result {
        self.block(|p| node.variables.iter().try_for_each(|v| p.visit_variable(v)))
    }

    fn visit_enum_body(&mut self, node: &EnumBody) -> fmt::Result {
        self.block(|p| node.enumerals.iter().try_for_each(|e| p.visit_enumeral(e)))
    }

    fn visit_variable(&mut self, node: &Variable) -> fmt::Result {
        self.line(format_args!("Variable: {}", node.name))?;
        self.nested(|p| {
            p.visit_variable_type(&node.ty)?;
            p.attributes(&node.attributes)
        })
    }

    fn visit_enumeral(&mut self, node: &Enumeral) -> fmt::Result {
        self.line(format_args!("Enumeral: {}", node.name))
    }

    fn visit_variable_type(&mut self, node: &VariableType) -> fmt::Result {
        match node {
            VariableType::Generic(generic) => self.line(format_args!("Type (generic): {generic}")),
            VariableType::Array { size, .. } => {
                self.line(format_args!("Array of size {size}. Child type:"))?;
                self.nested(|p| walk_variable_type(p, node))
            }
            VariableType::Named { name, .. } => self.line(format_args!("Type: {name}")),
        }
    }

    fn visit_attribute(&mut self, node: &Attribute) -> fmt::Result {
        self.line(format_args!("Attribute: {node}"))
    }
}

/// Renders every package, one tree after another.
#[must_use]
pub fn print_packages(packages: &[PackageDef]) -> String {
    let mut printer = AstPrinter::new();
    for package in packages {
        // Writing into a `String` cannot fail.
        let _ = package.accept(&mut printer);
    }
    printer.finish()
}
