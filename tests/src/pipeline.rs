//! Directory loading, merging and emission.

#[cfg(test)]
mod multi_package_tests {
    use crate::utils::{compile_fixture, get_sdl_path};
    use sdl_ast::nodes::{TypeDefinition, VariableType};

    #[test]
    fn test_same_name_fragments_merge() {
        let schema = compile_fixture("multipkg/same_name").unwrap();
        assert_eq!(schema.packages().len(), 1);
        let package = &schema.packages()[0];
        assert_eq!(package.name, "P");
        let names: Vec<&str> = package.body.elements.iter().map(TypeDefinition::name).collect();
        assert_eq!(names, ["A", "B"]);

        let b = schema
            .context()
            .find("P.B")
            .and_then(TypeDefinition::as_struct)
            .unwrap();
        let a_field = b.body.variables.iter().find(|v| v.name == "a").unwrap();
        assert_eq!(a_field.ty.resolved(), schema.context().type_table().get("P.A"));
    }

    #[test]
    fn test_cross_package_references() {
        let schema = compile_fixture("multipkg/cross").unwrap();
        let packages = schema.packages();
        let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["scene", "shapes"]);

        let node = schema
            .context()
            .find("scene.Node")
            .and_then(TypeDefinition::as_struct)
            .unwrap();
        let targets: Vec<String> = node
            .body
            .variables
            .iter()
            .filter_map(|v| v.ty.resolved())
            .filter_map(|id| id.qualified_name(packages))
            .collect();
        assert_eq!(targets, ["shapes.Point", "shapes.Kind", "scene.Node"]);
        assert!(matches!(node.body.variables[2].ty, VariableType::Array { .. }));
    }

    #[test]
    fn test_compile_paths_merges_across_inputs() {
        let schema = sdl::compile_paths(&[
            get_sdl_path("multipkg/same_name/b.sdl"),
            get_sdl_path("multipkg/same_name/a.sdl"),
        ])
        .unwrap();
        let names: Vec<&str> = schema.packages()[0]
            .body
            .elements
            .iter()
            .map(TypeDefinition::name)
            .collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_missing_package_fails_when_loaded_alone() {
        let err = sdl::compile_path(&get_sdl_path("multipkg/cross/scene.sdl")).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown type shapes.Point"));
    }
}

#[cfg(test)]
mod emit_tests {
    use crate::utils::compile_fixture;
    use sdl::emit::{Language, emit};

    #[test]
    fn test_emit_json() {
        let schema = compile_fixture("basic.sdl").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = emit(&schema, Language::Json, &dir.path().join("json")).unwrap();
        assert!(path.ends_with("schema.json"));
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let package = &json[0];
        assert_eq!(package["name"], "com.github.namespace");
        assert_eq!(package["body"]["elements"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_emit_ast_matches_printer() {
        let schema = compile_fixture("multipkg/same_name").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = emit(&schema, Language::Ast, dir.path()).unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, sdl_ast::printer::print_packages(schema.packages()));
        assert_eq!(Language::Ast.to_string(), "ast");
    }
}
