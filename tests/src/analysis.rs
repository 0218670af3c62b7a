//! Analysis of single-file fixtures.

#[cfg(test)]
mod single_file_tests {
    use crate::utils::{analysis_error, compile_fixture, get_sdl_path};
    use sdl_analyzer::errors::AnalysisError;
    use sdl_ast::attributes::Attribute;
    use sdl_ast::nodes::{GenericType, TypeDefinition, VariableType};

    #[test]
    fn test_basic_fixture_links() {
        let schema = compile_fixture("basic.sdl").unwrap();
        assert!(schema.warnings().is_empty());
        let context = schema.context();
        assert_eq!(context.type_table().len(), 5);

        let player = context
            .find("com.github.namespace.Player")
            .and_then(TypeDefinition::as_struct)
            .unwrap();
        assert!(player.is_class);
        assert_eq!(player.attributes, vec![Attribute::Message]);
        let entity = context.parent_of(player).unwrap();
        assert_eq!(entity.name, "Entity");

        let position = &entity.body.variables[0];
        assert_eq!(position.attributes, vec![Attribute::ExportAs("pos".into())]);
        let target = position.ty.resolved().unwrap();
        assert_eq!(
            target.qualified_name(context.packages()).as_deref(),
            Some("com.github.namespace.Vector3")
        );

        let fields: Vec<&str> = context
            .all_fields(player)
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(fields, ["state", "progress", "health", "position", "rotation"]);
    }

    #[test]
    fn test_basic_fixture_multi_variables() {
        let schema = compile_fixture("basic.sdl").unwrap();
        let quaternion = schema
            .context()
            .find("com.github.namespace.Quaternion")
            .and_then(TypeDefinition::as_struct)
            .unwrap();
        assert_eq!(quaternion.body.variables.len(), 4);
        for variable in &quaternion.body.variables {
            assert_eq!(variable.ty, VariableType::Generic(GenericType::Float));
            assert!(matches!(variable.attributes[..], [Attribute::Range(_)]));
        }
        let health = schema
            .context()
            .find("com.github.namespace.Player")
            .and_then(TypeDefinition::as_struct)
            .and_then(|player| player.body.variables.iter().find(|v| v.name == "health"))
            .unwrap();
        assert_eq!(health.attributes, vec![Attribute::Precision(0.001)]);
    }

    #[test]
    fn test_basic_fixture_enum_and_import() {
        let schema = compile_fixture("basic.sdl").unwrap();
        let package = &schema.packages()[0];
        assert_eq!(package.body.imports.len(), 1);
        assert_eq!(package.body.imports[0].imported_name, "com.github.other_namespace");
        let Some(TypeDefinition::Enum(team)) = schema.context().find("com.github.namespace.Team")
        else {
            panic!("Team should be an enum");
        };
        let names: Vec<&str> = team.body.enumerals.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Red", "Blue"]);
    }

    #[test]
    fn test_unknown_field_type() {
        let err = compile_fixture("unknown_type.sdl").unwrap_err();
        match analysis_error(&err) {
            AnalysisError::UnknownType { name, location } => {
                assert_eq!(name, "test.Item");
                assert_eq!(location.line, 4);
                assert!(location.source.ends_with("unknown_type.sdl"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_parent_type() {
        let err = compile_fixture("unknown_extended_type.sdl").unwrap_err();
        assert!(matches!(
            analysis_error(&err),
            AnalysisError::UnknownType { name, .. } if name == "test.Entity"
        ));
    }

    #[test]
    fn test_double_definition_stops_type_finder() {
        let err = compile_fixture("double_definition.sdl").unwrap_err();
        let error = analysis_error(&err);
        assert!(matches!(
            error,
            AnalysisError::DuplicateType { name, .. } if name == "test.Vector3"
        ));
        assert_eq!(error.location().line, 7);
    }

    #[test]
    fn test_variable_hiding() {
        let err = compile_fixture("variable_hiding.sdl").unwrap_err();
        match analysis_error(&err) {
            AnalysisError::HiddenMember {
                name,
                parent,
                member,
                location,
            } => {
                assert_eq!(name, "Player");
                assert_eq!(parent, "Entity");
                assert_eq!(member, "name");
                assert_eq!(location.line, 8);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_circular_inheritance() {
        let err = compile_fixture("circular_inheritance.sdl").unwrap_err();
        let error = analysis_error(&err);
        assert!(matches!(
            error,
            AnalysisError::CircularInheritance { chain, .. } if chain == &["A", "B", "A"]
        ));
        assert!(error.to_string().ends_with("Circular inheritance detected (A, B, A)"));
    }

    #[test]
    fn test_syntax_error_is_not_an_analysis_error() {
        let err = compile_fixture("syntax_error.sdl").unwrap_err();
        assert!(err.downcast_ref::<AnalysisError>().is_none());
        assert!(err.downcast_ref::<sdl_ast::errors::AstError>().is_some());
        let rendered = format!("{err:#}");
        assert!(rendered.contains("syntax_error.sdl:1:9"), "{rendered}");
    }

    #[test]
    fn test_fixture_paths_exist() {
        for name in [
            "basic.sdl",
            "empty.sdl",
            "multipkg/same_name",
            "multipkg/cross",
        ] {
            assert!(get_sdl_path(name).exists(), "{name} is missing");
        }
    }
}

#[cfg(test)]
mod validator_tests {
    use crate::utils::parse_source;
    use sdl::merge::merge;
    use sdl_analyzer::errors::AnalysisError;
    use sdl_analyzer::validator::Validator;

    #[test]
    fn test_validator_reports_duplicate_before_analysis() {
        let packages = merge(vec![
            parse_source("package \"p\"\nstruct S { int x }"),
            parse_source("package \"p\"\n\nstruct S { int y }"),
        ]);
        let err = Validator::validate(&packages).unwrap_err();
        assert!(matches!(
            &err,
            AnalysisError::DuplicateDefinition { name, .. } if name == "p.S"
        ));
        assert_eq!(err.location().line, 3);
    }

    #[test]
    fn test_validator_single_package_rejects_foreign_types() {
        let scene = parse_source("package \"scene\" struct Node { shapes.Point origin }");
        let shapes = parse_source("package \"shapes\" struct Point { float x, y }");
        assert!(matches!(
            Validator::validate_single_package(&scene),
            Err(AnalysisError::UnknownTypeName { name, .. }) if name == "shapes.Point"
        ));
        assert!(Validator::validate(&[scene, shapes]).unwrap().is_empty());
    }

    #[test]
    fn test_validator_warns_only_when_nothing_is_declared() {
        let mixed = vec![
            parse_source("package \"a\""),
            parse_source("package \"b\" struct S {}"),
            parse_source("package \"c\""),
        ];
        assert!(Validator::validate(&mixed).unwrap().is_empty());

        let empty = vec![parse_source("package \"a\""), parse_source("package \"c\"")];
        assert_eq!(
            Validator::validate(&empty).unwrap(),
            ["Warning: Nothing declared in package c."]
        );
    }
}
