//! Acceptance scenarios for the whole front end.

#[cfg(test)]
mod scenario_tests {
    use crate::utils::{analyze_sources, parse_source};
    use sdl::compile_packages;
    use sdl_analyzer::errors::AnalysisError;
    use sdl_ast::nodes::TypeDefinition;

    #[test]
    fn test_lone_package_declaration() {
        let schema = compile_packages(vec![parse_source("package \"Test.Namespace\"")]).unwrap();
        assert_eq!(schema.packages().len(), 1);
        assert_eq!(schema.packages()[0].name, "Test.Namespace");
        assert!(schema.packages()[0].body.elements.is_empty());
        assert_eq!(
            schema.warnings(),
            ["Warning: Nothing declared in package Test.Namespace."]
        );
    }

    #[test]
    fn test_split_package_merges() {
        let schema = compile_packages(vec![
            parse_source("package \"P\" struct A { int x }"),
            parse_source("package \"P\" struct B { int y }"),
        ])
        .unwrap();
        assert_eq!(schema.packages().len(), 1);
        assert_eq!(schema.packages()[0].name, "P");
        assert_eq!(schema.context().type_table().len(), 2);
    }

    #[test]
    fn test_parent_resolves_to_declaration() {
        let context = analyze_sources(&[
            "package \"game\" class Entity { int id } class Player : Entity { int score }",
        ])
        .unwrap();
        let player = context
            .find("game.Player")
            .and_then(TypeDefinition::as_struct)
            .unwrap();
        assert_eq!(player.overrides.as_deref(), Some("Entity"));
        assert_eq!(player.overrides_def, context.type_table().get("game.Entity"));
    }

    #[test]
    fn test_parent_must_be_struct_or_class() {
        let err = analyze_sources(&[
            "package \"game\" enum Entity { A } class Player : Entity { int score }",
        ])
        .unwrap_err();
        assert!(matches!(err, AnalysisError::ExtendsNonStruct { .. }));
        assert!(
            err.to_string()
                .contains("extends type which is not a struct or class")
        );
    }

    #[test]
    fn test_two_class_cycle() {
        let err = analyze_sources(&["package \"p\" class A : B {} class B : A {}"]).unwrap_err();
        assert!(err.to_string().contains("(A, B, A)"), "{err}");
    }

    #[test]
    fn test_range_on_integer_requires_integral_bounds() {
        let err = analyze_sources(&["package \"p\" struct S { @range: [0.14, 4] int x }"])
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("Range attribute applied to integer types must be limited by integers")
        );
        analyze_sources(&["package \"p\" struct S { @range: [0.14, 4] float x }"]).unwrap();
    }

    #[test]
    fn test_constant_expression_value() {
        let value = sdl_ast::expr::evaluate("2^2-sqrt(8/(1+1))+5*3^2+3").unwrap();
        assert!((value - 50.0).abs() < f64::EPSILON);
    }
}
