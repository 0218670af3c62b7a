//! Invariants that hold for every successfully analyzed package set.

use rustc_hash::FxHashSet;
use sdl_analyzer::linked_context::LinkedContext;
use sdl_ast::nodes::{TypeDefinition, VariableType};

const VALID_SETS: &[&[&str]] = &[
    &["package \"a\" struct S { int x S[] children }"],
    &[
        "package \"game\" class Base { int id } class Mid : Base { string tag } class Leaf : Mid { float hp }",
        "package \"ui\" struct Widget { game.Leaf target game.Base[4][] grid } enum Align { Left, Right }",
    ],
    &[
        "package \"x.y\" struct Inner { bool flag }",
        "package \"z\" struct Outer : Base { x.y.Inner inner } struct Base { @range: <-inf, 10] short s }",
    ],
];

fn check_all(check: impl Fn(&LinkedContext)) {
    for sources in VALID_SETS {
        let context = crate::utils::analyze_sources(sources).unwrap();
        check(&context);
    }
}

fn definitions(context: &LinkedContext) -> impl Iterator<Item = (usize, &TypeDefinition)> {
    context
        .packages()
        .iter()
        .enumerate()
        .flat_map(|(index, package)| package.body.elements.iter().map(move |def| (index, def)))
}

#[test]
fn every_reference_is_resolved_to_the_written_name() {
    check_all(|context| {
        for (package, def) in definitions(context) {
            let Some(def) = def.as_struct() else { continue };
            let package_name = &context.packages()[package].name;
            for variable in &def.body.variables {
                let Some(written) = variable.ty.referenced_name() else {
                    continue;
                };
                let expected = if written.contains('.') {
                    written.to_string()
                } else {
                    format!("{package_name}.{written}")
                };
                let target = variable.ty.resolved().expect("field type should be linked");
                assert_eq!(target.qualified_name(context.packages()), Some(expected));
            }
            assert_eq!(def.overrides.is_some(), def.overrides_def.is_some());
        }
    });
}

#[test]
fn parents_share_kind_with_children() {
    check_all(|context| {
        for (_, def) in definitions(context) {
            let Some(child) = def.as_struct() else { continue };
            if let Some(parent) = context.parent_of(child) {
                assert_eq!(child.is_class, parent.is_class, "{} : {}", child.name, parent.name);
            }
        }
    });
}

#[test]
fn inheritance_chains_terminate() {
    check_all(|context| {
        for (_, def) in definitions(context) {
            let Some(mut current) = def.as_struct() else { continue };
            let mut seen: FxHashSet<&str> = FxHashSet::default();
            while let Some(parent) = context.parent_of(current) {
                assert!(seen.insert(&parent.name), "cycle through {}", parent.name);
                current = parent;
            }
        }
    });
}

#[test]
fn field_names_are_unique_along_chains() {
    check_all(|context| {
        for (_, def) in definitions(context) {
            let Some(def) = def.as_struct() else { continue };
            let fields = context.all_fields(def);
            let unique: FxHashSet<&str> = fields.iter().map(|v| v.name.as_str()).collect();
            assert_eq!(unique.len(), fields.len(), "{}", def.name);
        }
    });
}

#[test]
fn type_table_covers_every_declaration() {
    check_all(|context| {
        let declared = definitions(context).count();
        assert_eq!(context.type_table().len(), declared);
        for (name, id) in context.type_table().iter() {
            assert_eq!(id.qualified_name(context.packages()).as_deref(), Some(name));
            assert!(context.definition(id).is_some());
        }
    });
}

#[test]
fn resolved_ids_point_into_the_package_list() {
    check_all(|context| {
        for (_, def) in definitions(context) {
            let Some(def) = def.as_struct() else { continue };
            for variable in &def.body.variables {
                if let VariableType::Generic(_) = variable.ty.innermost() {
                    assert_eq!(variable.ty.resolved(), None);
                }
                if let Some(id) = variable.ty.resolved() {
                    assert!(context.definition(id).is_some());
                }
            }
        }
    });
}

mod range_invariants {
    use sdl_ast::attributes::{Range, RangeError};

    #[test]
    fn bounds_are_ordered() {
        assert_eq!(Range::new(2.0, true, 1.0, true), Err(RangeError::InvertedBounds));
        let point = Range::new(1.0, true, 1.0, true).unwrap();
        assert!(point.lower_bound() <= point.upper_bound());
    }

    #[test]
    fn infinite_endpoints_are_exclusive() {
        assert_eq!(
            Range::new(f64::NEG_INFINITY, true, 0.0, true),
            Err(RangeError::InclusiveInfinity)
        );
        assert_eq!(
            Range::new(0.0, false, f64::INFINITY, true),
            Err(RangeError::InclusiveInfinity)
        );
        let open = Range::new(f64::NEG_INFINITY, false, f64::INFINITY, false).unwrap();
        assert!(open.has_integral_bounds());
    }

    #[test]
    fn parser_rejects_invalid_ranges() {
        for source in [
            "package \"p\" struct S { @range: [5, 1] int x }",
            "package \"p\" struct S { @range: [-inf, 1] int x }",
        ] {
            assert!(sdl_ast::parser::parse(source, "").is_err(), "{source}");
        }
    }
}

mod merge_invariants {
    use crate::utils::parse_source;
    use sdl::merge::merge;

    #[test]
    fn merge_is_idempotent_and_keeps_first_occurrence_order() {
        let packages = vec![
            parse_source("package \"b\" struct B1 {}"),
            parse_source("package \"a\" struct A1 {}"),
            parse_source("package \"b\" struct B2 {}"),
        ];
        let once = merge(packages);
        let names: Vec<&str> = once.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(once[0].body.elements.len(), 2);
        assert_eq!(merge(once.clone()), once);
    }
}
