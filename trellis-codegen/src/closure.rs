//! Reference closure analysis.
//!
//! Finds the output types (objects, interfaces, unions) that can appear
//! inside a value of a given type. The type graph may contain cycles, so
//! traversal keeps an explicit visited set per call.

use std::collections::HashSet;

use indexmap::IndexSet;
use trellis_schema::{Schema, TypeKind};

/// Complex type names reachable from `root` through field, input field and
/// possible-type references, in first-reached order.
///
/// `root` itself is only included when a cycle leads back to it. Names not
/// defined in the schema are never returned.
pub fn reachable_types(schema: &Schema, root: &str) -> IndexSet<String> {
    let mut reached = IndexSet::new();
    let mut visited: HashSet<&str> = HashSet::from([root]);
    let mut pending = vec![root];

    while let Some(name) = pending.pop() {
        let Some(ty) = schema.get(name) else {
            continue;
        };

        let targets = ty
            .member_types()
            .map(|(_, ty_ref)| ty_ref.type_name())
            .chain(ty.possible_types.iter().map(String::as_str));

        for target in targets {
            let Some(target_ty) = schema.get(target) else {
                continue;
            };
            if target_ty.kind.is_complex() {
                reached.insert(target.to_string());
            }
            let descend = target_ty.kind.is_complex() || target_ty.kind == TypeKind::InputObject;
            if descend && visited.insert(target) {
                pending.push(target);
            }
        }
    }

    reached
}

/// Complex types reachable from any input object of the schema.
///
/// These need the input-serialization capability because a value of them
/// can end up inside an argument.
pub fn input_reachable_types(schema: &Schema) -> IndexSet<String> {
    schema
        .types_of_kind(TypeKind::InputObject)
        .filter(|ty| !ty.is_reserved())
        .flat_map(|ty| reachable_types(schema, &ty.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use trellis_schema::{Field, InputValue, SchemaType, TypeRef};

    use super::*;

    fn input(name: &str) -> TypeRef {
        TypeRef::named(TypeKind::InputObject, name)
    }

    #[test]
    fn test_terminates_on_cycles() {
        let schema = Schema::new([
            SchemaType::input_object("Filter").input_field(InputValue::new("owner", TypeRef::object("User"))),
            SchemaType::object("User")
                .field(Field::new("friends", TypeRef::list(TypeRef::object("User"))))
                .field(Field::new("team", TypeRef::non_null(TypeRef::object("Team")))),
            SchemaType::object("Team").field(Field::new("lead", TypeRef::object("User"))),
        ])
        .unwrap();

        let reached = reachable_types(&schema, "Filter");
        assert_eq!(
            reached.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["User", "Team"]
        );

        let from_user = reachable_types(&schema, "User");
        assert!(from_user.contains("User"));
        assert!(from_user.contains("Team"));
    }

    #[test]
    fn test_only_defined_complex_names() {
        let schema = Schema::new([
            SchemaType::input_object("Filter")
                .input_field(InputValue::new("nested", input("Nested")))
                .input_field(InputValue::new("ghost", TypeRef::object("Ghost")))
                .input_field(InputValue::new("name", TypeRef::scalar("String"))),
            SchemaType::input_object("Nested")
                .input_field(InputValue::new("back", input("Filter")))
                .input_field(InputValue::new("shape", TypeRef::named(TypeKind::Union, "Shape"))),
            SchemaType::union("Shape").possible_type("Circle"),
            SchemaType::object("Circle"),
        ])
        .unwrap();

        let reached = reachable_types(&schema, "Filter");
        assert_eq!(
            reached.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Shape", "Circle"]
        );
        assert!(reached.iter().all(|name| schema.get(name).is_some()));
    }

    #[test]
    fn test_input_reachable_unions_all_inputs() {
        let schema = Schema::new([
            SchemaType::input_object("A").input_field(InputValue::new("x", TypeRef::object("X"))),
            SchemaType::input_object("B").input_field(InputValue::new("y", TypeRef::object("Y"))),
            SchemaType::input_object("__Private")
                .input_field(InputValue::new("z", TypeRef::object("Z"))),
            SchemaType::object("X"),
            SchemaType::object("Y"),
            SchemaType::object("Z"),
        ])
        .unwrap();

        let reached = input_reachable_types(&schema);
        assert_eq!(
            reached.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["X", "Y"]
        );
    }
}
