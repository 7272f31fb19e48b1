//! Data and input struct emission.
//!
//! Output types become structs whose fields are all `Option` (a response
//! only carries selected fields); input objects honour NON_NULL. Input
//! objects, and output types that can occur inside one, also expose their
//! properties for argument serialization. Interfaces become a getter trait
//! that implementing objects conform to.

use tracing::{trace, warn};
use trellis_core::validate_identifier;
use trellis_schema::{Schema, SchemaType, TypeKind, TypeRef};

use super::{EmitContext, deprecated_attr, literal};
use crate::{
    Result,
    ast::{Const, Field, Fn, Impl, Param, Struct, Trait},
    builder::CodeBuilder,
    config::GeneratorConfig,
    naming::UniqueNames,
    resolver::ResolvedType,
};

/// A field or input field as seen by the data emitter.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Member<'s> {
    pub name: &'s str,
    pub description: Option<&'s str>,
    pub ty: &'s TypeRef,
    /// Set for deprecated fields, holding the reason if one was given.
    pub deprecated: Option<Option<&'s str>>,
}

/// The members a type contributes to its struct, in declared order.
///
/// Unions take the fields of their possible types, first occurrence of a
/// name winning. Deprecated fields are dropped unless configured otherwise.
pub(crate) fn members<'s>(
    schema: &'s Schema,
    config: &GeneratorConfig,
    ty: &'s SchemaType,
) -> Vec<Member<'s>> {
    let fields = |owner: &'s SchemaType| {
        owner.fields.iter().map(|f| Member {
            name: &f.name,
            description: f.description.as_deref(),
            ty: &f.ty,
            deprecated: f.is_deprecated.then_some(f.deprecation_reason.as_deref()),
        })
    };

    let all: Vec<Member<'s>> = match ty.kind {
        TypeKind::InputObject => ty
            .input_fields
            .iter()
            .map(|f| Member {
                name: &f.name,
                description: f.description.as_deref(),
                ty: &f.ty,
                deprecated: None,
            })
            .collect(),
        TypeKind::Union => {
            let mut merged: Vec<Member<'s>> = Vec::new();
            for possible in ty.possible_types.iter().filter_map(|p| schema.get(p)) {
                for member in fields(possible) {
                    if !merged.iter().any(|m| m.name == member.name) {
                        merged.push(member);
                    }
                }
            }
            merged
        }
        _ => fields(ty).collect(),
    };

    all.into_iter()
        .filter(|m| config.include_deprecated_fields || m.deprecated.is_none())
        .collect()
}

/// A member with its Rust field name and type.
struct DataField<'s> {
    member: Member<'s>,
    ident: String,
    rust_type: String,
    resolved: ResolvedType,
}

fn data_fields<'s>(ctx: &'s EmitContext<'_>, ty: &'s SchemaType) -> Result<Vec<DataField<'s>>> {
    let always_optional = ty.kind != TypeKind::InputObject;
    let mut names = UniqueNames::new();
    let mut fields = Vec::new();

    for member in members(ctx.schema, ctx.config, ty) {
        if !ctx.is_emitted(member.ty) {
            trace!(owner = %ty.name, field = member.name, "dropping field of a type that is not generated");
            continue;
        }
        let resolved = ctx.resolver.resolve(member.ty, &ty.name, member.name)?;
        let ident = names.claim(&ctx.naming.member_name(member.name));
        validate_identifier(&ident, &format!("field '{}.{}'", ty.name, member.name))?;
        fields.push(DataField {
            member,
            ident,
            rust_type: resolved.field_type(always_optional),
            resolved,
        });
    }
    Ok(fields)
}

/// Emit the struct for a type, plus its input, description and interface
/// impls. Returns false when the type has nothing to generate.
pub fn emit_data_struct(
    ctx: &EmitContext<'_>,
    ty: &SchemaType,
    out: &mut CodeBuilder,
) -> Result<bool> {
    if !ctx.data_types.contains(&ty.name) {
        trace!(graphql = %ty.name, "skipping type without fields");
        return Ok(false);
    }

    let name = ctx.class_name(ty)?;
    let is_input = ty.kind == TypeKind::InputObject;
    let serializable = is_input || ctx.input_reachable.contains(&ty.name);
    let fields = data_fields(ctx, ty)?;
    trace!(graphql = %ty.name, rust = %name, fields = fields.len(), "emitting struct");

    let mut rust_struct = Struct::new(&name).vis(ctx.vis()).derive("Debug").derive("Clone");
    if !is_input {
        rust_struct = rust_struct.derive("Default");
    }
    rust_struct = rust_struct.derive("Serialize").derive("Deserialize");
    if let Some(doc) = ctx.doc(ty.description.as_deref()) {
        rust_struct = rust_struct.doc(doc);
    }

    for field in &fields {
        let mut rust_field = Field::new(&field.ident, &field.rust_type).vis(ctx.vis());
        if let Some(doc) = ctx.doc(field.member.description) {
            rust_field = rust_field.doc(doc);
        }
        if let Some(reason) = field.member.deprecated {
            rust_field = rust_field.attr(deprecated_attr(reason));
        }
        if field.ident.strip_prefix("r#").unwrap_or(&field.ident) != field.member.name {
            rust_field = rust_field.attr(format!("serde(rename = {})", literal(field.member.name)));
        }
        rust_struct = rust_struct.field(rust_field);
    }
    out.emit(&rust_struct);

    if ctx.config.docs.description() {
        out.push_blank().emit(&descriptions(ctx, &name, ty, &fields));
    }

    if serializable {
        out.push_blank()
            .emit(&properties(ctx, &name, &fields))
            .push_blank()
            .emit(
                &Impl::new(&name).for_trait("ToGraphQlValue").method(
                    Fn::new("to_graphql_value")
                        .private()
                        .param(Param::receiver("&self"))
                        .returns("GraphQlValue")
                        .body_line("GraphQlValue::from_properties(self.properties())"),
                ),
            );
    }

    match ty.kind {
        TypeKind::Interface if !fields.is_empty() => {
            let trait_name = fields_trait_name(&name);
            let mut getters = Trait::new(&trait_name).vis(ctx.vis());
            if ctx.config.docs.summary() {
                getters = getters.doc(format!("Fields shared by implementors of `{}`.", ty.name));
            }
            for field in &fields {
                getters = getters.method(getter(field));
            }
            out.push_blank()
                .emit(&getters)
                .push_blank()
                .emit(&conformance(&trait_name, &name, &fields, &fields));
        }
        TypeKind::Object => {
            for interface in &ty.interfaces {
                if let Some(conforming) = object_conformance(ctx, ty, &name, &fields, interface)? {
                    out.push_blank().emit(&conforming);
                }
            }
        }
        _ => {}
    }

    Ok(true)
}

pub(crate) fn fields_trait_name(class_name: &str) -> String {
    format!("{}Fields", class_name.strip_prefix("r#").unwrap_or(class_name))
}

fn getter(field: &DataField<'_>) -> Fn {
    Fn::new(&field.ident)
        .param(Param::receiver("&self"))
        .returns(format!("&{}", field.rust_type))
}

fn conformance(
    trait_name: &str,
    type_name: &str,
    interface_fields: &[DataField<'_>],
    own_fields: &[DataField<'_>],
) -> Impl {
    interface_fields
        .iter()
        .zip(own_fields)
        .fold(
            Impl::new(type_name).for_trait(trait_name),
            |block, (interface_field, own_field)| {
                block.method(
                    getter(interface_field)
                        .private()
                        .body_line(format!("&self.{}", own_field.ident)),
                )
            },
        )
}

/// The `impl <Interface>Fields for <Object>` block, or None when the object
/// cannot conform: the interface generated no trait, or a field is missing
/// or has a different type.
fn object_conformance(
    ctx: &EmitContext<'_>,
    ty: &SchemaType,
    name: &str,
    fields: &[DataField<'_>],
    interface: &str,
) -> Result<Option<Impl>> {
    let Some(interface_ty) = ctx
        .schema
        .get(interface)
        .filter(|i| i.kind == TypeKind::Interface && ctx.data_types.contains(&i.name))
    else {
        return Ok(None);
    };
    let interface_fields = data_fields(ctx, interface_ty)?;
    if interface_fields.is_empty() {
        return Ok(None);
    }

    let mut matched = Vec::with_capacity(interface_fields.len());
    for interface_field in &interface_fields {
        let own = fields
            .iter()
            .find(|f| f.member.name == interface_field.member.name);
        match own {
            Some(own) if own.rust_type == interface_field.rust_type => matched.push(own),
            _ => {
                warn!(
                    object = %ty.name,
                    interface,
                    field = interface_field.member.name,
                    "field type differs from the interface; skipping conformance"
                );
                return Ok(None);
            }
        }
    }

    let trait_name = fields_trait_name(&ctx.class_name(interface_ty)?);
    let block = interface_fields.iter().zip(matched).fold(
        Impl::new(name).for_trait(&trait_name),
        |block, (interface_field, own)| {
            block.method(
                getter(interface_field)
                    .private()
                    .body_line(format!("&self.{}", own.ident)),
            )
        },
    );
    Ok(Some(block))
}

fn properties(ctx: &EmitContext<'_>, name: &str, fields: &[DataField<'_>]) -> Impl {
    let body = if fields.is_empty() {
        "Vec::new()".to_string()
    } else {
        let entries: Vec<String> = fields
            .iter()
            .map(|field| {
                format!(
                    "    GraphQlInputProperty::new({}, {}),",
                    literal(field.member.name),
                    ctx.value_expr(&field.resolved, &format!("self.{}", field.ident))
                )
            })
            .collect();
        format!("vec![\n{}\n]", entries.join("\n"))
    };

    Impl::new(name).for_trait("GraphQlInputObject").method(
        Fn::new("properties")
            .private()
            .param(Param::receiver("&self"))
            .returns("Vec<GraphQlInputProperty>")
            .body(body),
    )
}

fn descriptions(
    ctx: &EmitContext<'_>,
    name: &str,
    ty: &SchemaType,
    fields: &[DataField<'_>],
) -> Impl {
    let optional = |text: Option<&str>| match text {
        Some(text) => format!("Some({})", literal(text)),
        None => "None".to_string(),
    };

    let field_descriptions = if fields.is_empty() {
        "&[]".to_string()
    } else {
        let entries: Vec<String> = fields
            .iter()
            .map(|field| {
                format!(
                    "    ({}, {}),",
                    literal(field.member.name),
                    optional(field.member.description)
                )
            })
            .collect();
        format!("&[\n{}\n]", entries.join("\n"))
    };

    Impl::new(name)
        .constant(
            Const::new(
                "DESCRIPTION",
                "Option<&'static str>",
                optional(ty.description.as_deref()),
            )
            .vis(ctx.vis()),
        )
        .constant(
            Const::new(
                "FIELD_DESCRIPTIONS",
                "&'static [(&'static str, Option<&'static str>)]",
                field_descriptions,
            )
            .vis(ctx.vis()),
        )
}

#[cfg(test)]
mod tests {
    use trellis_schema::{Field as SchemaField, InputValue};

    use super::*;
    use crate::config::DocMode;

    fn emit_all(schema: &Schema, config: &GeneratorConfig) -> String {
        let ctx = EmitContext::new(schema, config);
        let mut out = CodeBuilder::rust();
        for ty in schema.types() {
            if emit_data_struct(&ctx, ty, &mut out).unwrap() {
                out.push_blank();
            }
        }
        out.build()
    }

    fn string() -> TypeRef {
        TypeRef::scalar("String")
    }

    #[test]
    fn test_input_object_properties_in_declared_order() {
        let schema = Schema::new([SchemaType::input_object("Filter")
            .input_field(InputValue::new("a", TypeRef::non_null(string())))
            .input_field(InputValue::new("b", TypeRef::scalar("Int")))
            .input_field(InputValue::new("c", TypeRef::list(string())))])
        .unwrap();
        let code = emit_all(&schema, &GeneratorConfig::default());

        insta::assert_snapshot!(code, @r#"
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct Filter {
            pub a: String,
            pub b: Option<i32>,
            pub c: Option<Vec<Option<String>>>,
        }

        impl GraphQlInputObject for Filter {
            fn properties(&self) -> Vec<GraphQlInputProperty> {
                vec![
                    GraphQlInputProperty::new("a", self.a.to_graphql_value()),
                    GraphQlInputProperty::new("b", self.b.to_graphql_value()),
                    GraphQlInputProperty::new("c", self.c.to_graphql_value()),
                ]
            }
        }

        impl ToGraphQlValue for Filter {
            fn to_graphql_value(&self) -> GraphQlValue {
                GraphQlValue::from_properties(self.properties())
            }
        }
        "#);
    }

    #[test]
    fn test_output_fields_are_optional_and_boxed() {
        let schema = Schema::new([SchemaType::object("User")
            .description("A person")
            .field(SchemaField::new("id", TypeRef::non_null(TypeRef::scalar("ID"))))
            .field(SchemaField::new("bestFriend", TypeRef::object("User")))
            .field(SchemaField::new(
                "type",
                TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::object("User")))),
            ))])
        .unwrap();
        let code = emit_all(&schema, &GeneratorConfig::default());

        insta::assert_snapshot!(code, @r#"
        /// A person
        #[derive(Debug, Clone, Default, Serialize, Deserialize)]
        pub struct User {
            pub id: Option<String>,
            #[serde(rename = "bestFriend")]
            pub best_friend: Option<Box<User>>,
            pub r#type: Option<Vec<User>>,
        }
        "#);
    }

    #[test]
    fn test_deprecated_fields() {
        let schema = Schema::new([SchemaType::object("User")
            .field(SchemaField::new("name", string()))
            .field(SchemaField::new("login", string()).deprecated(Some("use name")))])
        .unwrap();

        let code = emit_all(&schema, &GeneratorConfig::default());
        assert!(code.contains("    #[deprecated = \"use name\"]\n    pub login: Option<String>,\n"));

        let config = GeneratorConfig {
            include_deprecated_fields: false,
            ..GeneratorConfig::default()
        };
        let code = emit_all(&schema, &config);
        assert!(!code.contains("login"));
        assert!(code.contains("pub name: Option<String>,"));
    }

    #[test]
    fn test_type_without_fields_is_skipped() {
        let schema = Schema::new([
            SchemaType::object("Empty"),
            SchemaType::input_object("EmptyInput"),
        ])
        .unwrap();
        let code = emit_all(&schema, &GeneratorConfig::default());
        assert!(!code.contains("struct Empty {"));
        assert!(code.contains("pub struct EmptyInput {}"));
    }

    #[test]
    fn test_input_reachable_object_gets_properties() {
        let schema = Schema::new([
            SchemaType::input_object("Filter")
                .input_field(InputValue::new("owner", TypeRef::object("User"))),
            SchemaType::object("User").field(SchemaField::new("name", string())),
            SchemaType::object("Other").field(SchemaField::new("name", string())),
        ])
        .unwrap();
        let code = emit_all(&schema, &GeneratorConfig::default());
        assert!(code.contains("impl GraphQlInputObject for User {"));
        assert!(!code.contains("impl GraphQlInputObject for Other {"));
        assert!(code.contains("pub owner: Option<Box<User>>,"));
    }

    #[test]
    fn test_interface_trait_and_conformance() {
        let schema = Schema::new([
            SchemaType::interface("Node")
                .field(SchemaField::new("id", TypeRef::non_null(TypeRef::scalar("ID"))))
                .possible_type("User"),
            SchemaType::object("User")
                .implements("Node")
                .field(SchemaField::new("name", string()))
                .field(SchemaField::new("id", TypeRef::non_null(TypeRef::scalar("ID")))),
            SchemaType::object("Post")
                .implements("Node")
                .field(SchemaField::new("id", TypeRef::scalar("Int"))),
        ])
        .unwrap();
        let code = emit_all(&schema, &GeneratorConfig::default());

        assert!(code.contains(
            "/// Fields shared by implementors of `Node`.\npub trait NodeFields {\n    fn id(&self) -> &Option<String>;\n}\n"
        ));
        assert!(code.contains(
            "impl NodeFields for Node {\n    fn id(&self) -> &Option<String> {\n        &self.id\n    }\n}\n"
        ));
        assert!(code.contains(
            "impl NodeFields for User {\n    fn id(&self) -> &Option<String> {\n        &self.id\n    }\n}\n"
        ));
        assert!(!code.contains("impl NodeFields for Post"));
    }

    #[test]
    fn test_union_merges_member_fields() {
        let schema = Schema::new([
            SchemaType::union("SearchResult")
                .possible_type("User")
                .possible_type("Post"),
            SchemaType::object("User")
                .field(SchemaField::new("id", string()))
                .field(SchemaField::new("name", string())),
            SchemaType::object("Post")
                .field(SchemaField::new("id", string()))
                .field(SchemaField::new("title", string())),
        ])
        .unwrap();
        let code = emit_all(&schema, &GeneratorConfig::default());
        assert!(code.contains(
            "pub struct SearchResult {\n    pub id: Option<String>,\n    pub name: Option<String>,\n    pub title: Option<String>,\n}\n"
        ));
    }

    #[test]
    fn test_description_constants() {
        let schema = Schema::new([SchemaType::object("User")
            .description("A person")
            .field(SchemaField::new("name", string()).description("Display name"))
            .field(SchemaField::new("age", TypeRef::scalar("Int")))])
        .unwrap();
        let config = GeneratorConfig {
            docs: DocMode::Description,
            ..GeneratorConfig::default()
        };
        let code = emit_all(&schema, &config);

        assert!(!code.contains("///"));
        insta::assert_snapshot!(code, @r#"
        #[derive(Debug, Clone, Default, Serialize, Deserialize)]
        pub struct User {
            pub name: Option<String>,
            pub age: Option<i32>,
        }

        impl User {
            pub const DESCRIPTION: Option<&'static str> = Some("A person");
            pub const FIELD_DESCRIPTIONS: &'static [(&'static str, Option<&'static str>)] = &[
                ("name", Some("Display name")),
                ("age", None),
            ];
        }
        "#);
    }

    #[test]
    fn test_custom_scalar_properties_use_serde() {
        let schema = Schema::new([SchemaType::input_object("Window")
            .input_field(InputValue::new("from", TypeRef::scalar("DateTime")))])
        .unwrap();
        let config = GeneratorConfig::default().with_scalar_mapper(
            crate::config::ScalarTable::new().insert("DateTime", "String"),
        );
        let code = emit_all(&schema, &config);
        assert!(code.contains(
            "GraphQlInputProperty::new(\"from\", GraphQlValue::serialized(&self.from)),"
        ));
    }

    #[test]
    fn test_list_item_fallback_properties_use_serde() {
        let schema = Schema::new([SchemaType::input_object("Filter").input_field(InputValue::new(
            "ids",
            TypeRef::list(TypeRef::non_null(TypeRef::scalar("ID"))),
        ))])
        .unwrap();
        let config = GeneratorConfig {
            id: crate::config::IdMapping::Untyped,
            ..GeneratorConfig::default()
        }
        .with_scalar_mapper(|ctx: &crate::config::ScalarContext<'_>| {
            ctx.list_item.then(|| "std::net::Ipv4Addr".to_string())
        });
        let code = emit_all(&schema, &config);
        assert!(code.contains("pub ids: Option<Vec<std::net::Ipv4Addr>>,"));
        assert!(code.contains(
            "GraphQlInputProperty::new(\"ids\", GraphQlValue::serialized(&self.ids)),"
        ));
    }
}
