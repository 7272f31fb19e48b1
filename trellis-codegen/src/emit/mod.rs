//! Emitters for the three sections of the generated module.

mod builders;
mod data;
mod enums;

pub use builders::emit_query_builder;
pub use data::emit_data_struct;
pub(crate) use data::fields_trait_name;
pub use enums::emit_enum;

use indexmap::IndexSet;
use trellis_core::validate_identifier;
use trellis_schema::{Schema, SchemaType, TypeKind, TypeRef};

use crate::{
    Result,
    closure::input_reachable_types,
    config::GeneratorConfig,
    naming::{NamingConvention, RUST_NAMING},
    resolver::{ResolvedType, TypeResolver},
};

/// Everything an emitter reads during one run.
#[derive(Debug)]
pub struct EmitContext<'a> {
    pub schema: &'a Schema,
    pub config: &'a GeneratorConfig,
    pub naming: NamingConvention,
    pub resolver: TypeResolver<'a>,
    /// Complex types that can appear inside an input object value.
    pub input_reachable: IndexSet<String>,
    /// Object, interface, union and input object types that get a struct.
    pub data_types: IndexSet<String>,
}

impl<'a> EmitContext<'a> {
    pub fn new(schema: &'a Schema, config: &'a GeneratorConfig) -> Self {
        let naming = RUST_NAMING.with_keywords(config.keywords);
        let input_reachable = input_reachable_types(schema);
        let data_types = schema
            .types()
            .filter(|ty| !ty.is_reserved())
            .filter(|ty| match ty.kind {
                TypeKind::InputObject => true,
                kind if kind.is_complex() => {
                    input_reachable.contains(&ty.name)
                        || !data::members(schema, config, ty).is_empty()
                }
                _ => false,
            })
            .map(|ty| ty.name.clone())
            .collect();
        Self {
            schema,
            config,
            naming,
            resolver: TypeResolver::new(schema, config, naming),
            input_reachable,
            data_types,
        }
    }

    /// Whether the named type behind `ty` exists in the generated module.
    /// Members referring to anything else are left out.
    pub fn is_emitted(&self, ty: &TypeRef) -> bool {
        let (kind, name) = ty.named_type();
        match kind {
            TypeKind::Scalar => true,
            TypeKind::Enum => !name.starts_with("__"),
            _ => self.data_types.contains(name),
        }
    }

    /// Visibility keyword for generated items.
    pub fn vis(&self) -> &'static str {
        self.config.visibility.as_str()
    }

    /// Validated struct name for an object, interface, union or input object.
    pub fn class_name(&self, ty: &SchemaType) -> Result<String> {
        let name = self.resolver.class_name(&ty.name);
        validate_identifier(&name, &format!("type '{}'", ty.name))?;
        Ok(name)
    }

    /// Validated enum name.
    pub fn enum_name(&self, ty: &SchemaType) -> Result<String> {
        let name = self.resolver.enum_name(&ty.name);
        validate_identifier(&name, &format!("enum '{}'", ty.name))?;
        Ok(name)
    }

    /// Validated query builder name.
    pub fn builder_name(&self, ty: &SchemaType) -> Result<String> {
        Ok(builder_name(&self.class_name(ty)?))
    }

    /// Doc comment text, when summaries are enabled and there is one.
    pub fn doc(&self, description: Option<&str>) -> Option<String> {
        if !self.config.docs.summary() {
            return None;
        }
        description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
    }

    /// Expression converting `value` (a place of type `ty`) into a `GraphQlValue`.
    /// Mapper-supplied types go through serde; everything else has a
    /// `ToGraphQlValue` impl in the runtime.
    pub fn value_expr(&self, ty: &ResolvedType, value: &str) -> String {
        if ty.mapped {
            format!("GraphQlValue::serialized(&{})", value)
        } else {
            format!("{}.to_graphql_value()", value)
        }
    }
}

pub(crate) fn builder_name(class_name: &str) -> String {
    format!("{}QueryBuilder", class_name.strip_prefix("r#").unwrap_or(class_name))
}

/// A Rust string literal for `s`.
pub(crate) fn literal(s: &str) -> String {
    format!("{:?}", s)
}

/// The `#[deprecated]` attribute body for a reason.
pub(crate) fn deprecated_attr(reason: Option<&str>) -> String {
    match reason.map(str::trim).filter(|r| !r.is_empty()) {
        Some(reason) => format!("deprecated = {}", literal(reason)),
        None => "deprecated".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DocMode, IdMapping, ScalarContext, ScalarTable};

    #[test]
    fn test_value_expr() {
        let schema = Schema::default();
        let config = GeneratorConfig {
            id: IdMapping::Untyped,
            ..GeneratorConfig::default()
        }
        .with_scalar_mapper(|ctx: &ScalarContext<'_>| match (ctx.scalar, ctx.list_item) {
            ("ID", true) => Some("std::net::Ipv4Addr".to_string()),
            ("DateTime", _) => Some("String".to_string()),
            _ => None,
        });
        let ctx = EmitContext::new(&schema, &config);
        let expr = |ty: TypeRef, value: &str| {
            let resolved = ctx.resolver.resolve(&ty, "Filter", "field").unwrap();
            ctx.value_expr(&resolved, value)
        };

        assert_eq!(expr(TypeRef::scalar("Int"), "self.count"), "self.count.to_graphql_value()");
        assert_eq!(
            expr(TypeRef::list(TypeRef::scalar("DateTime")), "value"),
            "GraphQlValue::serialized(&value)"
        );
        assert_eq!(expr(TypeRef::scalar("ID"), "self.id"), "self.id.to_graphql_value()");
        assert_eq!(
            expr(TypeRef::list(TypeRef::non_null(TypeRef::scalar("ID"))), "self.ids"),
            "GraphQlValue::serialized(&self.ids)"
        );
    }

    #[test]
    fn test_doc_modes() {
        let schema = Schema::default();
        let config = GeneratorConfig {
            docs: DocMode::Description,
            ..GeneratorConfig::default()
        }
        .with_scalar_mapper(ScalarTable::new());
        let ctx = EmitContext::new(&schema, &config);
        assert_eq!(ctx.doc(Some("A user")), None);

        let config = GeneratorConfig::default();
        let ctx = EmitContext::new(&schema, &config);
        assert_eq!(ctx.doc(Some("  A user\n")).as_deref(), Some("A user"));
        assert_eq!(ctx.doc(Some("   ")), None);
    }

    #[test]
    fn test_is_emitted() {
        use trellis_schema::Field;

        let schema = Schema::new([
            SchemaType::object("User").field(Field::new("id", TypeRef::scalar("ID"))),
            SchemaType::object("Legacy").field(Field::new("id", TypeRef::scalar("ID")).deprecated(None)),
            SchemaType::enumeration("__TypeKind"),
        ])
        .unwrap();
        let config = GeneratorConfig {
            include_deprecated_fields: false,
            ..GeneratorConfig::default()
        };
        let ctx = EmitContext::new(&schema, &config);

        assert!(ctx.is_emitted(&TypeRef::list(TypeRef::object("User"))));
        assert!(!ctx.is_emitted(&TypeRef::object("Legacy")));
        assert!(!ctx.is_emitted(&TypeRef::named(TypeKind::Enum, "__TypeKind")));
        assert!(ctx.is_emitted(&TypeRef::scalar("DateTime")));
    }

    #[test]
    fn test_deprecated_attr() {
        assert_eq!(deprecated_attr(None), "deprecated");
        assert_eq!(deprecated_attr(Some("")), "deprecated");
        assert_eq!(
            deprecated_attr(Some("use \"uid\"")),
            "deprecated = \"use \\\"uid\\\"\""
        );
    }
}
