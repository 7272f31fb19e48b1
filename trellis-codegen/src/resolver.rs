//! Type reference resolution.
//!
//! Maps a wrapped GraphQL type reference to a Rust type expression plus
//! its nullability. Wrappers compose: `[Int!]` is `Vec<i32>` and may itself
//! be absent, `[Int]!` is a present `Vec<Option<i32>>`.

use trellis_schema::{Schema, TypeKind, TypeRef};

use crate::{
    Error, Result,
    config::{GeneratorConfig, IdMapping, ScalarContext},
    naming::NamingConvention,
};

/// The untyped placeholder type.
pub const UNTYPED: &str = "serde_json::Value";

/// A resolved Rust type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// The type expression without the outer `Option`.
    pub expr: String,
    /// The reference had no leading NON_NULL.
    pub nullable: bool,
    pub is_list: bool,
    /// The innermost named type is an object, interface, union or input object.
    pub is_composite: bool,
    /// The innermost type came from the scalar mapper. Such user types only
    /// promise serde, so values convert through their serialized form.
    pub mapped: bool,
}

impl ResolvedType {
    /// The expression with its own nullability applied.
    pub fn to_rust(&self) -> String {
        if self.nullable {
            format!("Option<{}>", self.expr)
        } else {
            self.expr.clone()
        }
    }

    /// Non-list composites are boxed so recursive structs have a finite size.
    pub fn needs_box(&self) -> bool {
        self.is_composite && !self.is_list
    }

    /// The type of a struct field. `always_optional` is set for output
    /// types, where an unselected field is missing from the response.
    pub fn field_type(&self, always_optional: bool) -> String {
        let inner = if self.needs_box() {
            format!("Box<{}>", self.expr)
        } else {
            self.expr.clone()
        };
        if self.nullable || always_optional {
            format!("Option<{}>", inner)
        } else {
            inner
        }
    }
}

/// Resolves type references against one schema and configuration.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    schema: &'a Schema,
    config: &'a GeneratorConfig,
    naming: NamingConvention,
}

impl<'a> TypeResolver<'a> {
    pub fn new(schema: &'a Schema, config: &'a GeneratorConfig, naming: NamingConvention) -> Self {
        Self {
            schema,
            config,
            naming,
        }
    }

    /// Resolve the type of `owner.member`.
    pub fn resolve(&self, ty: &TypeRef, owner: &str, member: &str) -> Result<ResolvedType> {
        self.resolve_wrapped(ty, owner, member, false)
    }

    fn resolve_wrapped(
        &self,
        ty: &TypeRef,
        owner: &str,
        member: &str,
        list_item: bool,
    ) -> Result<ResolvedType> {
        let nullable = !ty.is_non_null();
        match ty.unwrap_non_null() {
            TypeRef::NonNull(_) => Err(Error::malformed(owner, member)),
            TypeRef::List(item) => {
                let item = self.resolve_list_item(item, owner, member)?;
                Ok(ResolvedType {
                    expr: format!("Vec<{}>", item.to_rust()),
                    nullable,
                    is_list: true,
                    is_composite: item.is_composite,
                    mapped: item.mapped,
                })
            }
            TypeRef::Named { kind, name } => {
                let (expr, mapped) = self.resolve_named(*kind, name, owner, member, list_item)?;
                Ok(ResolvedType {
                    expr,
                    nullable,
                    is_list: false,
                    is_composite: matches!(
                        kind,
                        TypeKind::Object | TypeKind::Interface | TypeKind::Union | TypeKind::InputObject
                    ),
                    mapped,
                })
            }
        }
    }

    /// List elements prefer a specific mapped type over the untyped placeholder.
    fn resolve_list_item(&self, item: &TypeRef, owner: &str, member: &str) -> Result<ResolvedType> {
        let mut resolved = self.resolve_wrapped(item, owner, member, true)?;
        if resolved.expr == UNTYPED
            && let (TypeKind::Scalar, scalar) = item.named_type()
        {
            let ctx = ScalarContext::new(scalar, owner, member).list_item();
            if let Some(specific) = self.config.map_scalar(&ctx).filter(|t| t != UNTYPED) {
                resolved.expr = specific;
                resolved.mapped = true;
            }
        }
        Ok(resolved)
    }

    fn resolve_named(
        &self,
        kind: TypeKind,
        name: &str,
        owner: &str,
        member: &str,
        list_item: bool,
    ) -> Result<(String, bool)> {
        match kind {
            TypeKind::Object | TypeKind::Interface | TypeKind::Union | TypeKind::InputObject => {
                self.ensure_defined(name, owner, member)?;
                Ok((self.class_name(name), false))
            }
            TypeKind::Enum => {
                self.ensure_defined(name, owner, member)?;
                Ok((self.enum_name(name), false))
            }
            TypeKind::Scalar => {
                let mut ctx = ScalarContext::new(name, owner, member);
                ctx.list_item = list_item;
                self.resolve_scalar(&ctx)
            }
            TypeKind::List | TypeKind::NonNull => Err(Error::malformed(owner, member)),
        }
    }

    /// The Rust type of a scalar and whether the mapper supplied it.
    fn resolve_scalar(&self, ctx: &ScalarContext<'_>) -> Result<(String, bool)> {
        let builtin = match ctx.scalar {
            "Int" => Some(self.config.integer.rust_type()),
            "Float" => Some(self.config.float.rust_type()),
            "String" => Some("String"),
            "Boolean" => Some("bool"),
            "ID" => match self.config.id {
                IdMapping::String => Some("String"),
                IdMapping::Uuid => Some("uuid::Uuid"),
                IdMapping::Untyped => Some(UNTYPED),
                IdMapping::Custom => None,
            },
            _ => None,
        };
        if let Some(builtin) = builtin {
            return Ok((builtin.to_string(), false));
        }
        let key = if ctx.scalar == "ID" { "mapping.id" } else { "scalars" };
        let mapped = self
            .config
            .map_scalar(ctx)
            .ok_or_else(|| Error::unmapped_scalar(ctx.scalar, ctx.owner, ctx.member, key))?;
        Ok((mapped, true))
    }

    fn ensure_defined(&self, name: &str, owner: &str, member: &str) -> Result<()> {
        if self.schema.get(name).is_some() {
            Ok(())
        } else {
            Err(Box::new(Error::UnknownType {
                name: name.to_string(),
                owner: owner.to_string(),
                member: member.to_string(),
            }))
        }
    }

    /// Rust name of the struct generated for an object, interface, union or
    /// input object: prefix + (rename or PascalCase name) + suffix.
    pub fn class_name(&self, name: &str) -> String {
        let base = self.renamed(name);
        self.naming.safe_name(&format!(
            "{}{}{}",
            self.config.prefix, base, self.config.suffix
        ))
    }

    /// Rust name of a generated enum. Renames apply, prefix and suffix do not.
    pub fn enum_name(&self, name: &str) -> String {
        match self.config.renames.get(name) {
            Some(renamed) => self.naming.safe_name(renamed),
            None => self.naming.type_name(name),
        }
    }

    fn renamed(&self, name: &str) -> String {
        match self.config.renames.get(name) {
            Some(renamed) => renamed.clone(),
            None => (self.naming.type_to_name)(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use trellis_schema::{Field, SchemaType};

    use super::*;
    use crate::config::{FloatMapping, IntegerMapping, ScalarTable};
    use crate::naming::RUST_NAMING;

    fn schema() -> Schema {
        Schema::new([
            SchemaType::object("User").field(Field::new("id", TypeRef::scalar("ID"))),
            SchemaType::enumeration("Role"),
            SchemaType::input_object("user_filter"),
        ])
        .unwrap()
    }

    fn resolve(config: &GeneratorConfig, ty: TypeRef) -> Result<ResolvedType> {
        let schema = schema();
        TypeResolver::new(&schema, config, RUST_NAMING).resolve(&ty, "User", "field")
    }

    fn rust(config: &GeneratorConfig, ty: TypeRef) -> String {
        resolve(config, ty).unwrap().to_rust()
    }

    #[test]
    fn test_builtin_scalars() {
        let config = GeneratorConfig::default();
        assert_eq!(rust(&config, TypeRef::scalar("Int")), "Option<i32>");
        assert_eq!(rust(&config, TypeRef::scalar("Float")), "Option<f64>");
        assert_eq!(
            rust(&config, TypeRef::non_null(TypeRef::scalar("String"))),
            "String"
        );
        assert_eq!(
            rust(&config, TypeRef::non_null(TypeRef::scalar("Boolean"))),
            "bool"
        );
        assert_eq!(rust(&config, TypeRef::non_null(TypeRef::scalar("ID"))), "String");
    }

    #[test]
    fn test_width_and_representation_choices() {
        let config = GeneratorConfig {
            integer: IntegerMapping::Int64,
            float: FloatMapping::Decimal,
            id: IdMapping::Uuid,
            ..GeneratorConfig::default()
        };
        assert_eq!(rust(&config, TypeRef::non_null(TypeRef::scalar("Int"))), "i64");
        assert_eq!(
            rust(&config, TypeRef::non_null(TypeRef::scalar("Float"))),
            "rust_decimal::Decimal"
        );
        assert_eq!(
            rust(&config, TypeRef::non_null(TypeRef::scalar("ID"))),
            "uuid::Uuid"
        );
    }

    #[test]
    fn test_list_nullability_is_tracked_separately() {
        let config = GeneratorConfig::default();
        let ty = TypeRef::non_null(TypeRef::list(TypeRef::scalar("Int")));
        assert_eq!(rust(&config, ty), "Vec<Option<i32>>");

        let ty = TypeRef::list(TypeRef::non_null(TypeRef::scalar("Int")));
        assert_eq!(rust(&config, ty), "Option<Vec<i32>>");

        let ty = TypeRef::list(TypeRef::list(TypeRef::non_null(TypeRef::object("User"))));
        let resolved = resolve(&config, ty).unwrap();
        assert_eq!(resolved.to_rust(), "Option<Vec<Option<Vec<User>>>>");
        assert!(resolved.is_list);
        assert!(resolved.is_composite);
        assert!(!resolved.needs_box());
    }

    #[test]
    fn test_named_types_and_renames() {
        let config = GeneratorConfig {
            suffix: "Model".to_string(),
            ..GeneratorConfig::default()
        }
        .rename("Role", "UserRole");

        let user = resolve(&config, TypeRef::object("User")).unwrap();
        assert_eq!(user.to_rust(), "Option<UserModel>");
        assert_eq!(user.field_type(false), "Option<Box<UserModel>>");

        let filter = TypeRef::non_null(TypeRef::named(TypeKind::InputObject, "user_filter"));
        let filter = resolve(&config, filter).unwrap();
        assert_eq!(filter.field_type(false), "Box<UserFilterModel>");
        assert_eq!(filter.field_type(true), "Option<Box<UserFilterModel>>");

        let role = TypeRef::non_null(TypeRef::named(TypeKind::Enum, "Role"));
        assert_eq!(rust(&config, role), "UserRole");
    }

    #[test]
    fn test_custom_scalar_without_mapper_fails() {
        let config = GeneratorConfig::default();
        let err = resolve(&config, TypeRef::scalar("DateTime")).unwrap_err();
        match *err {
            Error::UnmappedScalar {
                ref scalar,
                ref owner,
                ref member,
                key,
                ..
            } => {
                assert_eq!(scalar, "DateTime");
                assert_eq!(owner, "User");
                assert_eq!(member, "field");
                assert_eq!(key, "scalars");
            }
            ref other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_custom_scalar_and_custom_id() {
        let config = GeneratorConfig {
            id: IdMapping::Custom,
            ..GeneratorConfig::default()
        };
        let err = resolve(&config, TypeRef::scalar("ID")).unwrap_err();
        assert!(matches!(*err, Error::UnmappedScalar { key: "mapping.id", .. }));

        let config = config.with_scalar_mapper(
            ScalarTable::new()
                .insert("ID", "u64")
                .insert("DateTime", "String"),
        );
        assert_eq!(rust(&config, TypeRef::scalar("ID")), "Option<u64>");
        assert_eq!(rust(&config, TypeRef::scalar("DateTime")), "Option<String>");
    }

    #[test]
    fn test_untyped_fallback_applies_to_list_items_only() {
        let config = GeneratorConfig {
            id: IdMapping::Untyped,
            ..GeneratorConfig::default()
        }
        .with_scalar_mapper(|ctx: &ScalarContext<'_>| {
            (ctx.scalar == "ID" && ctx.list_item).then(|| "String".to_string())
        });

        assert_eq!(
            rust(&config, TypeRef::non_null(TypeRef::scalar("ID"))),
            UNTYPED
        );
        let ids = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::scalar("ID"))));
        assert_eq!(rust(&config, ids), "Vec<String>");
    }

    #[test]
    fn test_mapped_types_are_flagged() {
        let config = GeneratorConfig {
            id: IdMapping::Untyped,
            ..GeneratorConfig::default()
        }
        .with_scalar_mapper(|ctx: &ScalarContext<'_>| match (ctx.scalar, ctx.list_item) {
            ("ID", true) => Some("std::net::Ipv4Addr".to_string()),
            ("DateTime", _) => Some("String".to_string()),
            _ => None,
        });

        let ids = resolve(&config, TypeRef::list(TypeRef::non_null(TypeRef::scalar("ID")))).unwrap();
        assert_eq!(ids.to_rust(), "Option<Vec<std::net::Ipv4Addr>>");
        assert!(ids.mapped);

        assert!(!resolve(&config, TypeRef::scalar("ID")).unwrap().mapped);
        assert!(!resolve(&config, TypeRef::scalar("Int")).unwrap().mapped);
        assert!(resolve(&config, TypeRef::scalar("DateTime")).unwrap().mapped);
        assert!(!resolve(&config, TypeRef::object("User")).unwrap().mapped);
    }

    #[test]
    fn test_untyped_list_item_without_specific_type() {
        let config = GeneratorConfig {
            id: IdMapping::Untyped,
            ..GeneratorConfig::default()
        };
        let ids = TypeRef::list(TypeRef::scalar("ID"));
        assert_eq!(rust(&config, ids), "Option<Vec<Option<serde_json::Value>>>");
    }

    #[test]
    fn test_malformed_references() {
        let config = GeneratorConfig::default();
        let nested = TypeRef::non_null(TypeRef::non_null(TypeRef::scalar("Int")));
        assert!(matches!(
            *resolve(&config, nested).unwrap_err(),
            Error::MalformedTypeRef { .. }
        ));

        let wrapper_kind = TypeRef::named(TypeKind::List, "Int");
        assert!(resolve(&config, wrapper_kind).is_err());
    }

    #[test]
    fn test_unknown_type() {
        let config = GeneratorConfig::default();
        let err = resolve(&config, TypeRef::object("Missing")).unwrap_err();
        assert!(matches!(*err, Error::UnknownType { ref name, .. } if name == "Missing"));
    }
}
