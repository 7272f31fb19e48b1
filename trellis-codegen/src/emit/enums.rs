//! Enum emission.

use tracing::trace;
use trellis_core::validate_identifier;
use trellis_schema::SchemaType;

use super::{EmitContext, deprecated_attr, literal};
use crate::{
    Result,
    ast::{Enum, Fn, Impl, Param, Variant},
    builder::CodeBuilder,
    naming::UniqueNames,
};

/// Emit a GraphQL enum as a Rust enum with `as_str()` and value conversion.
///
/// Variant names are sanitized; whenever that changes a name, serde is told
/// the original wire value.
pub fn emit_enum(ctx: &EmitContext<'_>, ty: &SchemaType, out: &mut CodeBuilder) -> Result<()> {
    let name = ctx.enum_name(ty)?;
    trace!(graphql = %ty.name, rust = %name, "emitting enum");

    let mut names = UniqueNames::new();
    let mut variants = Vec::with_capacity(ty.enum_values.len());
    let mut rust_enum = Enum::new(&name)
        .vis(ctx.vis())
        .derive("Debug")
        .derive("Clone")
        .derive("Copy")
        .derive("PartialEq")
        .derive("Eq")
        .derive("Hash")
        .derive("Serialize")
        .derive("Deserialize");
    if let Some(doc) = ctx.doc(ty.description.as_deref()) {
        rust_enum = rust_enum.doc(doc);
    }

    for value in &ty.enum_values {
        let safe = ctx.naming.variant_name(&value.name);
        let ident = names.claim(&safe.ident);
        validate_identifier(&ident, &format!("value '{}' of enum '{}'", value.name, ty.name))?;

        let mut variant = Variant::new(&ident);
        if let Some(doc) = ctx.doc(value.description.as_deref()) {
            variant = variant.doc(doc);
        }
        if value.is_deprecated {
            variant = variant.attr(deprecated_attr(value.deprecation_reason.as_deref()));
        }
        if ident.strip_prefix("r#").unwrap_or(&ident) != value.name {
            variant = variant.attr(format!("serde(rename = {})", literal(&value.name)));
        }
        rust_enum = rust_enum.variant(variant);
        variants.push((ident, value.name.as_str()));
    }

    let arms: Vec<String> = variants
        .iter()
        .map(|(ident, wire)| format!("    {}::{} => {},", name, ident, literal(wire)))
        .collect();
    let as_str_body = if arms.is_empty() {
        "match *self {}".to_string()
    } else {
        format!("match *self {{\n{}\n}}", arms.join("\n"))
    };

    let inherent = Impl::new(&name).method(
        Fn::new("as_str")
            .vis(ctx.vis())
            .doc("The GraphQL value of this variant.")
            .param(Param::receiver("&self"))
            .returns("&'static str")
            .body(as_str_body),
    );
    let display = Impl::new(&name).for_trait("std::fmt::Display").method(
        Fn::new("fmt")
            .private()
            .param(Param::receiver("&self"))
            .param(Param::new("f", "&mut std::fmt::Formatter<'_>"))
            .returns("std::fmt::Result")
            .body_line("f.write_str(self.as_str())"),
    );
    let to_value = Impl::new(&name).for_trait("ToGraphQlValue").method(
        Fn::new("to_graphql_value")
            .private()
            .param(Param::receiver("&self"))
            .returns("GraphQlValue")
            .body_line("GraphQlValue::Enum(self.as_str())"),
    );

    out.emit(&rust_enum)
        .push_blank()
        .emit(&inherent)
        .push_blank()
        .emit(&display)
        .push_blank()
        .emit(&to_value);
    Ok(())
}
