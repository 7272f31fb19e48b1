//! Query builder emission.
//!
//! Every object, interface and union gets a `<Name>QueryBuilder` holding a
//! selection set. Each field becomes a consuming `with_<field>` method whose
//! parameters are the field's arguments (required first), a nested builder
//! for complex fields, then an optional alias.

use tracing::{debug, trace};
use trellis_core::{RUST_KEYWORDS, validate_identifier};
use trellis_schema::{
    Field as SchemaField, InputValue, OperationType, SchemaType, TypeKind, TypeRef,
};

use super::{EmitContext, deprecated_attr, literal};
use crate::{
    Result,
    ast::{Const, Field, Fn, Impl, Param, Struct},
    builder::CodeBuilder,
    naming::UniqueNames,
    resolver::ResolvedType,
};

/// Method stems the `GraphQlQueryBuilder` trait already provides.
const RESERVED_STEMS: &[&str] = &["typename", "all_scalar_fields", "all"];

/// Parameter names the method bodies use themselves.
const RESERVED_PARAMS: &[&str] = &["self", "alias", "selection", "arguments"];

/// A field argument accepted by a builder method.
struct Argument<'s> {
    input: &'s InputValue,
    ident: String,
    rust_type: String,
    resolved: ResolvedType,
    required: bool,
}

/// Builder target of a complex field.
struct Selection {
    builder: String,
}

/// Emit the query builder struct, its methods and its trait impl.
pub fn emit_query_builder(
    ctx: &EmitContext<'_>,
    ty: &SchemaType,
    out: &mut CodeBuilder,
) -> Result<()> {
    let name = ctx.builder_name(ty)?;
    trace!(graphql = %ty.name, rust = %name, "emitting query builder");

    let mut rust_struct = Struct::new(&name)
        .vis(ctx.vis())
        .derive("Debug")
        .derive("Clone")
        .derive("Default")
        .field(Field::new("selection_set", "GraphQlSelectionSet").private());
    if ctx.config.docs.summary() {
        rust_struct = rust_struct.doc(format!("Builds a selection on `{}`.", ty.name));
    }
    out.emit(&rust_struct);

    let mut stems = UniqueNames::new().reserve(RESERVED_STEMS.iter().copied());
    let mut methods = Impl::new(&name);
    let mut metadata = Vec::new();

    for field in ty
        .fields
        .iter()
        .filter(|f| ctx.config.include_deprecated_fields || !f.is_deprecated)
    {
        let (kind, target) = field.ty.named_type();
        let selection = if kind.is_complex() {
            match ctx.schema.get(target).filter(|t| !t.is_reserved()) {
                Some(target_ty) => Some(Selection {
                    builder: ctx.builder_name(target_ty)?,
                }),
                None => {
                    debug!(owner = %ty.name, field = %field.name, target, "skipping field without a query builder");
                    continue;
                }
            }
        } else {
            None
        };

        let stem = stems.claim(&method_stem(&ctx.naming.member_name(&field.name)));
        methods = methods
            .method(with_method(ctx, ty, field, &stem, selection.as_ref())?)
            .method(
                Fn::new(format!("except_{}", stem))
                    .vis(ctx.vis())
                    .param(Param::receiver("mut self"))
                    .returns("Self")
                    .body_line(format!("self.selection_set.exclude({});", literal(&field.name)))
                    .body_line("self"),
            );
        metadata.push(field_metadata(field, selection.as_ref()));
    }

    if matches!(ty.kind, TypeKind::Interface | TypeKind::Union) {
        for possible in ty
            .possible_types
            .iter()
            .filter_map(|p| ctx.schema.get(p))
            .filter(|p| p.kind.is_complex() && !p.is_reserved())
        {
            let stem = stems.claim(&format!(
                "{}_fragment",
                method_stem(&ctx.naming.member_name(&possible.name))
            ));
            let mut method = Fn::new(format!("with_{}", stem))
                .vis(ctx.vis())
                .param(Param::receiver("mut self"))
                .param(Param::new("selection", ctx.builder_name(possible)?))
                .returns("Self")
                .body_line(format!(
                    "self.selection_set.include_fragment({}, selection.into_selection_set());",
                    literal(&possible.name)
                ))
                .body_line("self");
            if ctx.config.docs.summary() {
                method = method.doc(format!("Select fields on `{}` with `... on {}`.", possible.name, possible.name));
            }
            methods = methods.method(method);
        }
    }

    if !methods.is_empty() {
        out.push_blank().emit(&methods);
    }

    out.push_blank().emit(&trait_impl(ctx, ty, &name, &metadata));
    Ok(())
}

/// The name part of `with_*`/`except_*` for a member name: raw and suffix
/// keyword escapes are not needed once prefixed.
fn method_stem(member: &str) -> String {
    let stem = member.strip_prefix("r#").unwrap_or(member);
    stem.strip_suffix('_')
        .filter(|s| RUST_KEYWORDS.contains(s))
        .unwrap_or(stem)
        .to_string()
}

/// Whether an argument type can be written by a builder: a scalar, enum or
/// input object, or a list of one.
fn is_supported_argument(ty: &TypeRef) -> bool {
    let writable = |ty: &TypeRef| {
        matches!(
            ty,
            TypeRef::Named {
                kind: TypeKind::Scalar | TypeKind::Enum | TypeKind::InputObject,
                ..
            }
        )
    };
    match ty.unwrap_non_null() {
        TypeRef::List(item) => writable(item.unwrap_non_null()),
        other => writable(other),
    }
}

fn is_required(input: &InputValue) -> bool {
    input.ty.is_non_null() && input.default_value.is_none()
}

fn arguments<'s>(
    ctx: &EmitContext<'_>,
    ty: &SchemaType,
    field: &'s SchemaField,
) -> Result<Vec<Argument<'s>>> {
    let mut params = UniqueNames::new().reserve(RESERVED_PARAMS.iter().copied());
    let mut resolved = Vec::with_capacity(field.args.len());

    for input in &field.args {
        if !is_supported_argument(&input.ty) || !ctx.is_emitted(&input.ty) {
            debug!(owner = %ty.name, field = %field.name, argument = %input.name, "dropping argument of unsupported type");
            continue;
        }
        let member = format!("{}.{}", field.name, input.name);
        let rust = ctx.resolver.resolve(&input.ty, &ty.name, &member)?;
        let ident = params.claim(&ctx.naming.member_name(&input.name));
        validate_identifier(&ident, &format!("argument '{}.{}'", ty.name, member))?;

        let required = is_required(input);
        resolved.push(Argument {
            input,
            ident,
            rust_type: if required {
                rust.to_rust()
            } else {
                format!("Option<{}>", rust.expr)
            },
            resolved: rust,
            required,
        });
    }

    // required arguments first, otherwise in declared order
    resolved.sort_by_key(|arg| !arg.required);
    Ok(resolved)
}

fn with_method(
    ctx: &EmitContext<'_>,
    ty: &SchemaType,
    field: &SchemaField,
    stem: &str,
    selection: Option<&Selection>,
) -> Result<Fn> {
    let args = arguments(ctx, ty, field)?;

    let mut method = Fn::new(format!("with_{}", stem))
        .vis(ctx.vis())
        .param(Param::receiver("mut self"));
    if let Some(doc) = ctx.doc(field.description.as_deref()) {
        method = method.doc(doc);
    }
    if field.is_deprecated {
        method = method.attr(deprecated_attr(field.deprecation_reason.as_deref()));
    }

    for arg in args.iter().filter(|a| a.required) {
        method = method.param(Param::new(&arg.ident, &arg.rust_type));
    }
    if let Some(selection) = selection {
        method = method.param(Param::new("selection", &selection.builder));
    }
    for arg in args.iter().filter(|a| !a.required) {
        method = method.param(Param::new(&arg.ident, &arg.rust_type));
    }
    method = method.param(Param::new("alias", "Option<&str>")).returns("Self");

    let arguments = if args.is_empty() {
        "Vec::new()"
    } else {
        method = method.body_line("let mut arguments = Vec::new();");
        for arg in &args {
            let push = |value: &str| {
                format!(
                    "arguments.push(GraphQlArgument::new({}, {}));",
                    literal(&arg.input.name),
                    ctx.value_expr(&arg.resolved, value)
                )
            };
            method = if arg.required {
                method.body_line(push(&arg.ident))
            } else {
                method.body(format!(
                    "if let Some(value) = &{} {{\n    {}\n}}",
                    arg.ident,
                    push("value")
                ))
            };
        }
        "arguments"
    };

    let sub_selection = match selection {
        Some(_) => "Some(selection.into_selection_set())",
        None => "None",
    };
    Ok(method
        .body_line(format!(
            "self.selection_set.include({}, alias, {}, {});",
            literal(&field.name),
            arguments,
            sub_selection
        ))
        .body_line("self"))
}

fn field_metadata(field: &SchemaField, selection: Option<&Selection>) -> String {
    let query_builder = match selection {
        Some(selection) => format!("Some({})", literal(&selection.builder)),
        None => "None".to_string(),
    };
    format!(
        "    GraphQlFieldMetadata {{\n        name: {},\n        is_complex: {},\n        query_builder: {},\n        has_required_arguments: {},\n    }},",
        literal(&field.name),
        selection.is_some(),
        query_builder,
        field.args.iter().any(is_required)
    )
}

fn trait_impl(ctx: &EmitContext<'_>, ty: &SchemaType, name: &str, metadata: &[String]) -> Impl {
    let fields = if metadata.is_empty() {
        "&[]".to_string()
    } else {
        format!("&[\n{}\n]", metadata.join("\n"))
    };

    let mut block = Impl::new(name)
        .for_trait("GraphQlQueryBuilder")
        .constant(Const::new("TYPE_NAME", "&'static str", literal(&ty.name)).private())
        .constant(Const::new("FIELDS", "&'static [GraphQlFieldMetadata]", fields).private());
    if let Some(operation) = ctx.schema.root_operation(&ty.name) {
        let variant = match operation {
            OperationType::Query => "Query",
            OperationType::Mutation => "Mutation",
            OperationType::Subscription => "Subscription",
        };
        block = block.constant(
            Const::new(
                "OPERATION",
                "Option<GraphQlOperation>",
                format!("Some(GraphQlOperation::{})", variant),
            )
            .private(),
        );
    }

    block
        .method(
            Fn::new("selection_set")
                .private()
                .param(Param::receiver("&self"))
                .returns("&GraphQlSelectionSet")
                .body_line("&self.selection_set"),
        )
        .method(
            Fn::new("selection_set_mut")
                .private()
                .param(Param::receiver("&mut self"))
                .returns("&mut GraphQlSelectionSet")
                .body_line("&mut self.selection_set"),
        )
        .method(
            Fn::new("into_selection_set")
                .private()
                .param(Param::receiver("self"))
                .returns("GraphQlSelectionSet")
                .body_line("self.selection_set"),
        )
}
