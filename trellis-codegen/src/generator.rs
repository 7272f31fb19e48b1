//! The emission driver.

use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;
use trellis_schema::{Schema, SchemaType, TypeKind};

use crate::{
    Error, Result,
    builder::CodeBuilder,
    config::{FloatMapping, GeneratorConfig, IdMapping},
    emit::{EmitContext, emit_data_struct, emit_enum, emit_query_builder},
    output::{OutputFile, WriteResult},
};

/// Support types every generated module starts with.
const RUNTIME: &str = include_str!("../assets/runtime.rs");

/// Names the runtime preamble and its imports occupy.
const RUNTIME_NAMES: &[&str] = &[
    "GraphQlOperation",
    "GraphQlFieldMetadata",
    "GraphQlValue",
    "ToGraphQlValue",
    "GraphQlInputProperty",
    "GraphQlInputObject",
    "GraphQlArgument",
    "GraphQlSelection",
    "GraphQlSelectionSet",
    "GraphQlQueryBuilder",
    "Serialize",
    "Deserialize",
    "fmt",
    "Option",
    "Vec",
    "Box",
    "String",
];

const HEADER: &str = "// @generated by trellis. Do not edit.";

const UUID_IMPL: &str = "impl ToGraphQlValue for uuid::Uuid {
    fn to_graphql_value(&self) -> GraphQlValue {
        GraphQlValue::String(self.to_string())
    }
}";

const DECIMAL_IMPL: &str = "impl ToGraphQlValue for rust_decimal::Decimal {
    fn to_graphql_value(&self) -> GraphQlValue {
        GraphQlValue::Number(self.to_string())
    }
}";

/// Generates one Rust module from a schema.
///
/// A generator borrows its schema and configuration for the length of a
/// run; the same inputs always produce the same bytes.
#[derive(Debug)]
pub struct Generator<'a> {
    schema: &'a Schema,
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a Schema, config: &'a GeneratorConfig) -> Self {
        Self { schema, config }
    }

    /// Generate the complete module source.
    ///
    /// Nothing is returned unless every type generated successfully.
    pub fn generate(&self) -> Result<String> {
        let ctx = EmitContext::new(self.schema, self.config);
        self.check_collisions(&ctx)?;

        let mut out = CodeBuilder::rust();
        out.push_line(HEADER)
            .push_blank()
            .push_line("#![allow(dead_code, deprecated, unused_imports, clippy::all)]")
            .push_blank()
            .push_raw(RUNTIME.trim_end())
            .push_blank();
        if self.config.id == IdMapping::Uuid {
            out.push_blank().push_raw(UUID_IMPL).push_blank();
        }
        if self.config.float == FloatMapping::Decimal {
            out.push_blank().push_raw(DECIMAL_IMPL).push_blank();
        }

        let enums: Vec<&SchemaType> = self.emitted(|ty| ty.kind == TypeKind::Enum).collect();
        section(&mut out, "Enums");
        for ty in &enums {
            out.push_blank();
            emit_enum(&ctx, ty, &mut out)?;
        }
        debug!(count = enums.len(), "emitted enums");

        section(&mut out, "Data structs");
        let mut structs = 0;
        for ty in self.emitted(|ty| ty.kind.is_complex() || ty.kind == TypeKind::InputObject) {
            let mut item = CodeBuilder::rust();
            if emit_data_struct(&ctx, ty, &mut item)? {
                out.push_blank().push_raw(&item.build());
                structs += 1;
            }
        }
        debug!(count = structs, "emitted data structs");

        section(&mut out, "Query builders");
        let builders: Vec<&SchemaType> = self.emitted(|ty| ty.kind.is_complex()).collect();
        for ty in &builders {
            out.push_blank();
            emit_query_builder(&ctx, ty, &mut out)?;
        }
        debug!(count = builders.len(), "emitted query builders");

        Ok(out.build())
    }

    /// Generate and write the module, leaving an identical file untouched.
    /// The file is only touched once generation has succeeded.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<WriteResult> {
        let content = self.generate()?;
        OutputFile::new(path.as_ref(), content).write()
    }

    /// Non-reserved types matching `filter`, in schema order.
    fn emitted(&self, filter: impl Fn(&SchemaType) -> bool) -> impl Iterator<Item = &'a SchemaType> {
        self.schema
            .types()
            .filter(move |ty| !ty.is_reserved() && filter(ty))
    }

    /// Fail when two generated items would share a name.
    fn check_collisions(&self, ctx: &EmitContext<'_>) -> Result<()> {
        let mut taken: IndexMap<String, String> = RUNTIME_NAMES
            .iter()
            .map(|name| (name.to_string(), "the runtime preamble".to_string()))
            .collect();
        let mut claim = |name: String, owner: String| -> Result<()> {
            let key = name.strip_prefix("r#").unwrap_or(&name).to_string();
            match taken.get(&key) {
                Some(first) => Err(Box::new(Error::NameCollision {
                    name: key,
                    first: first.clone(),
                    second: owner,
                })),
                None => {
                    taken.insert(key, owner);
                    Ok(())
                }
            }
        };

        for ty in self.emitted(|_| true) {
            match ty.kind {
                TypeKind::Enum => claim(ctx.enum_name(ty)?, format!("enum {}", ty.name))?,
                kind if kind.is_complex() || kind == TypeKind::InputObject => {
                    let class = ctx.class_name(ty)?;
                    if ctx.data_types.contains(&ty.name) {
                        claim(class.clone(), format!("type {}", ty.name))?;
                        if kind == TypeKind::Interface {
                            claim(
                                crate::emit::fields_trait_name(&class),
                                format!("interface {} (fields trait)", ty.name),
                            )?;
                        }
                    }
                    if kind.is_complex() {
                        claim(
                            crate::emit::builder_name(&class),
                            format!("type {} (query builder)", ty.name),
                        )?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn section(out: &mut CodeBuilder, title: &str) {
    out.push_blank().push_comment(&format!("---- {} ----", title));
}
