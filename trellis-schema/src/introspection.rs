//! Introspection JSON deserialization.
//!
//! The wire format is deserialized into private `Raw*` mirrors first, then
//! converted into the owned model, which is where wrapper chains are checked.

use serde::Deserialize;

use crate::{EnumValue, Error, Field, InputValue, Result, Schema, SchemaType, TypeKind, TypeRef};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    query_type: Option<RawNamed>,
    mutation_type: Option<RawNamed>,
    subscription_type: Option<RawNamed>,
    types: Vec<RawType>,
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawType {
    kind: TypeKind,
    name: String,
    description: Option<String>,
    fields: Option<Vec<RawField>>,
    input_fields: Option<Vec<RawInputValue>>,
    interfaces: Option<Vec<RawTypeRef>>,
    enum_values: Option<Vec<RawEnumValue>>,
    possible_types: Option<Vec<RawTypeRef>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    description: Option<String>,
    #[serde(default)]
    args: Vec<RawInputValue>,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInputValue {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    default_value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnumValue {
    name: String,
    description: Option<String>,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeRef {
    kind: TypeKind,
    name: Option<String>,
    of_type: Option<Box<RawTypeRef>>,
}

/// Parse an introspection response into a schema.
pub(crate) fn parse(src: &str, filename: &str) -> Result<Schema> {
    let value: serde_json::Value =
        serde_json::from_str(src).map_err(|e| Error::parse(e, src, filename))?;
    let schema_value = locate_schema(value).ok_or_else(|| Box::new(Error::MissingSchema))?;

    let raw: RawSchema = serde_path_to_error::deserialize(schema_value).map_err(|err| {
        Box::new(Error::Shape {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        })
    })?;

    convert(raw)
}

/// Find the `__schema` object inside the common response envelopes.
fn locate_schema(mut value: serde_json::Value) -> Option<serde_json::Value> {
    if let Some(data) = value.get_mut("data") {
        value = data.take();
    }
    if let Some(schema) = value.get_mut("__schema") {
        return Some(schema.take());
    }
    value.get("types").is_some().then_some(value)
}

fn convert(raw: RawSchema) -> Result<Schema> {
    let types = raw
        .types
        .into_iter()
        .map(convert_type)
        .collect::<Result<Vec<_>>>()?;

    let mut schema = Schema::new(types)?;
    schema.query_type = raw.query_type.map(|t| t.name);
    schema.mutation_type = raw.mutation_type.map(|t| t.name);
    schema.subscription_type = raw.subscription_type.map(|t| t.name);
    Ok(schema)
}

fn convert_type(raw: RawType) -> Result<SchemaType> {
    let owner = raw.name.clone();

    let fields = raw
        .fields
        .unwrap_or_default()
        .into_iter()
        .map(|f| -> Result<Field> {
            let location = format!("{}.{}", owner, f.name);
            Ok(Field {
                ty: convert_type_ref(&f.ty, &location)?,
                args: f
                    .args
                    .into_iter()
                    .map(|a| convert_input_value(a, &location))
                    .collect::<Result<_>>()?,
                name: f.name,
                description: f.description,
                is_deprecated: f.is_deprecated,
                deprecation_reason: f.deprecation_reason,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let input_fields = raw
        .input_fields
        .unwrap_or_default()
        .into_iter()
        .map(|f| convert_input_value(f, &owner))
        .collect::<Result<Vec<_>>>()?;

    let enum_values = raw
        .enum_values
        .unwrap_or_default()
        .into_iter()
        .map(|v| EnumValue {
            name: v.name,
            description: v.description,
            is_deprecated: v.is_deprecated,
            deprecation_reason: v.deprecation_reason,
        })
        .collect();

    Ok(SchemaType {
        interfaces: named_refs(raw.interfaces, &owner)?,
        possible_types: named_refs(raw.possible_types, &owner)?,
        name: raw.name,
        kind: raw.kind,
        description: raw.description,
        fields,
        input_fields,
        enum_values,
    })
}

fn convert_input_value(raw: RawInputValue, parent: &str) -> Result<InputValue> {
    let location = format!("{}.{}", parent, raw.name);
    Ok(InputValue {
        ty: convert_type_ref(&raw.ty, &location)?,
        name: raw.name,
        description: raw.description,
        default_value: raw.default_value,
    })
}

fn named_refs(refs: Option<Vec<RawTypeRef>>, owner: &str) -> Result<Vec<String>> {
    refs.unwrap_or_default()
        .into_iter()
        .map(|r| {
            r.name
                .ok_or_else(|| Error::malformed(owner, "type reference without a name"))
        })
        .collect()
}

fn convert_type_ref(raw: &RawTypeRef, location: &str) -> Result<TypeRef> {
    match raw.kind {
        kind if kind.is_wrapper() => {
            let inner = raw.of_type.as_deref().ok_or_else(|| {
                Error::malformed(location, format!("{} wrapper without ofType", raw.kind))
            })?;
            let inner = Box::new(convert_type_ref(inner, location)?);
            Ok(match raw.kind {
                TypeKind::List => TypeRef::List(inner),
                _ => TypeRef::NonNull(inner),
            })
        }
        kind => {
            let name = raw.name.clone().ok_or_else(|| {
                Error::malformed(location, format!("{} reference without a name", kind))
            })?;
            Ok(TypeRef::Named { kind, name })
        }
    }
}
