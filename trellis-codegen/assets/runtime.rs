use std::fmt;

use serde::{Deserialize, Serialize};

/// A GraphQL root operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphQlOperation {
    Query,
    Mutation,
    Subscription,
}

impl GraphQlOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphQlOperation::Query => "query",
            GraphQlOperation::Mutation => "mutation",
            GraphQlOperation::Subscription => "subscription",
        }
    }
}

/// Static description of a selectable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphQlFieldMetadata {
    pub name: &'static str,
    pub is_complex: bool,
    /// Builder type for the field's sub-selection.
    pub query_builder: Option<&'static str>,
    pub has_required_arguments: bool,
}

/// A value written into a GraphQL document.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphQlValue {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    /// A numeric literal kept as text, for types wider than `i64`.
    Number(String),
    String(String),
    Enum(&'static str),
    List(Vec<GraphQlValue>),
    Object(Vec<(&'static str, GraphQlValue)>),
    Json(serde_json::Value),
}

impl GraphQlValue {
    /// An input object value. Absent (null) properties are left out.
    pub fn from_properties(properties: Vec<GraphQlInputProperty>) -> Self {
        GraphQlValue::Object(
            properties
                .into_iter()
                .filter(|property| property.value != GraphQlValue::Null)
                .map(|property| (property.name, property.value))
                .collect(),
        )
    }

    /// A value of a custom scalar, through its serde representation.
    /// A value that serializes to null stays absent. So does a value whose
    /// `Serialize` impl fails: the argument or property carrying it is left
    /// out of the query rather than aborting the build.
    pub fn serialized<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(serde_json::Value::Null) | Err(_) => GraphQlValue::Null,
            Ok(json) => GraphQlValue::Json(json),
        }
    }

    pub fn render(&self, out: &mut String) {
        match self {
            GraphQlValue::Null => out.push_str("null"),
            GraphQlValue::Boolean(value) => out.push_str(if *value { "true" } else { "false" }),
            GraphQlValue::Int(value) => out.push_str(&value.to_string()),
            GraphQlValue::Float(value) if value.is_finite() => out.push_str(&value.to_string()),
            GraphQlValue::Float(_) => out.push_str("null"),
            GraphQlValue::Number(value) => out.push_str(value),
            GraphQlValue::String(value) => render_string(value, out),
            GraphQlValue::Enum(value) => out.push_str(value),
            GraphQlValue::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.render(out);
                }
                out.push(']');
            }
            GraphQlValue::Object(entries) => {
                out.push('{');
                for (i, (name, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(name);
                    out.push_str(": ");
                    value.render(out);
                }
                out.push('}');
            }
            GraphQlValue::Json(value) => render_json(value, out),
        }
    }
}

impl fmt::Display for GraphQlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(&mut out);
        f.write_str(&out)
    }
}

fn render_string(value: &str, out: &mut String) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn render_json(value: &serde_json::Value, out: &mut String) {
    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
        serde_json::Value::Number(value) => out.push_str(&value.to_string()),
        serde_json::Value::String(value) => render_string(value, out),
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_json(item, out);
            }
            out.push(']');
        }
        serde_json::Value::Object(entries) => {
            out.push('{');
            for (i, (name, value)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(name);
                out.push_str(": ");
                render_json(value, out);
            }
            out.push('}');
        }
    }
}

/// Conversion into a GraphQL document value.
pub trait ToGraphQlValue {
    fn to_graphql_value(&self) -> GraphQlValue;
}

macro_rules! graphql_int {
    ($($ty:ty),*) => {
        $(impl ToGraphQlValue for $ty {
            fn to_graphql_value(&self) -> GraphQlValue {
                GraphQlValue::Int(i64::from(*self))
            }
        })*
    };
}

macro_rules! graphql_number {
    ($($ty:ty),*) => {
        $(impl ToGraphQlValue for $ty {
            fn to_graphql_value(&self) -> GraphQlValue {
                GraphQlValue::Number(self.to_string())
            }
        })*
    };
}

graphql_int!(i8, i16, i32, i64, u8, u16, u32);
graphql_number!(u64, usize, isize, i128, u128);

impl ToGraphQlValue for bool {
    fn to_graphql_value(&self) -> GraphQlValue {
        GraphQlValue::Boolean(*self)
    }
}

impl ToGraphQlValue for f32 {
    fn to_graphql_value(&self) -> GraphQlValue {
        GraphQlValue::Float(f64::from(*self))
    }
}

impl ToGraphQlValue for f64 {
    fn to_graphql_value(&self) -> GraphQlValue {
        GraphQlValue::Float(*self)
    }
}

impl ToGraphQlValue for str {
    fn to_graphql_value(&self) -> GraphQlValue {
        GraphQlValue::String(self.to_string())
    }
}

impl ToGraphQlValue for String {
    fn to_graphql_value(&self) -> GraphQlValue {
        GraphQlValue::String(self.clone())
    }
}

impl ToGraphQlValue for serde_json::Value {
    fn to_graphql_value(&self) -> GraphQlValue {
        GraphQlValue::Json(self.clone())
    }
}

impl<T: ToGraphQlValue + ?Sized> ToGraphQlValue for &T {
    fn to_graphql_value(&self) -> GraphQlValue {
        (**self).to_graphql_value()
    }
}

impl<T: ToGraphQlValue + ?Sized> ToGraphQlValue for Box<T> {
    fn to_graphql_value(&self) -> GraphQlValue {
        (**self).to_graphql_value()
    }
}

impl<T: ToGraphQlValue> ToGraphQlValue for Option<T> {
    fn to_graphql_value(&self) -> GraphQlValue {
        match self {
            Some(value) => value.to_graphql_value(),
            None => GraphQlValue::Null,
        }
    }
}

impl<T: ToGraphQlValue> ToGraphQlValue for Vec<T> {
    fn to_graphql_value(&self) -> GraphQlValue {
        GraphQlValue::List(self.iter().map(ToGraphQlValue::to_graphql_value).collect())
    }
}

/// One (name, current value) pair of an input object.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQlInputProperty {
    pub name: &'static str,
    pub value: GraphQlValue,
}

impl GraphQlInputProperty {
    pub fn new(name: &'static str, value: GraphQlValue) -> Self {
        Self { name, value }
    }
}

/// Types whose values can be sent as arguments.
pub trait GraphQlInputObject {
    /// Every property in declared order.
    fn properties(&self) -> Vec<GraphQlInputProperty>;
}

/// A field argument.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQlArgument {
    pub name: &'static str,
    pub value: GraphQlValue,
}

impl GraphQlArgument {
    pub fn new(name: &'static str, value: GraphQlValue) -> Self {
        Self { name, value }
    }
}

/// One selected field.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQlSelection {
    pub name: &'static str,
    pub alias: Option<String>,
    pub arguments: Vec<GraphQlArgument>,
    pub selection_set: Option<GraphQlSelectionSet>,
}

impl GraphQlSelection {
    /// The response key of the selection.
    pub fn key(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name)
    }

    fn render(&self, out: &mut String) {
        if let Some(alias) = &self.alias {
            out.push_str(alias);
            out.push_str(": ");
        }
        out.push_str(self.name);
        if !self.arguments.is_empty() {
            out.push('(');
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(argument.name);
                out.push_str(": ");
                argument.value.render(out);
            }
            out.push(')');
        }
        if let Some(selection_set) = &self.selection_set {
            out.push(' ');
            selection_set.render(out);
        }
    }
}

/// The fields selected on one type, plus inline fragments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphQlSelectionSet {
    selections: Vec<GraphQlSelection>,
    fragments: Vec<(&'static str, GraphQlSelectionSet)>,
}

impl GraphQlSelectionSet {
    /// Select a field. Selecting the same response key again replaces it.
    pub fn include(
        &mut self,
        name: &'static str,
        alias: Option<&str>,
        arguments: Vec<GraphQlArgument>,
        selection_set: Option<GraphQlSelectionSet>,
    ) {
        let selection = GraphQlSelection {
            name,
            alias: alias.map(str::to_string),
            arguments,
            selection_set,
        };
        match self
            .selections
            .iter_mut()
            .find(|existing| existing.key() == selection.key())
        {
            Some(existing) => *existing = selection,
            None => self.selections.push(selection),
        }
    }

    /// Remove every selection of a field. Removing an absent field is a no-op.
    pub fn exclude(&mut self, name: &str) {
        self.selections.retain(|selection| selection.name != name);
    }

    /// Add an `... on Type { }` fragment, replacing one for the same type.
    pub fn include_fragment(&mut self, type_name: &'static str, selection_set: GraphQlSelectionSet) {
        match self.fragments.iter_mut().find(|(name, _)| *name == type_name) {
            Some(existing) => existing.1 = selection_set,
            None => self.fragments.push((type_name, selection_set)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selections.iter().any(|selection| selection.name == name)
    }

    pub fn selections(&self) -> &[GraphQlSelection] {
        &self.selections
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty() && self.fragments.is_empty()
    }

    pub fn clear(&mut self) {
        self.selections.clear();
        self.fragments.clear();
    }

    /// Render as `{ a b(x: 1) { c } ... on T { d } }`. An empty set selects
    /// `__typename` so the document stays valid.
    pub fn render(&self, out: &mut String) {
        out.push('{');
        if self.is_empty() {
            out.push_str(" __typename");
        }
        for selection in &self.selections {
            out.push(' ');
            selection.render(out);
        }
        for (type_name, selection_set) in &self.fragments {
            out.push_str(" ... on ");
            out.push_str(type_name);
            out.push(' ');
            selection_set.render(out);
        }
        out.push_str(" }");
    }
}

/// Common behavior of the generated `*QueryBuilder` types.
pub trait GraphQlQueryBuilder: Sized {
    const TYPE_NAME: &'static str;
    const FIELDS: &'static [GraphQlFieldMetadata];
    const OPERATION: Option<GraphQlOperation> = None;

    fn selection_set(&self) -> &GraphQlSelectionSet;
    fn selection_set_mut(&mut self) -> &mut GraphQlSelectionSet;
    fn into_selection_set(self) -> GraphQlSelectionSet;

    /// Metadata of the currently selected fields.
    fn included_fields(&self) -> Vec<&'static GraphQlFieldMetadata> {
        Self::FIELDS
            .iter()
            .filter(|field| self.selection_set().contains(field.name))
            .collect()
    }

    fn with_typename(mut self) -> Self {
        self.selection_set_mut()
            .include("__typename", None, Vec::new(), None);
        self
    }

    /// Select every field that needs neither a sub-selection nor arguments.
    fn with_all_scalar_fields(mut self) -> Self {
        for field in Self::FIELDS
            .iter()
            .filter(|field| !field.is_complex && !field.has_required_arguments)
        {
            self.selection_set_mut()
                .include(field.name, None, Vec::new(), None);
        }
        self
    }

    fn except_all(mut self) -> Self {
        self.selection_set_mut().clear();
        self
    }

    /// Render the GraphQL document, prefixed with the operation keyword for
    /// root types.
    fn build(&self) -> String {
        let mut out = String::new();
        if let Some(operation) = Self::OPERATION {
            out.push_str(operation.as_str());
            out.push(' ');
        }
        self.selection_set().render(&mut out);
        out
    }
}
