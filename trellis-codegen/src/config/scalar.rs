//! Custom scalar mapping.

use indexmap::IndexMap;

/// Where a scalar is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarContext<'a> {
    /// GraphQL scalar name, e.g. `DateTime`.
    pub scalar: &'a str,
    /// Declaring type.
    pub owner: &'a str,
    /// Declaring field, input field or argument.
    pub member: &'a str,
    /// Set while resolving the element type of a list.
    pub list_item: bool,
}

impl<'a> ScalarContext<'a> {
    pub fn new(scalar: &'a str, owner: &'a str, member: &'a str) -> Self {
        Self {
            scalar,
            owner,
            member,
            list_item: false,
        }
    }

    pub fn list_item(self) -> Self {
        Self {
            list_item: true,
            ..self
        }
    }
}

/// Maps a scalar to a Rust type expression. Returning `None` declines.
pub trait ScalarMapper: Send + Sync {
    fn map_scalar(&self, ctx: &ScalarContext<'_>) -> Option<String>;
}

impl<F> ScalarMapper for F
where
    F: Fn(&ScalarContext<'_>) -> Option<String> + Send + Sync,
{
    fn map_scalar(&self, ctx: &ScalarContext<'_>) -> Option<String> {
        self(ctx)
    }
}

/// A fixed scalar name -> Rust type table, as read from `[scalars]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScalarTable {
    entries: IndexMap<String, String>,
}

impl ScalarTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, scalar: impl Into<String>, rust_type: impl Into<String>) -> Self {
        self.entries.insert(scalar.into(), rust_type.into());
        self
    }

    pub fn get(&self, scalar: &str) -> Option<&str> {
        self.entries.get(scalar).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for ScalarTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl ScalarMapper for ScalarTable {
    fn map_scalar(&self, ctx: &ScalarContext<'_>) -> Option<String> {
        self.get(ctx.scalar).map(str::to_string)
    }
}
