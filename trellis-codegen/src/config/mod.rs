//! Generator configuration.
//!
//! [`GeneratorConfig`] is built once before a run (in code, or from a
//! `trellis.toml` through [`ConfigFile`]) and only read during generation.

mod file;
mod scalar;

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use trellis_core::KeywordStyle;

pub use file::{ConfigFile, Keywords, MappingSection, NamingSection, OutputSection};
pub use scalar::{ScalarContext, ScalarMapper, ScalarTable};

/// Rust type used for the `Int` scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum IntegerMapping {
    #[serde(rename = "i16")]
    Int16,
    #[default]
    #[serde(rename = "i32")]
    Int32,
    #[serde(rename = "i64")]
    Int64,
}

impl IntegerMapping {
    pub fn rust_type(&self) -> &'static str {
        match self {
            IntegerMapping::Int16 => "i16",
            IntegerMapping::Int32 => "i32",
            IntegerMapping::Int64 => "i64",
        }
    }
}

/// Rust type used for the `Float` scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum FloatMapping {
    #[serde(rename = "decimal")]
    Decimal,
    #[serde(rename = "f32")]
    Float,
    #[default]
    #[serde(rename = "f64")]
    Double,
}

impl FloatMapping {
    pub fn rust_type(&self) -> &'static str {
        match self {
            FloatMapping::Decimal => "rust_decimal::Decimal",
            FloatMapping::Float => "f32",
            FloatMapping::Double => "f64",
        }
    }
}

/// Rust type used for the `ID` scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdMapping {
    #[default]
    String,
    Uuid,
    /// The untyped placeholder, `serde_json::Value`.
    Untyped,
    /// Ask the scalar mapper, as for custom scalars.
    Custom,
}

/// Which documentation is emitted for schema descriptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocMode {
    None,
    /// `///` doc comments.
    #[default]
    Summary,
    /// `DESCRIPTION` / `FIELD_DESCRIPTIONS` associated constants.
    Description,
    Both,
}

impl DocMode {
    pub fn summary(&self) -> bool {
        matches!(self, DocMode::Summary | DocMode::Both)
    }

    pub fn description(&self) -> bool {
        matches!(self, DocMode::Description | DocMode::Both)
    }
}

/// Visibility of generated items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Visibility {
    #[default]
    #[serde(rename = "pub")]
    Public,
    #[serde(rename = "crate")]
    Crate,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "pub",
            Visibility::Crate => "pub(crate)",
        }
    }
}

/// Read-only configuration for one generation run.
#[derive(Clone)]
pub struct GeneratorConfig {
    pub integer: IntegerMapping,
    pub float: FloatMapping,
    pub id: IdMapping,
    /// Resolves custom scalars, and `ID` under [`IdMapping::Custom`].
    pub scalar_mapper: Option<Arc<dyn ScalarMapper>>,
    /// GraphQL type name -> Rust type name, applied before prefix/suffix.
    pub renames: IndexMap<String, String>,
    pub prefix: String,
    pub suffix: String,
    pub include_deprecated_fields: bool,
    pub docs: DocMode,
    pub keywords: KeywordStyle,
    pub visibility: Visibility,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scalar_mapper(mut self, mapper: impl ScalarMapper + 'static) -> Self {
        self.scalar_mapper = Some(Arc::new(mapper));
        self
    }

    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.renames.insert(from.into(), to.into());
        self
    }

    /// Ask the scalar mapper, if any, for a Rust type.
    pub fn map_scalar(&self, ctx: &ScalarContext<'_>) -> Option<String> {
        self.scalar_mapper
            .as_ref()
            .and_then(|mapper| mapper.map_scalar(ctx))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            integer: IntegerMapping::default(),
            float: FloatMapping::default(),
            id: IdMapping::default(),
            scalar_mapper: None,
            renames: IndexMap::new(),
            prefix: String::new(),
            suffix: String::new(),
            include_deprecated_fields: true,
            docs: DocMode::default(),
            keywords: KeywordStyle::default(),
            visibility: Visibility::default(),
        }
    }
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("integer", &self.integer)
            .field("float", &self.float)
            .field("id", &self.id)
            .field("scalar_mapper", &self.scalar_mapper.as_ref().map(|_| ".."))
            .field("renames", &self.renames)
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .field("include_deprecated_fields", &self.include_deprecated_fields)
            .field("docs", &self.docs)
            .field("keywords", &self.keywords)
            .field("visibility", &self.visibility)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.integer.rust_type(), "i32");
        assert_eq!(config.float.rust_type(), "f64");
        assert_eq!(config.id, IdMapping::String);
        assert!(config.include_deprecated_fields);
        assert!(config.docs.summary());
        assert!(!config.docs.description());
        assert_eq!(config.visibility.as_str(), "pub");
    }

    #[test]
    fn test_map_scalar_without_mapper() {
        let config = GeneratorConfig::default();
        let ctx = ScalarContext::new("DateTime", "User", "createdAt");
        assert_eq!(config.map_scalar(&ctx), None);
    }

    #[test]
    fn test_closure_mapper() {
        let config = GeneratorConfig::default().with_scalar_mapper(|ctx: &ScalarContext<'_>| {
            (ctx.scalar == "DateTime").then(|| "String".to_string())
        });
        let ctx = ScalarContext::new("DateTime", "User", "createdAt");
        assert_eq!(config.map_scalar(&ctx).as_deref(), Some("String"));
        assert!(format!("{config:?}").contains("scalar_mapper: Some(\"..\")"));
    }
}
