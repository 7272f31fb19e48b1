//! `trellis.toml` parsing.

use std::{path::Path, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;
use trellis_core::{KeywordStyle, is_valid_identifier};

use super::{
    DocMode, FloatMapping, GeneratorConfig, IdMapping, IntegerMapping, ScalarTable, Visibility,
};
use crate::{Error, Result};

/// The `trellis.toml` file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub mapping: MappingSection,
    #[serde(default)]
    pub naming: NamingSection,
    #[serde(default)]
    pub output: OutputSection,
    /// GraphQL type name -> Rust type name
    #[serde(default)]
    pub rename: IndexMap<String, String>,
    /// Custom scalar name -> Rust type expression
    #[serde(default)]
    pub scalars: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingSection {
    pub integer: IntegerMapping,
    pub float: FloatMapping,
    pub id: IdMapping,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keywords {
    #[default]
    Raw,
    Suffix,
}

impl From<Keywords> for KeywordStyle {
    fn from(keywords: Keywords) -> Self {
        match keywords {
            Keywords::Raw => KeywordStyle::Raw,
            Keywords::Suffix => KeywordStyle::Suffix,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingSection {
    pub prefix: String,
    pub suffix: String,
    pub keywords: Keywords,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub include_deprecated_fields: bool,
    pub docs: DocMode,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            include_deprecated_fields: true,
            docs: DocMode::default(),
        }
    }
}

impl FromStr for ConfigFile {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "trellis.toml")
    }
}

impl ConfigFile {
    /// Parse a trellis.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a trellis.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| Error::config_parse(e, content, filename))?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("naming.prefix", &self.naming.prefix),
            ("naming.suffix", &self.naming.suffix),
        ] {
            if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(Error::invalid_config(
                    key,
                    format!("'{}' may only contain ASCII letters, digits and '_'", value),
                ));
            }
        }

        for (from, to) in &self.rename {
            if !is_valid_identifier(to) {
                return Err(Error::invalid_config(
                    format!("rename.{}", from),
                    format!("'{}' is not a valid Rust type name", to),
                ));
            }
        }

        for (scalar, rust_type) in &self.scalars {
            if rust_type.trim().is_empty() {
                return Err(Error::invalid_config(
                    format!("scalars.{}", scalar),
                    "the Rust type must not be empty",
                ));
            }
        }

        if self.mapping.id == IdMapping::Custom && !self.scalars.contains_key("ID") {
            return Err(Error::invalid_config(
                "mapping.id",
                "`custom` requires an `ID` entry under [scalars]",
            ));
        }
        Ok(())
    }

    /// Turn the file into the configuration a generation run reads.
    pub fn into_config(self) -> GeneratorConfig {
        let mut config = GeneratorConfig {
            integer: self.mapping.integer,
            float: self.mapping.float,
            id: self.mapping.id,
            renames: self.rename,
            prefix: self.naming.prefix,
            suffix: self.naming.suffix,
            include_deprecated_fields: self.output.include_deprecated_fields,
            docs: self.output.docs,
            keywords: self.naming.keywords.into(),
            visibility: self.naming.visibility,
            ..GeneratorConfig::default()
        };
        if !self.scalars.is_empty() {
            config = config.with_scalar_mapper(self.scalars.into_iter().collect::<ScalarTable>());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScalarContext;

    #[test]
    fn test_empty_file_uses_defaults() {
        let file: ConfigFile = "".parse().unwrap();
        assert_eq!(file, ConfigFile::default());
        let config = file.into_config();
        assert!(config.include_deprecated_fields);
        assert!(config.scalar_mapper.is_none());
    }

    #[test]
    fn test_full_file() {
        let file: ConfigFile = r#"
            [mapping]
            integer = "i64"
            float = "decimal"
            id = "uuid"

            [naming]
            prefix = "Gql"
            suffix = "Model"
            keywords = "suffix"
            visibility = "crate"

            [output]
            include_deprecated_fields = false
            docs = "both"

            [rename]
            User = "Account"

            [scalars]
            DateTime = "chrono::DateTime<chrono::Utc>"
        "#
        .parse()
        .unwrap();

        let config = file.into_config();
        assert_eq!(config.integer, IntegerMapping::Int64);
        assert_eq!(config.float, FloatMapping::Decimal);
        assert_eq!(config.id, IdMapping::Uuid);
        assert_eq!(config.prefix, "Gql");
        assert_eq!(config.suffix, "Model");
        assert_eq!(config.keywords, KeywordStyle::Suffix);
        assert_eq!(config.visibility, Visibility::Crate);
        assert!(!config.include_deprecated_fields);
        assert_eq!(config.docs, DocMode::Both);
        assert_eq!(config.renames.get("User").map(String::as_str), Some("Account"));
        assert_eq!(
            config
                .map_scalar(&ScalarContext::new("DateTime", "User", "createdAt"))
                .as_deref(),
            Some("chrono::DateTime<chrono::Utc>")
        );
    }

    #[test]
    fn test_unknown_choice_is_parse_error() {
        let err = "[mapping]\ninteger = \"i128\"\n"
            .parse::<ConfigFile>()
            .unwrap_err();
        match *err {
            Error::ConfigParse { span, .. } => assert!(span.is_some()),
            ref other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!("[output]\ncolour = true\n".parse::<ConfigFile>().is_err());
    }

    #[test]
    fn test_custom_id_requires_scalar_entry() {
        let err = "[mapping]\nid = \"custom\"\n"
            .parse::<ConfigFile>()
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidConfig { ref key, .. } if key == "mapping.id"));
    }

    #[test]
    fn test_invalid_rename_target() {
        let err = "[rename]\nUser = \"my user\"\n"
            .parse::<ConfigFile>()
            .unwrap_err();
        assert!(err.to_string().contains("rename.User"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trellis.toml");
        std::fs::write(&path, "[naming]\nsuffix = \"Dto\"\n").unwrap();

        let file = ConfigFile::from_file(&path).unwrap();
        assert_eq!(file.naming.suffix, "Dto");

        let err = ConfigFile::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
