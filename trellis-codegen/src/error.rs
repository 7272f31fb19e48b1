use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use trellis_core::InvalidIdentifier;

/// Result type for code generation (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("no mapping for custom scalar '{scalar}' used by {owner}.{member}")]
    #[diagnostic(code(trellis::unmapped_scalar))]
    UnmappedScalar {
        scalar: String,
        owner: String,
        member: String,
        /// The setting that sent this scalar to the mapper.
        key: &'static str,
        #[help]
        help: String,
    },

    #[error("invalid configuration for '{key}': {message}")]
    #[diagnostic(code(trellis::invalid_config))]
    InvalidConfig { key: String, message: String },

    #[error("failed to parse configuration")]
    #[diagnostic(code(trellis::config_parse))]
    ConfigParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("'{name}' is not a valid Rust identifier for {context}")]
    #[diagnostic(
        code(trellis::invalid_identifier),
        help("rename the type with a [rename] entry, or adjust the configured prefix/suffix")
    )]
    InvalidIdentifier { name: String, context: String },

    #[error("generated name '{name}' is used by both '{first}' and '{second}'")]
    #[diagnostic(
        code(trellis::name_collision),
        help("rename one of the types with a [rename] entry")
    )]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("malformed type reference at {owner}.{member}")]
    #[diagnostic(code(trellis::malformed_type_ref))]
    MalformedTypeRef { owner: String, member: String },

    #[error("type '{name}' referenced by {owner}.{member} is not defined in the schema")]
    #[diagnostic(code(trellis::unknown_type))]
    UnknownType {
        name: String,
        owner: String,
        member: String,
    },

    #[error("failed to access '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a configuration error for a key
    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidConfig {
            key: key.into(),
            message: message.into(),
        })
    }

    /// Create a parse error from a toml error with source context
    pub fn config_parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ConfigParse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    pub fn malformed(owner: &str, member: &str) -> Box<Self> {
        Box::new(Error::MalformedTypeRef {
            owner: owner.to_string(),
            member: member.to_string(),
        })
    }

    pub(crate) fn unmapped_scalar(scalar: &str, owner: &str, member: &str, key: &'static str) -> Box<Self> {
        let help = match key {
            "mapping.id" => format!(
                "`mapping.id = \"custom\"` looks ID up like a custom scalar; add `{} = \"<rust type>\"` under [scalars]",
                scalar
            ),
            _ => format!(
                "add `{} = \"<rust type>\"` under [scalars] or configure a scalar mapper",
                scalar
            ),
        };
        Box::new(Error::UnmappedScalar {
            scalar: scalar.to_string(),
            owner: owner.to_string(),
            member: member.to_string(),
            key,
            help,
        })
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}

impl From<InvalidIdentifier> for Box<Error> {
    fn from(err: InvalidIdentifier) -> Self {
        Box::new(Error::InvalidIdentifier {
            name: err.name,
            context: err.context,
        })
    }
}
