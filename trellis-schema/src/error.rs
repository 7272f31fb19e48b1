use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for schema loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("export the schema with an introspection query and save the JSON response"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse introspection JSON")]
    #[diagnostic(code(trellis::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("introspection result has no schema")]
    #[diagnostic(
        code(trellis::missing_schema),
        help("expected `{{\"data\": {{\"__schema\": ...}}}}` or `{{\"__schema\": ...}}`")
    )]
    MissingSchema,

    #[error("unexpected schema structure at '{path}': {message}")]
    #[diagnostic(code(trellis::schema_shape))]
    Shape { path: String, message: String },

    #[error("type '{name}' is defined more than once")]
    #[diagnostic(code(trellis::duplicate_type))]
    DuplicateType { name: String },

    #[error("{operation} root type '{name}' {reason}")]
    #[diagnostic(code(trellis::invalid_root))]
    InvalidRootType {
        operation: &'static str,
        name: String,
        reason: &'static str,
    },

    #[error("malformed type reference at {location}: {message}")]
    #[diagnostic(code(trellis::malformed_type_ref))]
    MalformedTypeRef { location: String, message: String },
}

impl Error {
    /// Create a parse error from a serde_json error with source context
    pub fn parse(source: serde_json::Error, src: &str, filename: &str) -> Box<Self> {
        let span = offset_of(src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 1)));
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a malformed type reference error
    pub fn malformed(location: impl Into<String>, message: impl Into<String>) -> Box<Self> {
        Box::new(Error::MalformedTypeRef {
            location: location.into(),
            message: message.into(),
        })
    }
}

/// Convert a 1-based line/column pair into a byte offset.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);
    (offset < src.len()).then_some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let src = "{\n  \"a\": x\n}";
        assert_eq!(offset_of(src, 1, 1), Some(0));
        assert_eq!(offset_of(src, 2, 8), Some(9));
        assert_eq!(offset_of(src, 0, 1), None);
        assert_eq!(offset_of(src, 9, 1), None);
    }

    #[test]
    fn test_parse_error_has_span() {
        let src = "{\"__schema\": }";
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        let err = Error::parse(err, src, "schema.json");
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
