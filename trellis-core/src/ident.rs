//! Rust identifier sanitization and validation.

use thiserror::Error;

use crate::{to_pascal_case, to_snake_case};

/// Strict and reserved Rust keywords (2024 edition).
pub const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

/// How keywords are escaped when a GraphQL name collides with one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeywordStyle {
    /// Raw identifiers: `type` -> `r#type`.
    #[default]
    Raw,
    /// Trailing underscore: `type` -> `type_`.
    Suffix,
}

/// A sanitized identifier together with the wire value it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeIdent {
    pub ident: String,
    /// The original name, present only when sanitization changed it.
    pub original: Option<String>,
}

impl SafeIdent {
    /// The value to put on the wire for this identifier.
    pub fn wire_value(&self) -> &str {
        self.original.as_deref().unwrap_or(&self.ident)
    }
}

/// A computed name that is not a legal Rust identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{name}' is not a valid Rust identifier for {context}")]
pub struct InvalidIdentifier {
    pub name: String,
    pub context: String,
}

/// Check if a name is a Rust keyword.
pub fn is_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Escape a keyword using the given style. Non-keywords are returned unchanged.
pub fn escape_keyword(name: &str, style: KeywordStyle) -> String {
    if !is_keyword(name) {
        return name.to_string();
    }
    match style {
        KeywordStyle::Raw if !NON_RAW_KEYWORDS.contains(&name) => format!("r#{}", name),
        _ => format!("{}_", name),
    }
}

fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check whether `s` is a syntactically legal Rust identifier.
///
/// Raw identifiers (`r#type`) are accepted unless the keyword cannot be raw.
pub fn is_valid_identifier(s: &str) -> bool {
    match s.strip_prefix("r#") {
        Some(rest) => is_plain_identifier(rest) && !NON_RAW_KEYWORDS.contains(&rest),
        None => is_plain_identifier(s) && !is_keyword(s),
    }
}

/// Validate a computed identifier, naming what it was computed for on failure.
pub fn validate_identifier(name: &str, context: &str) -> Result<(), InvalidIdentifier> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(InvalidIdentifier {
            name: name.to_string(),
            context: context.to_string(),
        })
    }
}

/// Turn an enum value into a PascalCase variant name.
///
/// Leading digits get a `_` prefix and names with no usable characters fall
/// back to `Unnamed`. The wire value is kept whenever the identifier differs.
pub fn enum_safe_identifier(name: &str, style: KeywordStyle) -> SafeIdent {
    let mut ident = to_pascal_case(name);
    if ident.is_empty() {
        ident = "Unnamed".to_string();
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    let ident = escape_keyword(&ident, style);

    let original = (ident != name).then(|| name.to_string());
    SafeIdent { ident, original }
}

/// Turn an argument or field name into a snake_case parameter name.
pub fn parameter_safe_identifier(name: &str, style: KeywordStyle) -> String {
    let mut ident = to_snake_case(name);
    if ident.is_empty() {
        ident = "value".to_string();
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    escape_keyword(&ident, style)
}
