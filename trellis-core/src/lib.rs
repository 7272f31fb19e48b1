//! Core naming utilities for the Trellis GraphQL client generator.
//!
//! Everything here is a pure string transform: case conversion,
//! identifier sanitization, keyword escaping and validity checks.

mod case;
mod ident;

// Case conversion
pub use case::{split_words, to_camel_case, to_pascal_case, to_snake_case};
// Identifiers
pub use ident::{
    InvalidIdentifier, KeywordStyle, RUST_KEYWORDS, SafeIdent, enum_safe_identifier,
    escape_keyword, is_keyword, is_valid_identifier, parameter_safe_identifier,
    validate_identifier,
};
