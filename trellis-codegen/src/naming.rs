//! Naming conventions for generated Rust items.

use std::collections::HashSet;

use trellis_core::{
    KeywordStyle, RUST_KEYWORDS, SafeIdent, enum_safe_identifier, escape_keyword,
    parameter_safe_identifier, to_pascal_case,
};

/// How GraphQL names become Rust names.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a type name (e.g., "user_profile" -> "UserProfile")
    pub type_to_name: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// How reserved words are escaped
    pub keywords: KeywordStyle,
}

/// Rust naming conventions with raw-identifier escaping.
pub const RUST_NAMING: NamingConvention = NamingConvention {
    type_to_name: to_pascal_case,
    reserved_words: RUST_KEYWORDS,
    keywords: KeywordStyle::Raw,
};

impl NamingConvention {
    pub fn with_keywords(self, keywords: KeywordStyle) -> Self {
        Self { keywords, ..self }
    }

    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            escape_keyword(name, self.keywords)
        } else {
            name.to_string()
        }
    }

    /// Transform and make safe for use as a type name.
    pub fn type_name(&self, name: &str) -> String {
        self.safe_name(&(self.type_to_name)(name))
    }

    /// Transform and make safe for use as a field, method or parameter name.
    pub fn member_name(&self, name: &str) -> String {
        parameter_safe_identifier(name, self.keywords)
    }

    /// Transform an enum value into a variant, keeping the wire value.
    pub fn variant_name(&self, name: &str) -> SafeIdent {
        enum_safe_identifier(name, self.keywords)
    }
}

/// Hands out names that are unique within one scope, appending a counter
/// on collision (`user_id`, `user_id2`, ...).
#[derive(Debug, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve names that generated code already uses.
    pub fn reserve<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.taken.extend(names.into_iter().map(str::to_string));
        self
    }

    pub fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }
        // a numbered keyword is no longer a keyword
        let stem = base.strip_prefix("r#").unwrap_or(base);
        let stem = stem.strip_suffix('_').filter(|s| RUST_KEYWORDS.contains(s)).unwrap_or(stem);
        (2..)
            .map(|n| format!("{}{}", stem, n))
            .find(|candidate| self.taken.insert(candidate.clone()))
            .unwrap_or_else(|| base.to_string())
    }
}
