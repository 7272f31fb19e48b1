//! Wrapped type references.

use crate::TypeKind;

/// A possibly-wrapped reference to a named type, e.g. `[User!]!`.
///
/// Each reference owns its wrapper chain, so a chain always terminates in a
/// [`TypeRef::Named`] even when the type graph itself is cyclic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named { kind: TypeKind, name: String },
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        TypeRef::Named {
            kind,
            name: name.into(),
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::named(TypeKind::Scalar, name)
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::named(TypeKind::Object, name)
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    pub fn non_null(inner: TypeRef) -> Self {
        TypeRef::NonNull(Box::new(inner))
    }

    /// Strip one leading NON_NULL wrapper. References without one are
    /// returned unchanged.
    pub fn unwrap_non_null(&self) -> &TypeRef {
        match self {
            TypeRef::NonNull(inner) => inner,
            other => other,
        }
    }

    /// Returns true if the outermost wrapper is NON_NULL.
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// Returns true if the reference is a list, ignoring an outer NON_NULL.
    pub fn is_list(&self) -> bool {
        matches!(self.unwrap_non_null(), TypeRef::List(_))
    }

    /// Follow the wrappers down to the named type.
    pub fn named_type(&self) -> (TypeKind, &str) {
        match self {
            TypeRef::Named { kind, name } => (*kind, name),
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.named_type(),
        }
    }

    /// Name of the innermost named type.
    pub fn type_name(&self) -> &str {
        self.named_type().1
    }

    /// Render in GraphQL type notation, e.g. `[ID!]!`.
    pub fn graphql_notation(&self) -> String {
        match self {
            TypeRef::Named { name, .. } => name.clone(),
            TypeRef::List(inner) => format!("[{}]", inner.graphql_notation()),
            TypeRef::NonNull(inner) => format!("{}!", inner.graphql_notation()),
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.graphql_notation())
    }
}
