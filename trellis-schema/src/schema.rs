//! The schema container.

use std::path::Path;

use indexmap::IndexMap;

use crate::{Error, Result, SchemaType, TypeKind};

/// A root operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub const ALL: [OperationType; 3] = [
        OperationType::Query,
        OperationType::Mutation,
        OperationType::Subscription,
    ];

    /// The GraphQL keyword for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        }
    }
}

/// An introspected GraphQL schema.
///
/// Types keep the order in which the schema declared them; generation
/// follows that order so output stays diff-stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub query_type: Option<String>,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
    types: IndexMap<String, SchemaType>,
}

impl Schema {
    /// Build a schema from types in declared order.
    pub fn new(types: impl IntoIterator<Item = SchemaType>) -> Result<Self> {
        let mut map = IndexMap::new();
        for ty in types {
            if map.contains_key(&ty.name) {
                return Err(Box::new(Error::DuplicateType { name: ty.name }));
            }
            map.insert(ty.name.clone(), ty);
        }
        Ok(Self {
            types: map,
            ..Self::default()
        })
    }

    pub fn with_query_type(mut self, name: impl Into<String>) -> Self {
        self.query_type = Some(name.into());
        self
    }

    pub fn with_mutation_type(mut self, name: impl Into<String>) -> Self {
        self.mutation_type = Some(name.into());
        self
    }

    pub fn with_subscription_type(mut self, name: impl Into<String>) -> Self {
        self.subscription_type = Some(name.into());
        self
    }

    /// Read and parse an introspection result from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_introspection_json_with_filename(&content, &path.display().to_string())
    }

    /// Parse an introspection result.
    pub fn from_introspection_json(src: &str) -> Result<Self> {
        Self::from_introspection_json_with_filename(src, "schema.json")
    }

    /// Parse an introspection result, naming the source in diagnostics.
    pub fn from_introspection_json_with_filename(src: &str, filename: &str) -> Result<Self> {
        let schema = crate::introspection::parse(src, filename)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Check the invariants generation relies on: root type names, if set,
    /// must name OBJECT types of this schema.
    pub fn validate(&self) -> Result<()> {
        for operation in OperationType::ALL {
            let Some(name) = self.root_type(operation) else {
                continue;
            };
            let reason = match self.get(name) {
                None => "is not defined in the schema",
                Some(ty) if ty.kind != TypeKind::Object => "is not an OBJECT type",
                Some(_) => continue,
            };
            return Err(Box::new(Error::InvalidRootType {
                operation: operation.as_str(),
                name: name.to_string(),
                reason,
            }));
        }
        Ok(())
    }

    /// Get a type by name.
    pub fn get(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }

    /// Iterate over types in declared order.
    pub fn types(&self) -> impl Iterator<Item = &SchemaType> {
        self.types.values()
    }

    /// Iterate over types of one kind in declared order.
    pub fn types_of_kind(&self, kind: TypeKind) -> impl Iterator<Item = &SchemaType> {
        self.types().filter(move |ty| ty.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Name of the root type for an operation, if the schema declares one.
    pub fn root_type(&self, operation: OperationType) -> Option<&str> {
        match operation {
            OperationType::Query => self.query_type.as_deref(),
            OperationType::Mutation => self.mutation_type.as_deref(),
            OperationType::Subscription => self.subscription_type.as_deref(),
        }
    }

    /// The operation a type is the root of, if any.
    pub fn root_operation(&self, type_name: &str) -> Option<OperationType> {
        OperationType::ALL
            .into_iter()
            .find(|op| self.root_type(*op) == Some(type_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, TypeRef};

    fn sample() -> Schema {
        Schema::new([
            SchemaType::object("Query").field(Field::new("user", TypeRef::object("User"))),
            SchemaType::object("User").field(Field::new("id", TypeRef::scalar("ID"))),
            SchemaType::enumeration("Role"),
        ])
        .unwrap()
        .with_query_type("Query")
    }

    #[test]
    fn test_declared_order_preserved() {
        let schema = sample();
        let names: Vec<_> = schema.types().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Query", "User", "Role"]);
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let err = Schema::new([SchemaType::object("User"), SchemaType::enumeration("User")])
            .unwrap_err();
        assert!(matches!(*err, Error::DuplicateType { ref name } if name == "User"));
    }

    #[test]
    fn test_root_operation() {
        let schema = sample();
        assert_eq!(schema.root_operation("Query"), Some(OperationType::Query));
        assert_eq!(schema.root_operation("User"), None);
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_root_must_be_object() {
        let schema = sample().with_mutation_type("Role");
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("mutation root type 'Role'"));

        let schema = sample().with_subscription_type("Missing");
        assert!(schema.validate().is_err());
    }
}
