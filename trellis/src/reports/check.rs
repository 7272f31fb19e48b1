//! Check command report data structures.

use std::path::PathBuf;

use trellis_schema::TypeKind;

use super::output::{Output, Report};

/// Summary of a loaded schema.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the introspection file.
    pub schema_path: PathBuf,
    /// Declared root operations and their type names.
    pub roots: Vec<(&'static str, String)>,
    /// Number of types per kind, omitting kinds with none.
    pub counts: Vec<(TypeKind, usize)>,
    /// Scalars that need a `[scalars]` mapping to generate.
    pub custom_scalars: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.schema_path.display()));
        out.newline();

        if !self.roots.is_empty() {
            out.section("roots");
            for (operation, name) in &self.roots {
                out.key_value_indented(operation, name);
            }
        }

        out.section("types");
        for (kind, count) in &self.counts {
            out.key_value_indented(kind.as_str(), &count.to_string());
        }

        if !self.custom_scalars.is_empty() {
            out.section("custom scalars");
            for scalar in &self.custom_scalars {
                out.list_item(scalar);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::tests::Recorded;

    #[test]
    fn test_render() {
        let report = CheckReport {
            schema_path: PathBuf::from("schema.json"),
            roots: vec![("query", "Query".to_string())],
            counts: vec![(TypeKind::Object, 3), (TypeKind::Scalar, 5)],
            custom_scalars: vec!["DateTime".to_string()],
        };
        let mut out = Recorded::default();
        report.render(&mut out);
        assert_eq!(
            out.0,
            vec![
                "✓ schema.json is valid",
                "",
                "roots:",
                "  query: Query",
                "types:",
                "  OBJECT: 3",
                "  SCALAR: 5",
                "custom scalars:",
                "  - DateTime",
            ]
        );
    }
}
