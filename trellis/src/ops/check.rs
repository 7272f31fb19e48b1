//! Check operation - schema summary.

use std::path::Path;

use trellis_schema::{OperationType, Schema, TypeKind};

use crate::reports::CheckReport;

/// Kinds listed in the summary, in display order.
const KINDS: [TypeKind; 6] = [
    TypeKind::Object,
    TypeKind::Interface,
    TypeKind::Union,
    TypeKind::Enum,
    TypeKind::InputObject,
    TypeKind::Scalar,
];

/// Execute the check operation.
///
/// The schema has already been loaded and validated; this collects what
/// generation will see. Introspection types are not counted.
pub fn check(schema: &Schema, schema_path: &Path) -> CheckReport {
    let roots = OperationType::ALL
        .into_iter()
        .filter_map(|op| schema.root_type(op).map(|name| (op.as_str(), name.to_string())))
        .collect();

    let counts = KINDS
        .into_iter()
        .map(|kind| {
            let count = schema
                .types_of_kind(kind)
                .filter(|ty| !ty.is_reserved())
                .count();
            (kind, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    let custom_scalars = schema
        .types_of_kind(TypeKind::Scalar)
        .filter(|ty| !ty.is_reserved() && !ty.is_builtin_scalar())
        .map(|ty| ty.name.clone())
        .collect();

    CheckReport {
        schema_path: schema_path.to_path_buf(),
        roots,
        counts,
        custom_scalars,
    }
}
