//! GraphQL schema model for the Trellis client generator.
//!
//! The model mirrors the standard introspection result: an ordered list of
//! named types plus the root operation type names. It is built once (from
//! JSON via [`Schema::from_introspection_json`] or by hand) and never
//! mutated during code generation.
//!
//! ```text
//! introspection JSON → trellis-schema (model) → trellis-codegen (Rust source)
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod introspection;
mod schema;
mod type_ref;
mod types;

pub use error::{Error, Result};
pub use schema::{OperationType, Schema};
pub use type_ref::TypeRef;
pub use types::{EnumValue, Field, InputValue, SchemaType, TypeKind};
