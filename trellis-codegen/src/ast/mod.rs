//! Rust AST builders for generating structs, enums, traits, impls, and functions.
//!
//! These provide a high-level API for constructing Rust syntax,
//! which can then be rendered via CodeBuilder.

mod enums;
mod fns;
mod impls;
mod structs;
mod traits;

pub use enums::{Enum, Variant};
pub use fns::{Fn, Param};
pub use impls::{Const, Impl};
pub use structs::{Field, Struct};
pub use traits::Trait;

/// Render a visibility keyword followed by a space, or nothing.
pub(crate) fn vis_prefix(vis: &str) -> String {
    if vis.is_empty() {
        String::new()
    } else {
        format!("{} ", vis)
    }
}
