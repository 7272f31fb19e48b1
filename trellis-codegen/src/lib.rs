//! Rust code generation for the Trellis GraphQL client generator.
//!
//! Turns a [`trellis_schema::Schema`] into one Rust module containing a
//! runtime preamble, an enum per GraphQL enum, a struct per data type and a
//! query builder per selectable type.
//!
//! # Module Organization
//!
//! - [`builder`] - Indentation-aware text output (CodeBuilder, CodeFragment)
//! - [`ast`] - Structured Rust item builders (Struct, Enum, Impl, ...)
//! - [`config`] - Generator configuration and the `trellis.toml` format
//! - [`resolver`] - GraphQL type references to Rust type expressions
//! - [`closure`] - Types reachable from input objects
//! - [`emit`] - The enum, data struct and query builder emitters
//! - [`generator`] - The driver that runs the emitters in order
//!
//! ```ignore
//! let schema = Schema::open("schema.json")?;
//! let config = ConfigFile::from_file("trellis.toml")?.into_config();
//! Generator::new(&schema, &config).write("src/graphql.rs")?;
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod ast;
pub mod builder;
pub mod closure;
pub mod config;
pub mod emit;
mod error;
pub mod generator;
pub mod naming;
pub mod output;
pub mod resolver;

pub use config::{ConfigFile, DocMode, GeneratorConfig, ScalarContext, ScalarMapper, ScalarTable};
pub use error::{Error, Result};
pub use generator::Generator;
pub use output::{OutputFile, WriteResult};
