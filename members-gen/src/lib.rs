// Library interface for members-gen
// Exposes the generator pipeline to the CLI and to build scripts.

pub mod config;
pub mod driver;
pub mod emit_arity;
pub mod emit_header;
pub mod error;
pub mod ident;
pub mod table;
pub mod table_validator;
pub mod trace;

#[cfg(test)]
mod emit_tests;


pub use config::{GeneratorConfig, Layout, MaxArity};
pub use driver::{Artifact, check_artifacts, generate, run, write_artifacts};
pub use emit_arity::Mode;
pub use error::GenError;
