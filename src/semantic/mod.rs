//! Static checking of a parsed program
//!
//! - [`analyzer`]: the tree walk and its entry point [`analyze`]
//! - [`symbols`]: per-run symbol table
//! - [`ops`]: typed operator table used for constant folding
//! - [`tree`]: annotated tree document
//! - [`errors`]: diagnostics
//!
//! The walk never stops at a diagnostic. A subtree that fails to check is
//! typed `error`, and anything built on it stays silent.

pub mod analyzer;
pub mod errors;
mod expressions;
pub mod ops;
mod statements;
pub mod symbols;
pub mod tree;
pub mod value;

pub use analyzer::{analyze, Analysis, Analyzer};
pub use errors::SemanticError;
