//! Parameter-swap mutant generator
//!
//! This library produces a single automated "mutant" of a Rust source file:
//! it picks one function with at least two parameters of differing declared
//! types and swaps the textual declarations of two such parameters. The
//! result usually still parses, but call-site argument binding is now
//! semantically wrong, which makes the mutant useful for exercising
//! diagnostic tooling.
//!
//! Exactly one mutation is committed per run. On any failure the target file
//! is left untouched.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use swapmut::{commit_mutation, select_candidate, SourceModel};
//!
//! let model = SourceModel::load(Path::new("src/lib.rs")).unwrap();
//! let mut rng = rand::thread_rng();
//! if let Some(pair) = select_candidate(model.candidates(), &mut rng) {
//!     commit_mutation(&model, &pair).unwrap();
//! }
//! ```

pub mod database;
pub mod error;
pub mod model;
pub mod rewrite;
pub mod selector;

// Re-export main types at crate root
pub use database::{CompilationDatabase, CompileCommand};
pub use error::{MutationError, Result};
pub use model::{FunctionCandidate, ParameterInfo, SourceModel, TypeIdentity};
pub use rewrite::{commit_mutation, swap_replacements, Replacement, ReplacementSet};
pub use selector::{select_candidate, CandidatePair};
