//! Error types for mutant generation

use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating a mutant
///
/// Every failure is terminal for the run: nothing is retried, and on any
/// error the target file is left unmodified.
#[derive(Debug, Error)]
pub enum MutationError {
    /// Compilation database file couldn't be read
    #[error("Could not load compilation database '{}': {error}", path.display())]
    DatabaseRead { path: PathBuf, error: String },

    /// Compilation database file isn't valid JSON
    #[error("Could not parse compilation database '{}': {error}", path.display())]
    DatabaseParse { path: PathBuf, error: String },

    /// The requested file has no entry in the compilation database
    #[error("No translation unit found for '{}' in the compilation database", file.display())]
    TranslationUnitNotFound { file: PathBuf },

    /// The requested file matches more than one database entry
    #[error("Expected exactly one translation unit for '{}', found {count}", file.display())]
    AmbiguousTranslationUnit { file: PathBuf, count: usize },

    /// Failed to read the target source file
    #[error("Failed to read file '{}': {error}", file.display())]
    FileRead { file: PathBuf, error: String },

    /// The target source file couldn't be parsed
    #[error("Failed to parse '{}' as Rust: {error}", file.display())]
    Parse { file: PathBuf, error: String },

    /// No function/parameter pair satisfies the mutation constraints
    #[error("Could not find any suitable candidates.")]
    NoCandidates,

    /// Two registered edits would overlap
    #[error(
        "Replacement at bytes {}..{} overlaps registered edit at bytes {}..{}",
        incoming.start, incoming.end, existing.start, existing.end
    )]
    ReplacementConflict {
        incoming: Range<usize>,
        existing: Range<usize>,
    },

    /// Failed to write the mutated file back to disk
    #[error("Failed to write mutated file '{}': {error}", file.display())]
    Persist { file: PathBuf, error: String },
}

/// Result type for mutation operations
pub type Result<T> = std::result::Result<T, MutationError>;
