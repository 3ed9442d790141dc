//! JSON compilation database loading
//!
//! The build description is the standard `compile_commands.json` format: a
//! JSON array of entries carrying `directory`, `file`, and either `command`
//! or `arguments`. The mutator only needs it to resolve the requested
//! filename to exactly one translation unit.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{MutationError, Result};

/// One entry of the compilation database
#[derive(Debug, Clone, Deserialize)]
pub struct CompileCommand {
    /// Working directory the compile command runs in
    pub directory: PathBuf,
    /// The translation unit, possibly relative to `directory`
    pub file: PathBuf,
    /// Shell-quoted compile command (one of `command`/`arguments` is present)
    #[serde(default)]
    pub command: Option<String>,
    /// Argv-style compile command
    #[serde(default)]
    pub arguments: Option<Vec<String>>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl CompileCommand {
    /// Absolute path of the translation unit this entry describes
    pub fn resolved_file(&self) -> PathBuf {
        if self.file.is_absolute() {
            self.file.clone()
        } else {
            self.directory.join(&self.file)
        }
    }
}

/// Parsed compilation database
#[derive(Debug)]
pub struct CompilationDatabase {
    commands: Vec<CompileCommand>,
}

impl CompilationDatabase {
    /// Load a compilation database from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MutationError::DatabaseRead {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        let commands: Vec<CompileCommand> =
            serde_json::from_str(content).map_err(|e| MutationError::DatabaseParse {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
        Ok(Self { commands })
    }

    /// All entries in database order
    pub fn commands(&self) -> &[CompileCommand] {
        &self.commands
    }

    /// Resolve `filename` to its unique translation unit
    ///
    /// Zero matches or more than one match is a usage error fatal to the run.
    pub fn translation_unit(&self, filename: &Path) -> Result<&CompileCommand> {
        let wanted = normalize(filename);
        let matches: Vec<&CompileCommand> = self
            .commands
            .iter()
            .filter(|entry| normalize(&entry.resolved_file()) == wanted)
            .collect();

        match matches.len() {
            0 => Err(MutationError::TranslationUnitNotFound {
                file: filename.to_path_buf(),
            }),
            1 => Ok(matches[0]),
            count => Err(MutationError::AmbiguousTranslationUnit {
                file: filename.to_path_buf(),
                count,
            }),
        }
    }
}

// Canonicalize when the path exists, otherwise compare lexically.
fn normalize(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
