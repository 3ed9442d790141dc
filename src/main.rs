//! CLI for the parameter-swap mutant generator

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;

use swapmut::{
    commit_mutation, select_candidate, CompilationDatabase, MutationError, Result, SourceModel,
};

#[derive(Parser)]
#[command(name = "swapmut")]
#[command(author, version, about = "Generate one parameter-swap mutant of a source file", long_about = None)]
struct Cli {
    /// Path to compile_commands.json
    #[arg(short = 'p', long, value_name = "PATH")]
    compile_commands: PathBuf,

    /// Path to the file to mutate
    #[arg(long, value_name = "PATH")]
    filename: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // Usage output counts as a failed run: only an applied and
            // persisted mutation exits 0.
            return match err.kind() {
                ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(MutationError::NoCandidates) => {
            println!("{}", MutationError::NoCandidates);
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("{}: {}", "Error".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let database = CompilationDatabase::load(&cli.compile_commands)?;
    let unit = database.translation_unit(&cli.filename)?;
    let model = SourceModel::load(&unit.resolved_file())?;

    let mut rng = rand::thread_rng();
    let pair = select_candidate(model.candidates(), &mut rng).ok_or(MutationError::NoCandidates)?;

    commit_mutation(&model, &pair)
}
