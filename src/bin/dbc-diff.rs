//! `dbc-diff <file1> <file2>`: prints the first structural difference
//! between two DBC files to stdout; empty output means they are equal.
//!
//! Exits `0` whether or not a difference was found; exits non-zero, with a
//! `KIND: message` diagnostic on stderr, if either file fails to parse or
//! build. Parse errors carry the file-origin line and column of the failure.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use dbc_bus::LoadError;

#[derive(Parser)]
#[command(name = "dbc-diff")]
#[command(about = "Prints the first structural difference between two DBC files")]
struct Cli {
    /// First DBC file to compare.
    file1: PathBuf,
    /// Second DBC file to compare.
    file2: PathBuf,
}

fn load_bus(path: &Path) -> Result<dbc_bus::Bus, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("IoError: could not read \"{}\": {e}", path.display()))?;
    dbc_bus::load(&text)
        .map(|outcome| outcome.bus)
        .map_err(|e| match e {
            LoadError::Parse(err) => format!(
                "ParseError: {} at {}:{}:{}",
                err.message,
                path.display(),
                err.line,
                err.column
            ),
            LoadError::Database(err) => format!("DatabaseError: {err} in \"{}\"", path.display()),
        })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let bus1 = match load_bus(&cli.file1) {
        Ok(bus) => bus,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };
    let bus2 = match load_bus(&cli.file2) {
        Ok(bus) => bus,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let difference = dbc_bus::diff(&bus1, &bus2);
    if !difference.is_empty() {
        print!("{difference}");
    }
    ExitCode::SUCCESS
}
