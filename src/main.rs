use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use weld::combine::{combine, emit};
use weld::config::WeldConfig;
use weld::write::{SuiteInput, write_suites};

mod telemetry;

/// Deterministic combiner for generated Java unit-test suites
///
/// weld merges independently generated test files — one scenario per file,
/// all targeting the same subject type — into one coherent suite: imports
/// are unioned, class-level annotations are reconciled, shared guard fields
/// are deduplicated, and colliding test names are renamed, never dropped.
///
/// The merge is a pure function of the input order: the same files in the
/// same order always produce byte-identical output.
///
/// QUICK START:
///
///   # Merge files into one suite on stdout
///   weld combine gen/UserAccess_1.java gen/UserAccess_2.java
///
///   # Merge everything under gen/ into the test tree, one suite
///   # per subject, folding in suites that already exist
///   weld write 'gen/*.java' --tests-dir src/test/java
#[derive(Parser)]
#[command(name = "weld")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(after_help = "See 'weld <command> --help' for more information on a specific command.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge contributor files, in argument order, into one suite
    Combine {
        /// Contributor files, merged in the given order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write the merged suite here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a JSON summary (subject, units, imports) instead of source
        #[arg(long)]
        json: bool,
    },

    /// Merge and write one suite per subject type under the test tree
    ///
    /// Inputs are grouped by subject; each group becomes one file under the
    /// package directory. An existing suite file is folded in as the first
    /// contributor, so repeated runs accumulate tests.
    Write {
        /// Contributor files or glob patterns (quote globs in your shell)
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Root of the test source tree (default: `[write] tests_dir`
        /// from .weld.toml, or src/test/java)
        #[arg(long)]
        tests_dir: Option<PathBuf>,
    },
}

/// Machine-readable summary of one merge, for `--json`.
#[derive(Serialize)]
struct CombineReport<'a> {
    subject: &'a str,
    package: &'a str,
    imports: usize,
    units: Vec<&'a str>,
}

fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Combine {
            files,
            output,
            json,
        } => run_combine(&files, output.as_deref(), json),
        Commands::Write {
            patterns,
            tests_dir,
        } => run_write(&patterns, tests_dir),
    }
}

fn run_combine(files: &[PathBuf], output: Option<&Path>, json: bool) -> Result<()> {
    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("could not read `{}`", path.display()))?;
        sources.push(source);
    }

    let merged = combine(&sources)?;
    let rendered = emit(&merged);

    if let Some(path) = output {
        std::fs::write(path, &rendered)
            .with_context(|| format!("could not write `{}`", path.display()))?;
    }
    if json {
        let report = CombineReport {
            subject: &merged.subject,
            package: &merged.package,
            imports: merged.imports.len(),
            units: merged.unit_names(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if output.is_none() {
        print!("{rendered}");
    }
    Ok(())
}

fn run_write(patterns: &[String], tests_dir: Option<PathBuf>) -> Result<()> {
    let config = WeldConfig::load_from(Path::new("."))?;
    let tests_dir = tests_dir.unwrap_or(config.write.tests_dir);

    let mut inputs = Vec::new();
    for pattern in patterns {
        let mut matched = false;
        let entries =
            glob::glob(pattern).with_context(|| format!("invalid pattern `{pattern}`"))?;
        for entry in entries {
            let path = entry?;
            if path.is_dir() {
                continue;
            }
            matched = true;
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("could not read `{}`", path.display()))?;
            inputs.push(SuiteInput::new(path.display().to_string(), source));
        }
        if !matched {
            tracing::warn!(pattern = %pattern, "pattern matched no files");
        }
    }

    let written = write_suites(&tests_dir, &inputs)?;
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
