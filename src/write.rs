//! Batch suite writer.
//!
//! Groups contributor files by subject type and writes one merged suite per
//! subject under a test source tree, creating the package directory
//! structure on the way. When a suite file for a subject already exists it
//! is folded in as the first contributor, so repeated runs accumulate tests
//! instead of clobbering earlier ones.
//!
//! Each group is written independently: groups that merge cleanly produce
//! their files even when other groups fail, and every failing group is
//! reported — not just the first.

use std::path::{Path, PathBuf};

use crate::combine::{combine, emit};
use crate::combine::parse::parse;
use crate::error::{SuiteFailure, WriteError};

/// One input to the batch writer.
#[derive(Clone, Debug)]
pub struct SuiteInput {
    /// Where the source came from (path or other identifier), used in
    /// failure reports.
    pub label: String,
    /// Raw contributor source text.
    pub source: String,
}

impl SuiteInput {
    pub fn new(label: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            source: source.into(),
        }
    }
}

/// Merge and write one suite per subject type under `tests_dir`.
///
/// Returns the written paths, sorted. On failure the error lists every
/// failing subject; suites that merged cleanly have still been written.
///
/// # Errors
///
/// [`WriteError::DirFailed`] when `tests_dir` cannot be created;
/// [`WriteError::Failed`] when any group fails to parse, merge, or write.
pub fn write_suites(tests_dir: &Path, inputs: &[SuiteInput]) -> Result<Vec<PathBuf>, WriteError> {
    std::fs::create_dir_all(tests_dir).map_err(|source| WriteError::DirFailed {
        path: tests_dir.to_path_buf(),
        source,
    })?;

    let mut failures: Vec<SuiteFailure> = Vec::new();

    // Group input indices by subject, first-seen order. Grouping needs the
    // subject up front, so inputs are parsed once here; the orchestrator
    // still owns the real merge.
    let mut groups: Vec<(String, String, Vec<usize>)> = Vec::new();
    for (index, input) in inputs.iter().enumerate() {
        match parse(&input.source) {
            Ok(parsed) => {
                match groups.iter().position(|(subject, _, _)| *subject == parsed.subject) {
                    Some(at) => groups[at].2.push(index),
                    None => groups.push((parsed.subject, parsed.package, vec![index])),
                }
            }
            Err(err) => failures.push(SuiteFailure {
                subject: input.label.clone(),
                detail: err.to_string(),
            }),
        }
    }

    let mut written = Vec::new();
    for (subject, package, members) in groups {
        match write_group(tests_dir, &subject, &package, &members, inputs) {
            Ok(path) => {
                tracing::debug!(subject = %subject, path = %path.display(), "wrote suite");
                written.push(path);
            }
            Err(detail) => {
                tracing::warn!(subject = %subject, detail = %detail, "suite failed");
                failures.push(SuiteFailure { subject, detail });
            }
        }
    }

    if failures.is_empty() {
        written.sort();
        Ok(written)
    } else {
        Err(WriteError::Failed { failures })
    }
}

/// Merge one subject group and write its suite file. Returns the path on
/// success, a failure description otherwise. No partial file is left behind
/// when the merge fails.
fn write_group(
    tests_dir: &Path,
    subject: &str,
    package: &str,
    members: &[usize],
    inputs: &[SuiteInput],
) -> Result<PathBuf, String> {
    let package_dir = tests_dir.join(package.replace('.', "/"));
    let target = package_dir.join(format!("{subject}.java"));

    // An existing suite participates as the first contributor, so its units
    // keep their names and new collisions are renamed against them.
    let mut sources: Vec<String> = Vec::with_capacity(members.len() + 1);
    if target.exists() {
        let existing = std::fs::read_to_string(&target)
            .map_err(|err| format!("could not read existing suite `{}`: {err}", target.display()))?;
        sources.push(existing);
    }
    for &index in members {
        if let Some(input) = inputs.get(index) {
            sources.push(input.source.clone());
        }
    }

    let merged = combine(&sources).map_err(|err| err.to_string())?;
    let rendered = emit(&merged);

    std::fs::create_dir_all(&package_dir)
        .map_err(|err| format!("could not create `{}`: {err}", package_dir.display()))?;
    std::fs::write(&target, rendered)
        .map_err(|err| format!("could not write `{}`: {err}", target.display()))?;
    Ok(target)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
