//! Error types for the combiner.
//!
//! Defines [`ParseError`], [`CombineError`], and [`WriteError`]. A merge
//! either succeeds completely or fails atomically: a malformed contributor
//! aborts the whole merge rather than being skipped, since a partial merge
//! would silently drop test coverage. Every error carries enough context
//! (contributor index, subject name, path) to locate the offending input.

use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// A contributor file could not be parsed into a source model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The tree-sitter grammar could not be loaded.
    Grammar(String),

    /// The source contains a syntax error.
    Syntax {
        /// Node kind nearest the error (e.g. `class_body`).
        construct: String,
        /// 1-based line of the error.
        line: usize,
    },

    /// No package declaration was found.
    MissingPackage,

    /// No class declaration was found.
    MissingClass,

    /// A test method has no body.
    MissingBody {
        /// Name of the bodiless method.
        unit: String,
    },

    /// The class contains a member kind generated test files never hold
    /// (constructors, nested types, initializer blocks).
    UnsupportedMember {
        /// Node kind of the member (e.g. `constructor_declaration`).
        kind: String,
        /// 1-based line of the member.
        line: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grammar(detail) => write!(f, "java grammar unavailable: {detail}"),
            Self::Syntax { construct, line } => {
                write!(f, "syntax error near `{construct}` at line {line}")
            }
            Self::MissingPackage => write!(f, "no package declaration found"),
            Self::MissingClass => write!(f, "no class declaration found"),
            Self::MissingBody { unit } => {
                write!(f, "test method `{unit}` has no body")
            }
            Self::UnsupportedMember { kind, line } => {
                write!(f, "unsupported class member `{kind}` at line {line}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// CombineError
// ---------------------------------------------------------------------------

/// A merge run failed. The merge is atomic: no partial output exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombineError {
    /// The contributor list was empty.
    EmptyInput,

    /// Contributors disagree on the subject type name. Merging tests for
    /// different subjects into one suite would be semantically wrong.
    SubjectMismatch {
        /// Subject of the first contributor.
        expected: String,
        /// Subject of the disagreeing contributor.
        found: String,
        /// 0-based index of the disagreeing contributor.
        contributor: usize,
    },

    /// Contributors disagree on the package path.
    PackageMismatch {
        /// Package of the first contributor.
        expected: String,
        /// Package of the disagreeing contributor.
        found: String,
        /// 0-based index of the disagreeing contributor.
        contributor: usize,
    },

    /// A contributor failed to parse.
    Parse {
        /// 0-based index of the failing contributor.
        contributor: usize,
        /// The underlying parse failure.
        source: ParseError,
    },
}

impl fmt::Display for CombineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => {
                write!(f, "nothing to merge: the contributor list is empty")
            }
            Self::SubjectMismatch {
                expected,
                found,
                contributor,
            } => {
                write!(
                    f,
                    "contributor {contributor} targets subject `{found}`, expected `{expected}`.\n  All files passed to one merge must target the same subject type."
                )
            }
            Self::PackageMismatch {
                expected,
                found,
                contributor,
            } => {
                write!(
                    f,
                    "contributor {contributor} declares package `{found}`, expected `{expected}`.\n  All files passed to one merge must share one package path."
                )
            }
            Self::Parse {
                contributor,
                source,
            } => {
                write!(f, "contributor {contributor} failed to parse: {source}")
            }
        }
    }
}

impl std::error::Error for CombineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// WriteError
// ---------------------------------------------------------------------------

/// One suite that could not be produced by the batch writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuiteFailure {
    /// Subject type name of the failing group, or the input label when the
    /// failure happened before a subject was known.
    pub subject: String,
    /// Human-readable description of the failure.
    pub detail: String,
}

impl fmt::Display for SuiteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.detail)
    }
}

/// The batch suite writer failed.
#[derive(Debug)]
pub enum WriteError {
    /// The output directory could not be created.
    DirFailed {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// One or more suites failed to merge or write. Suites that succeeded
    /// were written; the listed ones produced no output file.
    Failed {
        /// Every failing suite, in first-seen subject order.
        failures: Vec<SuiteFailure>,
    },
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirFailed { path, source } => {
                write!(
                    f,
                    "could not create directory `{}`: {source}",
                    path.display()
                )
            }
            Self::Failed { failures } => {
                write!(f, "suite writing failed for {} subject(s):", failures.len())?;
                for failure in failures {
                    write!(f, "\n  - {failure}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirFailed { source, .. } => Some(source),
            Self::Failed { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
