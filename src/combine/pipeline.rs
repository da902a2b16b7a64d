//! Combiner orchestrator.
//!
//! Drives parse → reconcile → merge over an ordered list of contributor
//! sources and enforces the cross-file consistency invariants (same subject
//! type, same package). The reconciliation pass runs once, in contributor
//! order — reordering the inputs changes collision outcomes, so the order
//! is part of the contract.

use crate::combine::imports::ImportReconciler;
use crate::combine::metadata::{AnnotationReconciler, FieldReconciler};
use crate::combine::parse::parse;
use crate::combine::units::UnitMerger;
use crate::error::CombineError;
use crate::model::merged::MergedFile;

/// Merge an ordered list of contributor sources into one [`MergedFile`].
///
/// Pure function of the ordered input: the same list in the same order
/// always yields the same output. Serialization ([`crate::combine::emit`])
/// and I/O are the caller's responsibility.
///
/// # Errors
///
/// - [`CombineError::EmptyInput`] when `sources` is empty.
/// - [`CombineError::Parse`] when a contributor fails to parse, carrying
///   the contributor's position.
/// - [`CombineError::SubjectMismatch`] / [`CombineError::PackageMismatch`]
///   when contributors disagree on the subject type or package.
pub fn combine<S: AsRef<str>>(sources: &[S]) -> Result<MergedFile, CombineError> {
    if sources.is_empty() {
        return Err(CombineError::EmptyInput);
    }
    tracing::debug!(contributors = sources.len(), "combining contributor files");

    let mut contributors = Vec::with_capacity(sources.len());
    for (index, source) in sources.iter().enumerate() {
        let parsed = parse(source.as_ref()).map_err(|source| CombineError::Parse {
            contributor: index,
            source,
        })?;
        contributors.push(parsed);
    }

    let subject = contributors[0].subject.clone();
    let package = contributors[0].package.clone();
    for (index, contributor) in contributors.iter().enumerate().skip(1) {
        if contributor.subject != subject {
            return Err(CombineError::SubjectMismatch {
                expected: subject,
                found: contributor.subject.clone(),
                contributor: index,
            });
        }
        if contributor.package != package {
            return Err(CombineError::PackageMismatch {
                expected: package,
                found: contributor.package.clone(),
                contributor: index,
            });
        }
    }

    let mut imports = ImportReconciler::new();
    let mut annotations = AnnotationReconciler::new();
    let mut fields = FieldReconciler::new();
    let mut units = UnitMerger::new();
    let mut doc: Option<String> = None;

    for contributor in contributors {
        imports.absorb(contributor.imports);
        annotations.absorb(contributor.annotations);
        fields.absorb(contributor.fields);
        units.absorb(contributor.units);
        if doc.is_none()
            && let Some(block) = contributor.doc.filter(|d| !d.is_empty())
        {
            doc = Some(block);
        }
    }

    Ok(MergedFile {
        package,
        imports: imports.into_merged(),
        subject,
        annotations: annotations.into_merged(),
        fields: fields.into_merged(),
        units: units.into_merged(),
        doc,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
