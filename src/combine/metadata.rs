//! Metadata reconciler.
//!
//! Reconciles the two kinds of class-scoped state across contributors:
//!
//! - **Type-level annotations** are grouped by annotation name. Each name
//!   appears exactly once in the output; its referenced-type set is the
//!   union across all contributors, element order first-seen.
//! - **Scaffold fields** are deduplicated by identity (name, type). The
//!   first occurrence wins; later identical-identity fields are silently
//!   discarded. This is a documented policy, not a conflict error — the
//!   generator emits the same guard fields into every contributor.

use std::collections::BTreeSet;

use crate::model::source::{MetadataAnnotation, ScaffoldField};

// ---------------------------------------------------------------------------
// AnnotationReconciler
// ---------------------------------------------------------------------------

/// Unions type-level annotations by name across contributors.
#[derive(Debug, Default)]
pub struct AnnotationReconciler {
    merged: Vec<MetadataAnnotation>,
}

impl AnnotationReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one contributor's type-level annotations into the union.
    pub fn absorb(&mut self, annotations: Vec<MetadataAnnotation>) {
        for incoming in annotations {
            match self.merged.iter().position(|a| a.name == incoming.name) {
                Some(at) => {
                    let existing = &mut self.merged[at];
                    for ty in incoming.types {
                        if !existing.types.contains(&ty) {
                            existing.types.push(ty);
                        }
                    }
                }
                None => self.merged.push(incoming),
            }
        }
    }

    /// One annotation per name, reconciliation order.
    #[must_use]
    pub fn into_merged(self) -> Vec<MetadataAnnotation> {
        self.merged
    }
}

// ---------------------------------------------------------------------------
// FieldReconciler
// ---------------------------------------------------------------------------

/// Deduplicates scaffold fields by (name, type) identity.
#[derive(Debug, Default)]
pub struct FieldReconciler {
    seen: BTreeSet<(String, String)>,
    merged: Vec<ScaffoldField>,
}

impl FieldReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one contributor's scaffold fields in. First occurrence wins.
    pub fn absorb(&mut self, fields: Vec<ScaffoldField>) {
        for field in fields {
            let identity = (field.name.clone(), field.ty.clone());
            if self.seen.insert(identity) {
                self.merged.push(field);
            }
        }
    }

    /// The deduplicated fields, first-seen order.
    #[must_use]
    pub fn into_merged(self) -> Vec<ScaffoldField> {
        self.merged
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
