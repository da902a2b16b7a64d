//! Import reconciler.
//!
//! Unions the import lists of all contributors into one deduplicated list.
//! Ordering is a stable union: the first occurrence of an import fixes its
//! position, later duplicates are dropped. The list is deliberately not
//! sorted — merged output keeps each contributor's relative grouping.

use std::collections::BTreeSet;

use crate::model::source::ImportLine;

/// Accumulates imports across contributors in contributor order.
#[derive(Debug, Default)]
pub struct ImportReconciler {
    seen: BTreeSet<ImportLine>,
    merged: Vec<ImportLine>,
}

impl ImportReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one contributor's imports into the union.
    pub fn absorb(&mut self, imports: Vec<ImportLine>) {
        for line in imports {
            if self.seen.insert(line.clone()) {
                self.merged.push(line);
            }
        }
    }

    /// The reconciled list, first-seen order.
    #[must_use]
    pub fn into_merged(self) -> Vec<ImportLine> {
        self.merged
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_union_preserves_first_seen_order() {
        let mut reconciler = ImportReconciler::new();
        reconciler.absorb(vec![
            ImportLine::plain("org.junit.Test"),
            ImportLine::plain("org.junit.Assert"),
        ]);
        reconciler.absorb(vec![
            ImportLine::plain("com.example.Helper"),
            ImportLine::plain("org.junit.Test"),
        ]);

        assert_eq!(
            reconciler.into_merged(),
            vec![
                ImportLine::plain("org.junit.Test"),
                ImportLine::plain("org.junit.Assert"),
                ImportLine::plain("com.example.Helper"),
            ]
        );
    }

    #[test]
    fn duplicates_within_one_contributor_collapse() {
        let mut reconciler = ImportReconciler::new();
        reconciler.absorb(vec![
            ImportLine::plain("org.junit.Test"),
            ImportLine::plain("org.junit.Test"),
        ]);
        assert_eq!(reconciler.into_merged().len(), 1);
    }

    #[test]
    fn static_and_plain_imports_of_same_name_are_distinct() {
        let mut reconciler = ImportReconciler::new();
        reconciler.absorb(vec![
            ImportLine::plain("org.mockito.Matchers"),
            ImportLine::statik("org.mockito.Matchers"),
        ]);
        assert_eq!(reconciler.into_merged().len(), 2);
    }

    #[test]
    fn union_is_not_sorted() {
        let mut reconciler = ImportReconciler::new();
        reconciler.absorb(vec![
            ImportLine::plain("z.Last"),
            ImportLine::plain("a.First"),
        ]);
        assert_eq!(
            reconciler.into_merged(),
            vec![ImportLine::plain("z.Last"), ImportLine::plain("a.First")]
        );
    }
}
