//! Test unit merger.
//!
//! Concatenates test units from all contributors in contributor order and
//! resolves name collisions. Units are never dropped or merged: a colliding
//! name is rewritten to `{base}{n}` for the smallest integer n ≥ 2 not yet
//! taken. Numbering is scoped to one merge invocation, which makes the
//! outcome a pure function of the ordered input — no first-wins-by-clock
//! ambiguity.
//!
//! Per-unit annotations and documentation travel with their unit unchanged;
//! they are never folded into the file-level metadata reconciliation.

use std::collections::BTreeSet;

use crate::model::source::TestUnit;

// ---------------------------------------------------------------------------
// NameRegistry
// ---------------------------------------------------------------------------

/// Registry of test unit names already present in the merged output.
#[derive(Debug, Default)]
pub struct NameRegistry {
    taken: BTreeSet<String>,
}

impl NameRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a name for `base`: `base` itself if free, otherwise `{base}{n}`
    /// for the smallest n ≥ 2 that is free. The returned name is registered.
    pub fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_owned()) {
            return base.to_owned();
        }
        let mut n = 2_usize;
        loop {
            let candidate = format!("{base}{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// UnitMerger
// ---------------------------------------------------------------------------

/// Accumulates test units across contributors, renaming on collision.
#[derive(Debug, Default)]
pub struct UnitMerger {
    registry: NameRegistry,
    merged: Vec<TestUnit>,
}

impl UnitMerger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one contributor's units in, in their source order.
    pub fn absorb(&mut self, units: Vec<TestUnit>) {
        for mut unit in units {
            let name = self.registry.claim(&unit.name);
            if name != unit.name {
                tracing::debug!(from = %unit.name, to = %name, "renamed colliding test unit");
                unit.name = name;
            }
            self.merged.push(unit);
        }
    }

    /// The merged units, contributor order, names unique.
    #[must_use]
    pub fn into_merged(self) -> Vec<TestUnit> {
        self.merged
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str, body: &str) -> TestUnit {
        TestUnit {
            name: name.to_owned(),
            throws: Vec::new(),
            doc: Some(format!("// doc for {name}")),
            annotations: vec!["@Test".to_owned()],
            body: body.to_owned(),
        }
    }

    // -- NameRegistry --

    #[test]
    fn first_claim_keeps_base_name() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.claim("checkOutputFalse"), "checkOutputFalse");
    }

    #[test]
    fn collisions_number_from_two() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.claim("check"), "check");
        assert_eq!(registry.claim("check"), "check2");
        assert_eq!(registry.claim("check"), "check3");
    }

    #[test]
    fn numbering_skips_names_already_registered() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.claim("check"), "check");
        assert_eq!(registry.claim("check2"), "check2");
        // Smallest unused n ≥ 2 is 3: `check2` is taken.
        assert_eq!(registry.claim("check"), "check3");
    }

    // -- UnitMerger --

    #[test]
    fn three_way_collision_yields_x_x2_x3() {
        let mut merger = UnitMerger::new();
        merger.absorb(vec![unit("loginOutputFalse", "{ first }")]);
        merger.absorb(vec![unit("loginOutputFalse", "{ second }")]);
        merger.absorb(vec![unit("loginOutputFalse", "{ third }")]);

        let merged = merger.into_merged();
        let names: Vec<_> = merged.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["loginOutputFalse", "loginOutputFalse2", "loginOutputFalse3"]
        );
        assert_eq!(merged.len(), 3, "count preserved: no unit dropped or merged");
    }

    #[test]
    fn renamed_unit_keeps_body_doc_and_annotations() {
        let mut merger = UnitMerger::new();
        merger.absorb(vec![unit("check", "{ original }")]);
        merger.absorb(vec![unit("check", "{ colliding }")]);

        let merged = merger.into_merged();
        assert_eq!(merged[1].name, "check2");
        assert_eq!(merged[1].body, "{ colliding }");
        assert_eq!(merged[1].doc.as_deref(), Some("// doc for check"));
        assert_eq!(merged[1].annotations, vec!["@Test".to_owned()]);
    }

    #[test]
    fn non_colliding_units_pass_through_unchanged() {
        let mut merger = UnitMerger::new();
        merger.absorb(vec![unit("a", "{}"), unit("b", "{}")]);
        merger.absorb(vec![unit("c", "{}")]);

        let names: Vec<_> = merger.into_merged().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]);
    }

    #[test]
    fn contributor_order_is_preserved() {
        let mut merger = UnitMerger::new();
        merger.absorb(vec![unit("z", "{}")]);
        merger.absorb(vec![unit("a", "{}")]);

        let names: Vec<_> = merger.into_merged().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["z".to_owned(), "a".to_owned()], "never re-sorted");
    }
}
