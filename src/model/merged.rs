//! The reconciled output of one merge run.

use crate::model::source::{ImportLine, MetadataAnnotation, ScaffoldField, TestUnit};

/// The merged test suite for one subject type.
///
/// Produced by the combine pipeline, consumed by the emitter. Holds the
/// reconciled import set, the unioned metadata annotations, the deduplicated
/// scaffold fields, and the collision-renamed test units, all in their
/// deterministic merge order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedFile {
    /// Single package path shared by all contributors.
    pub package: String,
    /// Reconciled imports, first-seen order across contributors.
    pub imports: Vec<ImportLine>,
    /// The subject type name, identical across all contributors.
    pub subject: String,
    /// Reconciled type-level annotations, one per annotation name.
    pub annotations: Vec<MetadataAnnotation>,
    /// Deduplicated scaffold fields, first-seen order.
    pub fields: Vec<ScaffoldField>,
    /// Test units in merge order, names unique after collision renaming.
    pub units: Vec<TestUnit>,
    /// First non-empty leading documentation block, by contributor order.
    pub doc: Option<String>,
}

impl MergedFile {
    /// Names of all merged test units, in output order.
    #[must_use]
    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name.as_str()).collect()
    }
}
