//! Deterministic test-suite combine pipeline.
//!
//! Implements the parse → reconcile → merge → emit pipeline. Each phase is
//! a separate module:
//!
//! - **parse**: Turn one contributor file's raw text into a
//!   [`crate::model::source::ContributorFile`].
//! - **imports**: Stable union of import statements across contributors.
//! - **metadata**: Union type-level annotations by name; deduplicate
//!   scaffold fields by (name, type) identity.
//! - **units**: Concatenate test units in contributor order, renaming
//!   collisions to `{base}{n}`, n ≥ 2.
//! - **emit**: Serialize the [`crate::model::merged::MergedFile`] back to
//!   source text.
//! - **pipeline**: The orchestrator, [`combine`].
//!
//! # Determinism guarantee
//!
//! The same ordered list of contributor sources always produces the same
//! merged output, byte for byte:
//!
//! - Reconciliation runs in one pass over contributors in their given order.
//! - All ordering is first-seen, never wall-clock or hash order.
//! - Collision numbering is scoped to a single invocation.

pub mod emit;
pub mod imports;
pub mod metadata;
pub mod parse;
pub mod pipeline;
pub mod units;

pub use emit::emit;
pub use pipeline::combine;
