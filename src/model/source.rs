//! Parsed representation of one contributor file.
//!
//! A contributor file is one generated test source file: a package
//! declaration, imports, optional class-level annotations, `@Rule`-style
//! scaffold fields, and one test method per scenario. The parser produces
//! these types; they are immutable for the rest of the merge run.

use std::fmt;

// ---------------------------------------------------------------------------
// ImportKind / ImportLine
// ---------------------------------------------------------------------------

/// Whether an import is a plain type import or a `static` member import.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImportKind {
    Plain,
    Static,
}

/// A single import statement.
///
/// Two imports are equal iff their fully-qualified name and kind match
/// exactly; the reconciler relies on this for deduplication.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImportLine {
    /// Fully-qualified referenced name, e.g. `org.junit.Assert` or
    /// `org.mockito.Matchers.anyInt`. On-demand imports keep the `.*`.
    pub name: String,
    pub kind: ImportKind,
}

impl ImportLine {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ImportKind::Plain,
        }
    }

    pub fn statik(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ImportKind::Static,
        }
    }
}

impl fmt::Display for ImportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ImportKind::Plain => write!(f, "import {};", self.name),
            ImportKind::Static => write!(f, "import static {};", self.name),
        }
    }
}

// ---------------------------------------------------------------------------
// MetadataAnnotation
// ---------------------------------------------------------------------------

/// A type-level annotation naming auxiliary types that need special handling
/// at test runtime (e.g. a runner class, or a list of classes to instrument).
///
/// The merged output carries at most one instance per annotation name; its
/// `types` are the first-seen-ordered union across all contributors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataAnnotation {
    /// Annotation name as written in the source, possibly fully qualified
    /// (e.g. `RunWith` or `org.junit.runner.RunWith`).
    pub name: String,
    /// Referenced type names, without the `.class` suffix.
    pub types: Vec<String>,
}

impl MetadataAnnotation {
    pub fn new(name: impl Into<String>, types: Vec<String>) -> Self {
        Self {
            name: name.into(),
            types,
        }
    }

    /// The simple (unqualified) annotation name, used to pick the render
    /// policy for known annotation kinds.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

// ---------------------------------------------------------------------------
// ScaffoldField
// ---------------------------------------------------------------------------

/// A class-scoped fixture declaration shared by all test units in a file,
/// e.g. an expected-exception guard or a timeout guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaffoldField {
    /// Declared field name.
    pub name: String,
    /// Declared type, as written (e.g. `ExpectedException`).
    pub ty: String,
    /// Modifier keywords, as written (e.g. `public final`). May be empty.
    pub modifiers: String,
    /// Initializer expression text, if present.
    pub initializer: Option<String>,
    /// Per-field annotations, raw text in source order (e.g. `@Rule`).
    pub annotations: Vec<String>,
}

impl ScaffoldField {
    /// Identity for deduplication: (declared name, declared type).
    #[must_use]
    pub fn identity(&self) -> (&str, &str) {
        (&self.name, &self.ty)
    }
}

// ---------------------------------------------------------------------------
// TestUnit
// ---------------------------------------------------------------------------

/// One test scenario: a single test method.
///
/// The body is an opaque text span (the brace-delimited block, internal
/// formatting preserved); the combiner never looks inside it. Per-unit
/// annotations are carried through the merge verbatim — they are never
/// folded into the file-level metadata reconciliation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestUnit {
    /// Method name. May be rewritten by the merger on collision.
    pub name: String,
    /// Declared failure types from the `throws` clause, in source order.
    pub throws: Vec<String>,
    /// Documentation block preceding the unit, whitespace-normalized lines
    /// joined by `\n`. `None` when the unit has no documentation.
    pub doc: Option<String>,
    /// Annotations, raw text in source order (e.g. `@Test`,
    /// `@PrepareForTest({...})`).
    pub annotations: Vec<String>,
    /// The method body, from opening to closing brace inclusive.
    pub body: String,
}

// ---------------------------------------------------------------------------
// ContributorFile
// ---------------------------------------------------------------------------

/// One fully parsed contributor file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContributorFile {
    /// Package path, e.g. `com.example.app`.
    pub package: String,
    /// Import statements in source order.
    pub imports: Vec<ImportLine>,
    /// The subject type name (the class under test, which the generated
    /// suite is named after).
    pub subject: String,
    /// Type-level metadata annotations in source order.
    pub annotations: Vec<MetadataAnnotation>,
    /// Scaffold fields in source order.
    pub fields: Vec<ScaffoldField>,
    /// Test units in source order.
    pub units: Vec<TestUnit>,
    /// Leading free-form documentation block, if any.
    pub doc: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_display_plain() {
        let line = ImportLine::plain("org.junit.Assert");
        assert_eq!(format!("{line}"), "import org.junit.Assert;");
    }

    #[test]
    fn import_display_static() {
        let line = ImportLine::statik("org.mockito.Matchers.anyInt");
        assert_eq!(format!("{line}"), "import static org.mockito.Matchers.anyInt;");
    }

    #[test]
    fn import_equality_distinguishes_kind() {
        let plain = ImportLine::plain("a.b.C");
        let stat = ImportLine::statik("a.b.C");
        assert_ne!(plain, stat);
    }

    #[test]
    fn annotation_simple_name_strips_qualifier() {
        let a = MetadataAnnotation::new("org.junit.runner.RunWith", vec![]);
        assert_eq!(a.simple_name(), "RunWith");
    }

    #[test]
    fn annotation_simple_name_passthrough() {
        let a = MetadataAnnotation::new("PrepareForTest", vec![]);
        assert_eq!(a.simple_name(), "PrepareForTest");
    }

    #[test]
    fn scaffold_identity_is_name_and_type() {
        let field = ScaffoldField {
            name: "thrown".to_owned(),
            ty: "ExpectedException".to_owned(),
            modifiers: "public final".to_owned(),
            initializer: Some("ExpectedException.none()".to_owned()),
            annotations: vec!["@Rule".to_owned()],
        };
        assert_eq!(field.identity(), ("thrown", "ExpectedException"));
    }
}
