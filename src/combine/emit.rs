//! Source emitter.
//!
//! Serializes a [`MergedFile`] back to source text. Emission is a pure
//! function of the model — no hidden state, byte-identical output for
//! identical input. Layout: package; plain imports, then static imports
//! (first-seen order within each group); leading documentation block;
//! type-level annotations; class opening; scaffold fields; test units;
//! closing brace. Two-space indent, `\n` line endings, trailing newline.
//!
//! Unit bodies are spliced in verbatim, so their internal formatting
//! survives the round trip.

use crate::model::merged::MergedFile;
use crate::model::source::{ImportKind, MetadataAnnotation, ScaffoldField, TestUnit};

/// Serialize a merged file to source text.
#[must_use]
pub fn emit(file: &MergedFile) -> String {
    let mut out = String::new();

    out.push_str(&format!("package {};\n", file.package));

    let (plain, statics): (Vec<_>, Vec<_>) = file
        .imports
        .iter()
        .partition(|line| line.kind == ImportKind::Plain);
    for group in [plain, statics] {
        if !group.is_empty() {
            out.push('\n');
            for line in group {
                out.push_str(&format!("{line}\n"));
            }
        }
    }
    out.push('\n');

    if let Some(doc) = &file.doc {
        push_doc(&mut out, doc, "");
    }
    for annotation in &file.annotations {
        out.push_str(&render_annotation(annotation));
        out.push('\n');
    }
    out.push_str(&format!("public class {} {{\n", file.subject));

    for field in &file.fields {
        out.push('\n');
        push_field(&mut out, field);
    }
    for unit in &file.units {
        out.push('\n');
        push_unit(&mut out, unit);
    }

    out.push_str("}\n");
    out
}

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

/// Render one type-level annotation.
///
/// The annotation kind picks the shape: list-valued kinds always render a
/// brace list, everything else renders a single value when it has exactly
/// one. The recognized kinds form a small closed set — there is no open
/// annotation dispatch.
fn render_annotation(annotation: &MetadataAnnotation) -> String {
    let list_kind = matches!(annotation.simple_name(), "PrepareForTest");
    match annotation.types.as_slice() {
        [] => format!("@{}", annotation.name),
        [only] if !list_kind => format!("@{}({only}.class)", annotation.name),
        types => {
            let joined = types
                .iter()
                .map(|t| format!("{t}.class"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("@{}({{{joined}}})", annotation.name)
        }
    }
}

fn push_field(out: &mut String, field: &ScaffoldField) {
    for annotation in &field.annotations {
        out.push_str(&format!("  {annotation}\n"));
    }
    let mut decl = String::from("  ");
    if !field.modifiers.is_empty() {
        decl.push_str(&field.modifiers);
        decl.push(' ');
    }
    decl.push_str(&field.ty);
    decl.push(' ');
    decl.push_str(&field.name);
    if let Some(init) = &field.initializer {
        decl.push_str(" = ");
        decl.push_str(init);
    }
    out.push_str(&decl);
    out.push_str(";\n");
}

fn push_unit(out: &mut String, unit: &TestUnit) {
    if let Some(doc) = &unit.doc {
        push_doc(out, doc, "  ");
    }
    for annotation in &unit.annotations {
        for line in annotation.lines() {
            out.push_str(&format!("  {line}\n"));
        }
    }
    out.push_str(&format!("  public void {}()", unit.name));
    if !unit.throws.is_empty() {
        out.push_str(&format!(" throws {}", unit.throws.join(", ")));
    }
    out.push(' ');
    out.push_str(&unit.body);
    out.push('\n');
}

/// Re-indent a whitespace-normalized documentation block. Continuation
/// lines of block comments (starting with `*`) get one extra space so the
/// stars line up under the opening `/*`.
fn push_doc(out: &mut String, doc: &str, indent: &str) {
    for line in doc.lines() {
        out.push_str(indent);
        if line.starts_with('*') {
            out.push(' ');
        }
        out.push_str(line);
        out.push('\n');
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::source::ImportLine;

    fn minimal_merged() -> MergedFile {
        MergedFile {
            package: "com.example".to_owned(),
            imports: vec![
                ImportLine::plain("org.junit.Assert"),
                ImportLine::plain("org.junit.Test"),
            ],
            subject: "Calculator".to_owned(),
            annotations: Vec::new(),
            fields: Vec::new(),
            units: vec![TestUnit {
                name: "checkOutputZero".to_owned(),
                throws: Vec::new(),
                doc: Some("// Covers the zero branch.".to_owned()),
                annotations: vec!["@Test".to_owned()],
                body: "{\n    Assert.assertEquals(0, new Calculator().add(0, 0));\n  }"
                    .to_owned(),
            }],
            doc: None,
        }
    }

    #[test]
    fn emits_expected_layout() {
        let expected = "\
package com.example;

import org.junit.Assert;
import org.junit.Test;

public class Calculator {

  // Covers the zero branch.
  @Test
  public void checkOutputZero() {
    Assert.assertEquals(0, new Calculator().add(0, 0));
  }
}
";
        assert_eq!(emit(&minimal_merged()), expected);
    }

    #[test]
    fn emission_is_deterministic() {
        let merged = minimal_merged();
        assert_eq!(emit(&merged), emit(&merged));
    }

    #[test]
    fn static_imports_come_after_plain_imports() {
        let mut merged = minimal_merged();
        merged.imports = vec![
            ImportLine::statik("org.mockito.Matchers.anyInt"),
            ImportLine::plain("org.junit.Test"),
        ];
        let out = emit(&merged);
        let plain_at = out.find("import org.junit.Test;").unwrap();
        let static_at = out.find("import static org.mockito.Matchers.anyInt;").unwrap();
        assert!(plain_at < static_at, "plain group first:\n{out}");
        assert!(
            out.contains("import org.junit.Test;\n\nimport static"),
            "groups separated by a blank line:\n{out}"
        );
    }

    #[test]
    fn valueless_annotation_renders_bare() {
        let a = MetadataAnnotation::new("Deprecated", vec![]);
        assert_eq!(render_annotation(&a), "@Deprecated");
    }

    #[test]
    fn single_value_annotation_renders_without_braces() {
        let a = MetadataAnnotation::new(
            "org.junit.runner.RunWith",
            vec!["org.powermock.modules.junit4.PowerMockRunner".to_owned()],
        );
        assert_eq!(
            render_annotation(&a),
            "@org.junit.runner.RunWith(org.powermock.modules.junit4.PowerMockRunner.class)"
        );
    }

    #[test]
    fn list_kind_renders_braces_even_with_one_value() {
        let a = MetadataAnnotation::new("PrepareForTest", vec!["MongoClient".to_owned()]);
        assert_eq!(render_annotation(&a), "@PrepareForTest({MongoClient.class})");
    }

    #[test]
    fn multi_value_annotation_renders_brace_list() {
        let a = MetadataAnnotation::new(
            "PrepareForTest",
            vec!["MongoClient".to_owned(), "Document".to_owned()],
        );
        assert_eq!(
            render_annotation(&a),
            "@PrepareForTest({MongoClient.class, Document.class})"
        );
    }

    #[test]
    fn scaffold_field_renders_annotations_and_initializer() {
        let mut merged = minimal_merged();
        merged.fields = vec![ScaffoldField {
            name: "thrown".to_owned(),
            ty: "ExpectedException".to_owned(),
            modifiers: "public final".to_owned(),
            initializer: Some("ExpectedException.none()".to_owned()),
            annotations: vec!["@Rule".to_owned()],
        }];
        let out = emit(&merged);
        assert!(out.contains(
            "\n  @Rule\n  public final ExpectedException thrown = ExpectedException.none();\n"
        ));
    }

    #[test]
    fn block_doc_stars_line_up() {
        let mut merged = minimal_merged();
        merged.units[0].doc = Some("/*\n* Covers both branches.\n*/".to_owned());
        let out = emit(&merged);
        assert!(out.contains("  /*\n   * Covers both branches.\n   */\n"));
    }

    #[test]
    fn throws_clause_is_rendered() {
        let mut merged = minimal_merged();
        merged.units[0].throws =
            vec!["Exception".to_owned(), "InvocationTargetException".to_owned()];
        let out = emit(&merged);
        assert!(out.contains(
            "public void checkOutputZero() throws Exception, InvocationTargetException {"
        ));
    }

    #[test]
    fn leading_doc_sits_between_imports_and_annotations() {
        let mut merged = minimal_merged();
        merged.doc = Some("/* testedClasses: Calculator */".to_owned());
        merged.annotations = vec![MetadataAnnotation::new(
            "RunWith",
            vec!["PowerMockRunner".to_owned()],
        )];
        let out = emit(&merged);
        assert!(out.contains(
            "\n/* testedClasses: Calculator */\n@RunWith(PowerMockRunner.class)\npublic class Calculator {"
        ));
    }
}
