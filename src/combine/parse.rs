//! Source model parser.
//!
//! Turns the raw text of one contributor file into a [`ContributorFile`]
//! using tree-sitter with the Java grammar. The parser reads structure only:
//! package, imports, class-level annotations, scaffold fields, and test
//! methods. Method bodies are kept as opaque text spans bounded by their
//! braces — internal formatting is preserved byte for byte and never
//! interpreted.
//!
//! Parsing is a pure transform. Anything outside the generated-test shape
//! (constructors, nested types, initializer blocks) is a [`ParseError`]:
//! aborting beats silently dropping test coverage.

use tree_sitter::{Node, Parser};

use crate::error::ParseError;
use crate::model::source::{
    ContributorFile, ImportKind, ImportLine, MetadataAnnotation, ScaffoldField, TestUnit,
};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Parse one contributor file.
///
/// Tolerates zero or many scaffold fields, zero or one leading documentation
/// block (before the class, or unattached inside the class body), and test
/// units with or without annotations, documentation, and `throws` clauses.
///
/// # Errors
///
/// [`ParseError`] naming the offending construct: syntax errors, a missing
/// package or class declaration, a bodiless method, or a class member
/// outside the generated-test shape.
pub fn parse(source: &str) -> Result<ContributorFile, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| ParseError::Grammar(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::Grammar("parser produced no tree".to_owned()))?;
    let root = tree.root_node();

    if root.has_error() {
        return Err(syntax_error(root));
    }

    let mut package = None;
    let mut imports = Vec::new();
    let mut file_doc: Option<String> = None;
    let mut class: Option<Node<'_>> = None;

    for node in collect_children(root) {
        match node.kind() {
            "package_declaration" => package = qualified_name(node, source),
            "import_declaration" => imports.push(import_line(node, source)),
            // A comment before the class declaration is the leading
            // documentation block candidate.
            "block_comment" | "line_comment" => {
                if class.is_none() && file_doc.is_none() {
                    file_doc = Some(comment_text(node, source));
                }
            }
            "class_declaration" => {
                if class.is_some() {
                    return Err(ParseError::UnsupportedMember {
                        kind: "class_declaration".to_owned(),
                        line: line_of(node),
                    });
                }
                class = Some(node);
            }
            _ => {}
        }
    }

    let package = package.ok_or(ParseError::MissingPackage)?;
    let class = class.ok_or(ParseError::MissingClass)?;

    let subject = class
        .child_by_field_name("name")
        .map(|n| text(n, source).to_owned())
        .ok_or(ParseError::MissingClass)?;

    let annotations = class_annotations(class, source);
    let body = class.child_by_field_name("body").ok_or(ParseError::MissingClass)?;
    let (fields, units) = class_members(body, source, &mut file_doc)?;

    Ok(ContributorFile {
        package,
        imports,
        subject,
        annotations,
        fields,
        units,
        doc: file_doc,
    })
}

// ---------------------------------------------------------------------------
// Class body walk
// ---------------------------------------------------------------------------

/// Walk the class body in order, attaching comment runs to the members that
/// follow them.
///
/// A comment run directly before a test method: the last block is the unit's
/// documentation, earlier blocks are leading-doc candidates. Comment runs
/// followed by a field or by the closing brace are leading-doc candidates.
/// The first candidate wins; the rest are dropped.
fn class_members(
    body: Node<'_>,
    source: &str,
    file_doc: &mut Option<String>,
) -> Result<(Vec<ScaffoldField>, Vec<TestUnit>), ParseError> {
    let mut fields = Vec::new();
    let mut units = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut in_line_run = false;

    for member in collect_children(body) {
        match member.kind() {
            "line_comment" => {
                let block = comment_text(member, source);
                // Consecutive line comments form one documentation block.
                if in_line_run && let Some(last) = pending.last_mut() {
                    last.push('\n');
                    last.push_str(&block);
                } else {
                    pending.push(block);
                }
                in_line_run = true;
            }
            "block_comment" => {
                pending.push(comment_text(member, source));
                in_line_run = false;
            }
            "field_declaration" => {
                in_line_run = false;
                absorb_leading_doc(&mut pending, file_doc);
                fields.push(scaffold_field(member, source)?);
            }
            "method_declaration" => {
                in_line_run = false;
                let doc = pending.pop().filter(|d| !d.is_empty());
                absorb_leading_doc(&mut pending, file_doc);
                units.push(test_unit(member, source, doc)?);
            }
            "{" | "}" | ";" => {}
            kind => {
                return Err(ParseError::UnsupportedMember {
                    kind: kind.to_owned(),
                    line: line_of(member),
                });
            }
        }
    }

    absorb_leading_doc(&mut pending, file_doc);
    Ok((fields, units))
}

fn absorb_leading_doc(pending: &mut Vec<String>, file_doc: &mut Option<String>) {
    for block in pending.drain(..) {
        if file_doc.is_none() && !block.is_empty() {
            *file_doc = Some(block);
        }
    }
}

// ---------------------------------------------------------------------------
// Member extraction
// ---------------------------------------------------------------------------

fn scaffold_field(node: Node<'_>, source: &str) -> Result<ScaffoldField, ParseError> {
    let (annotations, modifiers) = split_modifiers(node, source);

    let ty = node
        .child_by_field_name("type")
        .map(|n| text(n, source).to_owned())
        .unwrap_or_default();

    let declarator = node
        .child_by_field_name("declarator")
        .ok_or_else(|| ParseError::UnsupportedMember {
            kind: "field_declaration".to_owned(),
            line: line_of(node),
        })?;
    let name = declarator
        .child_by_field_name("name")
        .map(|n| text(n, source).to_owned())
        .unwrap_or_default();
    let initializer = declarator
        .child_by_field_name("value")
        .map(|n| text(n, source).to_owned());

    Ok(ScaffoldField {
        name,
        ty,
        modifiers,
        initializer,
        annotations,
    })
}

fn test_unit(node: Node<'_>, source: &str, doc: Option<String>) -> Result<TestUnit, ParseError> {
    let (annotations, _modifiers) = split_modifiers(node, source);

    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, source).to_owned())
        .unwrap_or_default();

    let throws = collect_children(node)
        .into_iter()
        .find(|c| c.kind() == "throws")
        .map(|t| {
            collect_named_children(t)
                .into_iter()
                .map(|n| text(n, source).to_owned())
                .collect()
        })
        .unwrap_or_default();

    let body = node
        .child_by_field_name("body")
        .map(|n| text(n, source).to_owned())
        .ok_or_else(|| ParseError::MissingBody { unit: name.clone() })?;

    Ok(TestUnit {
        name,
        throws,
        doc,
        annotations,
        body,
    })
}

/// Split a member's `modifiers` node into (annotations as raw text, modifier
/// keywords joined by a space).
fn split_modifiers(node: Node<'_>, source: &str) -> (Vec<String>, String) {
    let mut annotations = Vec::new();
    let mut keywords = Vec::new();
    if let Some(mods) = collect_children(node)
        .into_iter()
        .find(|c| c.kind() == "modifiers")
    {
        for m in collect_children(mods) {
            match m.kind() {
                "marker_annotation" | "annotation" => {
                    annotations.push(text(m, source).to_owned());
                }
                _ => keywords.push(text(m, source)),
            }
        }
    }
    (annotations, keywords.join(" "))
}

fn class_annotations(class: Node<'_>, source: &str) -> Vec<MetadataAnnotation> {
    let mut annotations = Vec::new();
    if let Some(mods) = collect_children(class)
        .into_iter()
        .find(|c| c.kind() == "modifiers")
    {
        for m in collect_children(mods) {
            if matches!(m.kind(), "marker_annotation" | "annotation") {
                annotations.push(metadata_annotation(m, source));
            }
        }
    }
    annotations
}

fn metadata_annotation(node: Node<'_>, source: &str) -> MetadataAnnotation {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, source).to_owned())
        .unwrap_or_default();
    let types = node
        .child_by_field_name("arguments")
        .map(|args| annotation_values(text(args, source)))
        .unwrap_or_default();
    MetadataAnnotation::new(name, types)
}

/// Extract the referenced type names from an annotation argument list,
/// e.g. `({A.class, B.class})` → `[A, B]`, `(Runner.class)` → `[Runner]`.
fn annotation_values(arguments: &str) -> Vec<String> {
    let inner = arguments.trim();
    let inner = inner.strip_prefix('(').unwrap_or(inner);
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    let inner = inner.trim();
    let inner = inner.strip_prefix('{').unwrap_or(inner);
    let inner = inner.strip_suffix('}').unwrap_or(inner);
    inner
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.strip_suffix(".class").unwrap_or(v).to_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// Imports and package
// ---------------------------------------------------------------------------

fn import_line(node: Node<'_>, source: &str) -> ImportLine {
    let mut is_static = false;
    let mut name = String::new();
    let mut on_demand = false;
    for child in collect_children(node) {
        match child.kind() {
            "static" => is_static = true,
            "scoped_identifier" | "identifier" => name = text(child, source).to_owned(),
            "asterisk" => on_demand = true,
            _ => {}
        }
    }
    if on_demand {
        name.push_str(".*");
    }
    ImportLine {
        name,
        kind: if is_static {
            ImportKind::Static
        } else {
            ImportKind::Plain
        },
    }
}

fn qualified_name(node: Node<'_>, source: &str) -> Option<String> {
    collect_children(node)
        .into_iter()
        .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
        .map(|c| text(c, source).to_owned())
}

// ---------------------------------------------------------------------------
// Node helpers
// ---------------------------------------------------------------------------

fn collect_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn collect_named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// Comment text with per-line leading/trailing whitespace stripped; the
/// emitter re-indents deterministically.
fn comment_text(node: Node<'_>, source: &str) -> String {
    text(node, source)
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Locate the first error or missing node and name the enclosing construct.
fn syntax_error(root: Node<'_>) -> ParseError {
    fn find<'t>(node: Node<'t>) -> Option<Node<'t>> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            return None;
        }
        for child in collect_children(node) {
            if let Some(found) = find(child) {
                return Some(found);
            }
        }
        None
    }

    find(root).map_or_else(
        || ParseError::Syntax {
            construct: root.kind().to_owned(),
            line: 1,
        },
        |node| {
            let construct = if node.is_missing() {
                node.kind().to_owned()
            } else {
                node.parent()
                    .map_or_else(|| node.kind().to_owned(), |p| p.kind().to_owned())
            };
            ParseError::Syntax {
                construct,
                line: line_of(node),
            }
        },
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
